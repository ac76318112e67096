use std::{
  collections::{HashMap, HashSet},
  fmt,
};

use crate::components::traits::row_item::DynRowItem;

/// How one list of rows differs from the next, matched by identity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Changeset {
  /// Indices into the new list of rows whose identity is new.
  pub inserted: Vec<usize>,
  /// Indices into the old list of rows whose identity is gone.
  pub removed: Vec<usize>,
  /// Indices into the new list of kept rows whose content changed.
  pub updated: Vec<usize>,
  /// `(old, new)` positions of kept rows that changed order.
  pub moved: Vec<(usize, usize)>,
}

impl Changeset {
  /// Compares two row lists. Identities are assumed unique within each list.
  pub fn between(old: &[DynRowItem], new: &[DynRowItem]) -> Self {
    let old_positions: HashMap<&str, usize> =
      old.iter().enumerate().map(|(index, item)| (item.identity(), index)).collect();
    let new_identities: HashSet<&str> = new.iter().map(|item| item.identity()).collect();

    let removed =
      old.iter().enumerate().filter(|(_, item)| !new_identities.contains(item.identity())).map(|(index, _)| index).collect();

    let mut inserted = Vec::new();
    let mut updated = Vec::new();
    let mut kept = Vec::new();
    for (new_index, item) in new.iter().enumerate() {
      match old_positions.get(item.identity()) {
        Some(&old_index) => {
          if !item.equals_for_diff(&*old[old_index]) {
            updated.push(new_index);
          }
          kept.push((old_index, new_index));
        },
        None => inserted.push(new_index),
      }
    }

    let old_order: Vec<usize> = kept.iter().map(|(old_index, _)| *old_index).collect();
    let in_place = longest_increasing(&old_order);
    let moved = kept.into_iter().zip(in_place).filter(|(_, in_place)| !in_place).map(|(pair, _)| pair).collect();

    Changeset { inserted, removed, updated, moved }
  }

  pub fn is_empty(&self) -> bool {
    self.inserted.is_empty() && self.removed.is_empty() && self.updated.is_empty() && self.moved.is_empty()
  }
}

impl fmt::Display for Changeset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} inserted, {} removed, {} updated, {} moved",
      self.inserted.len(),
      self.removed.len(),
      self.updated.len(),
      self.moved.len()
    )
  }
}

/// Marks the members of one longest strictly increasing subsequence of `values`.
fn longest_increasing(values: &[usize]) -> Vec<bool> {
  let mut tails: Vec<usize> = Vec::new();
  let mut previous: Vec<Option<usize>> = vec![None; values.len()];

  for (index, &value) in values.iter().enumerate() {
    let position = tails.partition_point(|&tail| values[tail] < value);
    if position > 0 {
      previous[index] = Some(tails[position - 1]);
    }
    if position == tails.len() {
      tails.push(index);
    } else {
      tails[position] = index;
    }
  }

  let mut members = vec![false; values.len()];
  let mut cursor = tails.last().copied();
  while let Some(index) = cursor {
    members[index] = true;
    cursor = previous[index];
  }
  members
}
