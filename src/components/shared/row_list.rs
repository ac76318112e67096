use std::collections::{HashMap, HashSet};

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use tracing::{debug, warn};

use super::{changeset::Changeset, view_pool::ViewPool};
use crate::{
  components::traits::{
    row_item::DynRowItem,
    row_view::{AsAny, RowView},
  },
  error::Error,
};

struct Row {
  item: DynRowItem,
  view: Box<dyn RowView>,
}

/// A list host: owns the current row descriptors and the views built for them.
///
/// Each call to [`RowList::set_items`] replaces every descriptor. Views are
/// carried over for identities that survive, recycled through a [`ViewPool`]
/// otherwise, and only built from scratch when nothing can be reused.
pub struct RowList {
  title: String,
  highlight_symbol: String,
  rows: Vec<Row>,
  pool: ViewPool,
  selected_index: usize,
  list_state: ListState,
}

impl RowList {
  pub fn new(title: impl Into<String>) -> Self {
    RowList {
      title: title.into(),
      highlight_symbol: "→".to_string(),
      rows: Vec::new(),
      pool: ViewPool::new(),
      selected_index: 0,
      list_state: ListState::default(),
    }
  }

  pub fn with_highlight_symbol(mut self, symbol: impl Into<String>) -> Self {
    self.highlight_symbol = symbol.into();
    self
  }

  /// Replaces the rows with `items` and reports what changed.
  ///
  /// Fails with [`Error::DuplicateIdentity`] before touching any state if two
  /// items share an identity. If a row rejects its view, the previous rows are
  /// put back and the error is returned.
  pub fn set_items(&mut self, items: Vec<DynRowItem>) -> Result<Changeset, Error> {
    let mut identities = HashSet::with_capacity(items.len());
    for item in &items {
      if !identities.insert(item.identity()) {
        return Err(Error::DuplicateIdentity(item.identity().to_string()));
      }
    }

    let old_items: Vec<DynRowItem> = self.rows.iter().map(|row| row.item.clone()).collect();
    let changeset = Changeset::between(&old_items, &items);

    let mut previous: HashMap<String, Row> =
      self.rows.drain(..).map(|row| (row.item.identity().to_string(), row)).collect();
    // Rows built so far, flagged when the view was carried over from an old row.
    let mut staged: Vec<(Row, bool)> = Vec::with_capacity(items.len());
    for item in items {
      let (mut view, carried) = match previous.remove(item.identity()) {
        Some(old) if old.item.view_type() == item.view_type() => {
          let unchanged = item.equals_for_diff(&*old.item);
          (old.view, Some(unchanged))
        },
        old => {
          if let Some(old) = old {
            self.pool.enqueue(old.item.view_type(), old.view);
          }
          (self.pool.dequeue(item.view_type()).unwrap_or_else(|| item.make_view()), None)
        },
      };
      let configured = match carried {
        Some(true) => Ok(()),
        Some(false) => item.configure_view(view.as_mut(), true),
        None => item.configure_view(view.as_mut(), false),
      };
      if let Err(err) = configured {
        let mut carried_views: HashMap<String, (Box<dyn RowView>, bool)> =
          previous.into_iter().map(|(identity, row)| (identity, (row.view, false))).collect();
        if carried.is_some() {
          carried_views.insert(item.identity().to_string(), (view, true));
        }
        self.roll_back(&old_items, staged, carried_views);
        return Err(err);
      }
      staged.push((Row { item, view }, carried.is_some()));
    }
    for (_, old) in previous {
      self.pool.enqueue(old.item.view_type(), old.view);
    }
    self.rows = staged.into_iter().map(|(row, _)| row).collect();
    self.clamp_selection();

    debug!("rows reconciled ({}), {} views pooled", changeset, self.pool.len());
    Ok(changeset)
  }

  /// Rebuilds the rows for `old_items` after a failed reconciliation.
  ///
  /// `views` holds the old views by identity, flagged when they were already
  /// reconfigured for a new item and must be configured back.
  fn roll_back(
    &mut self,
    old_items: &[DynRowItem],
    staged: Vec<(Row, bool)>,
    mut views: HashMap<String, (Box<dyn RowView>, bool)>,
  ) {
    for (row, carried) in staged {
      if carried {
        views.insert(row.item.identity().to_string(), (row.view, true));
      } else {
        self.pool.enqueue(row.item.view_type(), row.view);
      }
    }

    for item in old_items {
      let (mut view, reconfigure) = match views.remove(item.identity()) {
        Some(entry) => entry,
        None => (self.pool.dequeue(item.view_type()).unwrap_or_else(|| item.make_view()), true),
      };
      if reconfigure {
        if let Err(err) = item.configure_view(view.as_mut(), false) {
          warn!("dropping row '{}' while restoring the list: {}", item.identity(), err);
          continue;
        }
      }
      self.rows.push(Row { item: item.clone(), view });
    }
    self.clamp_selection();
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn item_at(&self, index: usize) -> Option<&DynRowItem> {
    self.rows.get(index).map(|row| &row.item)
  }

  /// The view currently bound to row `index`, if it is a `V`.
  pub fn view_at<V: RowView>(&self, index: usize) -> Option<&V> {
    let row = self.rows.get(index)?;
    row.view.as_ref().as_any().downcast_ref::<V>()
  }

  pub fn identities(&self) -> Vec<&str> {
    self.rows.iter().map(|row| row.item.identity()).collect()
  }

  pub fn pooled_views(&self) -> usize {
    self.pool.len()
  }

  pub fn selected_index(&self) -> usize {
    self.selected_index
  }

  pub fn selected_item(&self) -> Option<&DynRowItem> {
    self.item_at(self.selected_index)
  }

  pub fn select(&mut self, index: usize) -> Result<(), Error> {
    if index >= self.rows.len() {
      return Err(Error::RowOutOfBounds { index, len: self.rows.len() });
    }
    self.selected_index = index;
    self.list_state.select(Some(index));
    Ok(())
  }

  pub fn select_next(&mut self) {
    let count = self.rows.len();
    if count == 0 {
      return;
    }
    let next_index = if self.selected_index >= count - 1 { 0 } else { self.selected_index + 1 };
    self.selected_index = next_index;
    self.list_state.select(Some(next_index));
  }

  pub fn select_previous(&mut self) {
    let count = self.rows.len();
    if count == 0 {
      return;
    }
    let prev_index = if self.selected_index == 0 { count - 1 } else { self.selected_index - 1 };
    self.selected_index = prev_index;
    self.list_state.select(Some(prev_index));
  }

  /// Notifies the highlighted row's selection handler. Returns false when there
  /// is no highlighted row or it is not selectable.
  pub fn activate_selected(&self) -> bool {
    match self.selected_item() {
      Some(item) if item.is_selectable() => {
        item.notify_selected();
        true
      },
      _ => false,
    }
  }

  fn clamp_selection(&mut self) {
    let count = self.rows.len();
    if count == 0 {
      self.selected_index = 0;
      self.list_state.select(None);
    } else {
      self.selected_index = self.selected_index.min(count - 1);
      self.list_state.select(Some(self.selected_index));
    }
  }

  pub fn render(&mut self, f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem> = self.rows.iter().map(|row| row.view.render()).collect();
    let list = List::new(items)
      .block(Block::default().title(self.title.as_str()).borders(Borders::ALL))
      .style(Style::default().fg(Color::White))
      .highlight_style(Style::default().add_modifier(Modifier::BOLD))
      .highlight_symbol(self.highlight_symbol.as_str())
      .repeat_highlight_symbol(true);

    f.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl std::fmt::Debug for RowList {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RowList")
      .field("title", &self.title)
      .field("rows", &self.identities())
      .field("selected_index", &self.selected_index)
      .field("pool", &self.pool)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    any::TypeId,
    sync::{
      Arc, Mutex,
      atomic::{AtomicUsize, Ordering},
    },
  };

  use pretty_assertions::assert_eq;
  use ratatui::{Terminal, backend::TestBackend};

  use super::*;
  use crate::components::{
    items::SelectableItem,
    traits::{
      configurable::Configurable,
      row_item::{RowItem, row_item},
      selection_handler::{HandlerRef, SelectionHandler, handler_ref},
    },
    views::{HeaderRow, Note, NoteRow, NoteStatus},
  };

  #[derive(Default)]
  struct Recorder {
    seen: Mutex<Vec<String>>,
  }

  impl SelectionHandler for Recorder {
    fn did_select(&self, identity: &str) {
      self.seen.lock().unwrap().push(identity.to_string());
    }
  }

  /// Counts selections into a tally owned by the test, not by the handler.
  struct Tally {
    calls: Arc<AtomicUsize>,
  }

  impl SelectionHandler for Tally {
    fn did_select(&self, _identity: &str) {
      self.calls.fetch_add(1, Ordering::SeqCst);
    }
  }

  /// Claims `NoteRow` as its view type but refuses every view.
  struct Mismatched {
    identity: String,
  }

  impl RowItem for Mismatched {
    fn identity(&self) -> &str {
      &self.identity
    }

    fn is_selectable(&self) -> bool {
      false
    }

    fn view_type(&self) -> TypeId {
      TypeId::of::<NoteRow>()
    }

    fn view_type_name(&self) -> &'static str {
      "NoteRow"
    }

    fn make_view(&self) -> Box<dyn RowView> {
      Box::new(NoteRow::default())
    }

    fn configure_view(&self, view: &mut dyn RowView, _animated: bool) -> Result<(), Error> {
      Err(Error::ViewTypeMismatch {
        identity: self.identity.clone(),
        expected: "HeaderRow",
        found: (*view).concrete_type_name(),
      })
    }

    fn equals_for_diff(&self, _other: &dyn RowItem) -> bool {
      false
    }

    fn notify_selected(&self) {}
  }

  fn mismatched(identity: &str) -> DynRowItem {
    row_item(Mismatched { identity: identity.to_string() })
  }

  #[derive(Default)]
  struct Counter {
    text: String,
    configured: usize,
  }

  impl RowView for Counter {
    fn render(&self) -> ListItem<'_> {
      ListItem::new(self.text.as_str())
    }
  }

  fn note(identity: &str, title: &str, status: NoteStatus, handler: Option<HandlerRef>) -> DynRowItem {
    row_item(NoteRow::selectable(Note { title: title.to_string(), status }, handler, identity))
  }

  fn counted(identity: &str, text: &str, built: Arc<AtomicUsize>) -> DynRowItem {
    row_item(SelectableItem::new(
      move || {
        built.fetch_add(1, Ordering::SeqCst);
        Counter::default()
      },
      |view: &mut Counter, data: &String| {
        view.text = data.clone();
        view.configured += 1;
      },
      text.to_string(),
      None,
      identity,
    ))
  }

  #[test]
  fn test_set_items_builds_and_configures_views() {
    let mut list = RowList::new("Notes");
    let changeset = list
      .set_items(vec![
        row_item(HeaderRow::fixed("Today".to_string(), "header")),
        note("row-7", "draft", NoteStatus::Draft, None),
      ])
      .unwrap();

    assert_eq!(changeset.inserted, vec![0, 1]);
    assert_eq!(list.len(), 2);
    assert_eq!(list.view_at::<HeaderRow>(0).unwrap().text(), "Today");
    assert_eq!(list.view_at::<NoteRow>(1).unwrap().title(), "draft");
    assert!(list.view_at::<NoteRow>(0).is_none());
  }

  #[test]
  fn test_regenerated_row_reconfigures_same_view() {
    let mut list = RowList::new("Notes");
    list.set_items(vec![note("row-7", "draft", NoteStatus::Draft, None)]).unwrap();

    let changeset = list.set_items(vec![note("row-7", "final", NoteStatus::Final, None)]).unwrap();

    assert_eq!(changeset, Changeset { updated: vec![0], ..Changeset::default() });
    let view = list.view_at::<NoteRow>(0).unwrap();
    assert_eq!(view.title(), "final");
    assert_eq!(view.status(), NoteStatus::Final);
  }

  #[test]
  fn test_unchanged_rows_are_not_rebuilt_or_reconfigured() {
    let built = Arc::new(AtomicUsize::new(0));
    let mut list = RowList::new("Rows");
    list.set_items(vec![counted("a", "1", built.clone()), counted("b", "2", built.clone())]).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 2);

    let changeset = list.set_items(vec![counted("b", "2", built.clone()), counted("a", "1", built.clone())]).unwrap();

    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(changeset.moved.len(), 1);
    assert_eq!(list.identities(), vec!["b", "a"]);
    assert_eq!(list.view_at::<Counter>(0).unwrap().configured, 1);
    assert_eq!(list.view_at::<Counter>(1).unwrap().configured, 1);
  }

  #[test]
  fn test_removed_views_are_pooled_and_reused() {
    let built = Arc::new(AtomicUsize::new(0));
    let mut list = RowList::new("Rows");
    list.set_items(vec![counted("a", "1", built.clone()), counted("b", "2", built.clone())]).unwrap();

    list.set_items(vec![counted("a", "1", built.clone())]).unwrap();
    assert_eq!(list.pooled_views(), 1);

    let changeset = list.set_items(vec![counted("a", "1", built.clone()), counted("c", "3", built.clone())]).unwrap();

    assert_eq!(changeset.inserted, vec![1]);
    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(list.pooled_views(), 0);
    let reused = list.view_at::<Counter>(1).unwrap();
    assert_eq!(reused.text, "3");
    assert_eq!(reused.configured, 2);
  }

  #[test]
  fn test_view_type_change_swaps_view() {
    let mut list = RowList::new("Rows");
    list.set_items(vec![note("a", "note", NoteStatus::Draft, None)]).unwrap();

    let changeset = list.set_items(vec![row_item(HeaderRow::fixed("header".to_string(), "a"))]).unwrap();

    assert_eq!(changeset.updated, vec![0]);
    assert_eq!(list.view_at::<HeaderRow>(0).unwrap().text(), "header");
    assert_eq!(list.pooled_views(), 1);
  }

  #[test]
  fn test_duplicate_identity_is_rejected() {
    let mut list = RowList::new("Rows");
    list.set_items(vec![note("a", "keep", NoteStatus::Draft, None)]).unwrap();

    let result = list.set_items(vec![note("b", "1", NoteStatus::Draft, None), note("b", "2", NoteStatus::Draft, None)]);

    assert_eq!(result, Err(Error::DuplicateIdentity("b".to_string())));
    assert_eq!(list.identities(), vec!["a"]);
  }

  #[test]
  fn test_selection_wraps_and_clamps() {
    let mut list = RowList::new("Rows");
    list.select_next();
    assert_eq!(list.selected_index(), 0);

    list
      .set_items(vec![
        note("a", "1", NoteStatus::Draft, None),
        note("b", "2", NoteStatus::Draft, None),
        note("c", "3", NoteStatus::Draft, None),
      ])
      .unwrap();
    list.select_previous();
    assert_eq!(list.selected_index(), 2);
    list.select_next();
    assert_eq!(list.selected_index(), 0);

    list.select(2).unwrap();
    list.set_items(vec![note("a", "1", NoteStatus::Draft, None)]).unwrap();
    assert_eq!(list.selected_index(), 0);

    assert_eq!(list.select(5), Err(Error::RowOutOfBounds { index: 5, len: 1 }));
  }

  #[test]
  fn test_activate_selected_notifies_handler() {
    let recorder = Arc::new(Recorder::default());
    let mut list = RowList::new("Rows");
    list
      .set_items(vec![
        row_item(HeaderRow::fixed("Header".to_string(), "header")),
        note("row-7", "draft", NoteStatus::Draft, Some(handler_ref(&recorder))),
      ])
      .unwrap();

    assert!(!list.activate_selected());
    list.select_next();
    assert!(list.activate_selected());

    assert_eq!(*recorder.seen.lock().unwrap(), vec!["row-7".to_string()]);
  }

  #[test]
  fn test_activate_selected_with_released_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tally = Arc::new(Tally { calls: calls.clone() });
    let mut list = RowList::new("Rows");
    list.set_items(vec![note("row-7", "draft", NoteStatus::Draft, Some(handler_ref(&tally)))]).unwrap();
    drop(tally);

    assert!(list.activate_selected());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn test_rejected_view_keeps_previous_rows() {
    let mut list = RowList::new("Rows");
    list
      .set_items(vec![
        note("a", "1", NoteStatus::Draft, None),
        note("b", "2", NoteStatus::Draft, None),
        note("c", "3", NoteStatus::Draft, None),
      ])
      .unwrap();
    list.select(2).unwrap();

    let result = list.set_items(vec![mismatched("x")]);

    assert!(matches!(result, Err(Error::ViewTypeMismatch { ref identity, .. }) if identity == "x"));
    assert_eq!(list.identities(), vec!["a", "b", "c"]);
    assert_eq!(list.selected_index(), 2);
    assert_eq!(list.view_at::<NoteRow>(2).unwrap().title(), "3");
    assert_eq!(list.pooled_views(), 0);
  }

  #[test]
  fn test_rejected_view_restores_reconfigured_rows() {
    let mut list = RowList::new("Rows");
    list.set_items(vec![note("a", "before", NoteStatus::Draft, None), note("b", "2", NoteStatus::Draft, None)]).unwrap();

    let result = list.set_items(vec![note("a", "after", NoteStatus::Final, None), mismatched("b")]);

    assert!(result.is_err());
    assert_eq!(list.identities(), vec!["a", "b"]);
    let restored = list.view_at::<NoteRow>(0).unwrap();
    assert_eq!(restored.title(), "before");
    assert_eq!(restored.status(), NoteStatus::Draft);
    assert_eq!(list.view_at::<NoteRow>(1).unwrap().title(), "2");

    list.select_next();
    assert_eq!(list.selected_item().unwrap().identity(), "b");
  }

  #[test]
  fn test_activate_empty_list() {
    let list = RowList::new("Rows");
    assert!(!list.activate_selected());
  }

  #[test]
  fn test_render() {
    let mut list = RowList::new("Notes").with_highlight_symbol(">");
    list
      .set_items(vec![note("a", "alpha", NoteStatus::Draft, None), note("b", "beta", NoteStatus::Final, None)])
      .unwrap();
    list.select_next();

    let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
    terminal
      .draw(|f| {
        let area = f.area();
        list.render(f, area);
      })
      .unwrap();

    let buffer = terminal.backend().buffer();
    let line = |y: u16| (0..20).map(|x| buffer[(x, y)].symbol()).collect::<String>();
    assert_eq!(line(0), "┌Notes─────────────┐");
    assert_eq!(line(1), "│ alpha (draft)    │");
    assert_eq!(line(2), "│>beta (final)     │");
  }
}
