use std::{any::TypeId, collections::HashMap};

use crate::components::traits::row_view::RowView;

/// Detached views waiting to be reused, keyed by view type.
#[derive(Default)]
pub struct ViewPool {
  views: HashMap<TypeId, Vec<Box<dyn RowView>>>,
}

impl ViewPool {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn enqueue(&mut self, view_type: TypeId, view: Box<dyn RowView>) {
    self.views.entry(view_type).or_default().push(view);
  }

  /// Takes the most recently enqueued view of `view_type`, if any.
  pub fn dequeue(&mut self, view_type: TypeId) -> Option<Box<dyn RowView>> {
    self.views.get_mut(&view_type).and_then(Vec::pop)
  }

  pub fn len(&self) -> usize {
    self.views.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn clear(&mut self) {
    self.views.clear();
  }
}

impl std::fmt::Debug for ViewPool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ViewPool").field("len", &self.len()).finish()
  }
}
