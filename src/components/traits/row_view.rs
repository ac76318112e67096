use std::any::{Any, type_name};

use ratatui::widgets::ListItem;

/// Gives access to the concrete type behind a trait object.
pub trait AsAny: Any {
  fn as_any(&self) -> &dyn Any;

  fn as_any_mut(&mut self) -> &mut dyn Any;

  fn concrete_type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
  fn as_any(&self) -> &dyn Any {
    self
  }

  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }

  fn concrete_type_name(&self) -> &'static str {
    type_name::<T>()
  }
}

/// A view a list host can draw as one row.
pub trait RowView: AsAny + Send {
  /// Renders the view's current state as a `ratatui::widgets::ListItem`.
  fn render(&self) -> ListItem<'_>;
}
