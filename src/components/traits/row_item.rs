use std::{any::TypeId, sync::Arc};

use super::row_view::{AsAny, RowView};
use crate::error::Error;

/// Type-erased contract a list host drives each row through.
///
/// Hosts keep rows of different view/data pairings side by side as
/// [`DynRowItem`]s and never see the concrete descriptor types.
pub trait RowItem: AsAny + Send + Sync {
  /// Token matching this row across list regenerations.
  fn identity(&self) -> &str;

  fn is_selectable(&self) -> bool;

  /// Type of the view this row builds. Hosts use it as the reuse key.
  fn view_type(&self) -> TypeId;

  fn view_type_name(&self) -> &'static str;

  /// Builds a fresh, unconfigured view.
  fn make_view(&self) -> Box<dyn RowView>;

  /// Applies this row's data to `view`.
  ///
  /// Fails with [`Error::ViewTypeMismatch`] if `view` was not built for this
  /// row's view type.
  fn configure_view(&self, view: &mut dyn RowView, animated: bool) -> Result<(), Error>;

  /// Whether `other` would render identically to this row.
  fn equals_for_diff(&self, other: &dyn RowItem) -> bool;

  fn notify_selected(&self);
}

pub type DynRowItem = Arc<dyn RowItem>;

/// Wraps a concrete descriptor for storage in a host.
pub fn row_item<I: RowItem + 'static>(item: I) -> DynRowItem {
  Arc::new(item)
}
