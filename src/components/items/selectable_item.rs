use std::{
  any::{TypeId, type_name},
  fmt,
};

use tracing::trace;

use crate::{
  components::traits::{
    row_item::RowItem,
    row_view::{AsAny, RowView},
    selection_handler::{HandlerRef, SelectionHandler},
  },
  error::Error,
};

pub type ViewFactory<V> = Box<dyn Fn() -> V + Send + Sync>;
pub type ConfigureFn<V, D> = Box<dyn Fn(&mut V, &D) + Send + Sync>;

/// Describes one selectable row: its data, how to build a view for it, how to
/// apply the data to that view, and who to tell when the row is picked.
///
/// Descriptors are immutable. To change a row's content, build a new
/// descriptor with the same identity and hand the new list to the host.
pub struct SelectableItem<V, D> {
  data: D,
  identity: String,
  make_view: ViewFactory<V>,
  configure: ConfigureFn<V, D>,
  handler: Option<HandlerRef>,
}

impl<V, D> SelectableItem<V, D>
where
  V: RowView,
  D: PartialEq + Send + Sync + 'static,
{
  pub fn new<F, C>(make_view: F, configure: C, data: D, handler: Option<HandlerRef>, identity: impl Into<String>) -> Self
  where
    F: Fn() -> V + Send + Sync + 'static,
    C: Fn(&mut V, &D) + Send + Sync + 'static,
  {
    SelectableItem {
      data,
      identity: identity.into(),
      make_view: Box::new(make_view),
      configure: Box::new(configure),
      handler,
    }
  }

  pub fn data(&self) -> &D {
    &self.data
  }

  pub fn identity(&self) -> &str {
    &self.identity
  }

  pub fn is_selectable(&self) -> bool {
    true
  }

  /// Calls the view factory. Nothing is cached, every call builds a new view.
  pub fn make_view(&self) -> V {
    (self.make_view)()
  }

  /// Applies this descriptor's data to `view`. `animated` is accepted for
  /// parity with other row kinds and has no effect here.
  pub fn configure_view(&self, view: &mut V, _animated: bool) {
    (self.configure)(view, &self.data)
  }

  /// Tells the selection handler, if it is still alive, that this row was picked.
  pub fn notify_selected(&self) {
    match self.handler.as_ref().map(|handler| handler.upgrade()) {
      Some(Some(handler)) => handler.did_select(&self.identity),
      Some(None) => trace!("selection handler for '{}' was dropped, ignoring selection", self.identity),
      None => {},
    }
  }

  /// True only for a descriptor of the same view/data pairing holding equal data.
  pub fn equals_for_diff(&self, other: &dyn RowItem) -> bool {
    other.as_any().downcast_ref::<Self>().is_some_and(|other| other.data == self.data)
  }
}

impl<V, D> RowItem for SelectableItem<V, D>
where
  V: RowView,
  D: PartialEq + Send + Sync + 'static,
{
  fn identity(&self) -> &str {
    &self.identity
  }

  fn is_selectable(&self) -> bool {
    true
  }

  fn view_type(&self) -> TypeId {
    TypeId::of::<V>()
  }

  fn view_type_name(&self) -> &'static str {
    type_name::<V>()
  }

  fn make_view(&self) -> Box<dyn RowView> {
    Box::new(SelectableItem::make_view(self))
  }

  fn configure_view(&self, view: &mut dyn RowView, animated: bool) -> Result<(), Error> {
    let found = (*view).concrete_type_name();
    match view.as_any_mut().downcast_mut::<V>() {
      Some(view) => {
        SelectableItem::configure_view(self, view, animated);
        Ok(())
      },
      None => Err(Error::ViewTypeMismatch { identity: self.identity.clone(), expected: type_name::<V>(), found }),
    }
  }

  fn equals_for_diff(&self, other: &dyn RowItem) -> bool {
    SelectableItem::equals_for_diff(self, other)
  }

  fn notify_selected(&self) {
    SelectableItem::notify_selected(self)
  }
}

impl<V, D: fmt::Debug> fmt::Debug for SelectableItem<V, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SelectableItem")
      .field("identity", &self.identity)
      .field("view", &type_name::<V>())
      .field("data", &self.data)
      .field("has_handler", &self.handler.as_ref().is_some_and(|handler| handler.strong_count() > 0))
      .finish()
  }
}
