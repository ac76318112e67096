use std::{
  any::{TypeId, type_name},
  fmt,
};

use super::selectable_item::{ConfigureFn, ViewFactory};
use crate::{
  components::traits::{
    row_item::RowItem,
    row_view::{AsAny, RowView},
  },
  error::Error,
};

/// A row that is drawn but never selected, such as a section header.
pub struct StaticItem<V, D> {
  data: D,
  identity: String,
  make_view: ViewFactory<V>,
  configure: ConfigureFn<V, D>,
}

impl<V, D> StaticItem<V, D>
where
  V: RowView,
  D: PartialEq + Send + Sync + 'static,
{
  pub fn new<F, C>(make_view: F, configure: C, data: D, identity: impl Into<String>) -> Self
  where
    F: Fn() -> V + Send + Sync + 'static,
    C: Fn(&mut V, &D) + Send + Sync + 'static,
  {
    StaticItem { data, identity: identity.into(), make_view: Box::new(make_view), configure: Box::new(configure) }
  }

  pub fn data(&self) -> &D {
    &self.data
  }

  pub fn identity(&self) -> &str {
    &self.identity
  }

  pub fn is_selectable(&self) -> bool {
    false
  }

  pub fn make_view(&self) -> V {
    (self.make_view)()
  }

  pub fn configure_view(&self, view: &mut V, _animated: bool) {
    (self.configure)(view, &self.data)
  }

  pub fn equals_for_diff(&self, other: &dyn RowItem) -> bool {
    other.as_any().downcast_ref::<Self>().is_some_and(|other| other.data == self.data)
  }
}

impl<V, D> RowItem for StaticItem<V, D>
where
  V: RowView,
  D: PartialEq + Send + Sync + 'static,
{
  fn identity(&self) -> &str {
    &self.identity
  }

  fn is_selectable(&self) -> bool {
    false
  }

  fn view_type(&self) -> TypeId {
    TypeId::of::<V>()
  }

  fn view_type_name(&self) -> &'static str {
    type_name::<V>()
  }

  fn make_view(&self) -> Box<dyn RowView> {
    Box::new(StaticItem::make_view(self))
  }

  fn configure_view(&self, view: &mut dyn RowView, animated: bool) -> Result<(), Error> {
    let found = (*view).concrete_type_name();
    match view.as_any_mut().downcast_mut::<V>() {
      Some(view) => {
        StaticItem::configure_view(self, view, animated);
        Ok(())
      },
      None => Err(Error::ViewTypeMismatch { identity: self.identity.clone(), expected: type_name::<V>(), found }),
    }
  }

  fn equals_for_diff(&self, other: &dyn RowItem) -> bool {
    StaticItem::equals_for_diff(self, other)
  }

  fn notify_selected(&self) {}
}

impl<V, D: fmt::Debug> fmt::Debug for StaticItem<V, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StaticItem")
      .field("identity", &self.identity)
      .field("view", &type_name::<V>())
      .field("data", &self.data)
      .finish()
  }
}
