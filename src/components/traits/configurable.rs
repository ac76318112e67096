use super::{row_view::RowView, selection_handler::HandlerRef};
use crate::components::items::{SelectableItem, StaticItem};

/// A view that knows how to apply its own data.
///
/// Implementors get descriptor constructors for free, so call sites only name
/// the view type, the data and the identity.
pub trait Configurable: RowView + Sized {
  type Data: PartialEq + Send + Sync + 'static;

  fn configure(view: &mut Self, data: &Self::Data);

  /// Descriptor whose views come from `builder`.
  fn selectable_with<B>(
    builder: B,
    data: Self::Data,
    handler: Option<HandlerRef>,
    identity: impl Into<String>,
  ) -> SelectableItem<Self, Self::Data>
  where
    B: Fn() -> Self + Send + Sync + 'static,
  {
    SelectableItem::new(builder, Self::configure, data, handler, identity)
  }

  /// Descriptor whose views come from `Default`.
  fn selectable(
    data: Self::Data,
    handler: Option<HandlerRef>,
    identity: impl Into<String>,
  ) -> SelectableItem<Self, Self::Data>
  where
    Self: Default,
  {
    Self::selectable_with(Self::default, data, handler, identity)
  }

  /// Non-selectable descriptor whose views come from `Default`.
  fn fixed(data: Self::Data, identity: impl Into<String>) -> StaticItem<Self, Self::Data>
  where
    Self: Default,
  {
    StaticItem::new(Self::default, Self::configure, data, identity)
  }
}
