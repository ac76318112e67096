mod selectable_item;
mod static_item;

pub use selectable_item::SelectableItem;
pub use static_item::StaticItem;
