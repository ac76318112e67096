pub mod configurable;
pub mod row_item;
pub mod row_view;
pub mod selection_handler;
