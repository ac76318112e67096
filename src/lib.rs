//! Closure-driven row descriptors and a small list host for ratatui.
//!
//! A [`SelectableItem`] bundles a row's data with the closures that build and
//! configure its view. Hosts such as [`RowList`] keep descriptors as
//! [`DynRowItem`]s and drive them on demand.

pub mod components;
pub mod error;

pub use components::{
  items::{SelectableItem, StaticItem},
  shared::{Changeset, RowList, ViewPool},
  traits::{
    configurable::Configurable,
    row_item::{DynRowItem, RowItem, row_item},
    row_view::{AsAny, RowView},
    selection_handler::{HandlerRef, SelectionHandler, handler_ref},
  },
};
pub use error::Error;
