use std::sync::{Arc, Weak};

/// Receives the identity of a row the user picked.
pub trait SelectionHandler: Send + Sync {
  fn did_select(&self, identity: &str);
}

/// Non-owning reference to a selection handler, as held by row descriptors.
pub type HandlerRef = Weak<dyn SelectionHandler>;

/// Downgrades a shared handler into the reference descriptors hold.
pub fn handler_ref<H: SelectionHandler + 'static>(handler: &Arc<H>) -> HandlerRef {
  let weak: Weak<H> = Arc::downgrade(handler);
  weak
}
