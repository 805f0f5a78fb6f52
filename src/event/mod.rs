//! DOM events and the handler bindings attached to virtual nodes.

pub mod binding;
pub mod dom_event;

pub use binding::{EventBinding, Handler};
pub use dom_event::DomEvent;
