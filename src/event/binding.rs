//! Event bindings carried by virtual nodes.
//!
//! A binding pairs an event name with a shared handler closure. Bindings take
//! part in structural equality by name only: two renders that create fresh
//! closures for the same events produce equal virtual nodes.

use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

use super::dom_event::DomEvent;

/// Shared event handler.
pub type Handler = Rc<dyn Fn(&DomEvent)>;

/// An event name bound to a handler.
#[derive(Clone)]
pub struct EventBinding {
    event: String,
    handler: Handler,
}

impl EventBinding {
    /// Bind `handler` to events named `event`.
    pub fn new(event: impl Into<String>, handler: impl Fn(&DomEvent) + 'static) -> Self {
        Self {
            event: event.into(),
            handler: Rc::new(handler),
        }
    }

    /// Bind an already shared handler.
    pub fn from_handler(event: impl Into<String>, handler: Handler) -> Self {
        Self {
            event: event.into(),
            handler,
        }
    }

    /// The event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// A clone of the shared handler.
    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }

    /// Whether this binding handles events of `kind`.
    pub fn matches(&self, kind: &str) -> bool {
        self.event == kind
    }

    /// Invoke the handler.
    pub fn call(&self, event: &DomEvent) {
        (self.handler)(event)
    }
}

impl PartialEq for EventBinding {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event
    }
}

impl Eq for EventBinding {}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventBinding({:?})", self.event)
    }
}

impl Serialize for EventBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn call_invokes_handler() {
        let hits = Rc::new(Cell::new(0));
        let hits_c = hits.clone();
        let binding = EventBinding::new("click", move |_| hits_c.set(hits_c.get() + 1));
        binding.call(&DomEvent::click());
        binding.call(&DomEvent::click());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn equality_ignores_closure_identity() {
        let a = EventBinding::new("click", |_| {});
        let b = EventBinding::new("click", |_| {});
        let c = EventBinding::new("input", |_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn matches_by_name() {
        let binding = EventBinding::new("input", |_| {});
        assert!(binding.matches("input"));
        assert!(!binding.matches("click"));
    }

    #[test]
    fn debug_shows_event_name() {
        let binding = EventBinding::new("click", |_| {});
        assert_eq!(format!("{binding:?}"), "EventBinding(\"click\")");
    }

    #[test]
    fn serializes_as_name() {
        let binding = EventBinding::new("click", |_| {});
        assert_eq!(serde_json::to_string(&binding).unwrap(), "\"click\"");
    }
}
