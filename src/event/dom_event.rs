//! DOM event values delivered to handlers.
//!
//! A [`DomEvent`] is created by the caller with a kind (`"click"`, `"input"`)
//! and an optional value, then stamped with its target by the host when it is
//! dispatched. Handlers may stop bubbling with [`DomEvent::stop_propagation`].

use std::cell::Cell;

use crate::host::NodeHandle;

/// An event travelling from a target node up through its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    kind: String,
    value: Option<String>,
    target: Option<NodeHandle>,
    current_target: Cell<Option<NodeHandle>>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    /// Create an event of the given kind with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
            target: None,
            current_target: Cell::new(None),
            propagation_stopped: Cell::new(false),
        }
    }

    /// A `click` event.
    pub fn click() -> Self {
        Self::new("click")
    }

    /// An `input` event carrying the control's new value.
    pub fn input(value: impl Into<String>) -> Self {
        Self::new("input").with_value(value)
    }

    /// Attach a value payload (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Stamp the node the event was dispatched on.
    pub(crate) fn with_target(mut self, target: NodeHandle) -> Self {
        self.target = Some(target);
        self
    }

    pub(crate) fn set_current_target(&self, node: NodeHandle) {
        self.current_target.set(Some(node));
    }

    /// Event kind, e.g. `"click"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Payload value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> Option<NodeHandle> {
        self.target
    }

    /// The node whose handler is currently running.
    pub fn current_target(&self) -> Option<NodeHandle> {
        self.current_target.get()
    }

    /// Stop the event from bubbling past the current node.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether a handler stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}
