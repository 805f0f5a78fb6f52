//! Error taxonomy: configuration, lifecycle, render, reconcile.
//!
//! Configuration and lifecycle errors are raised synchronously at the call
//! site. Render errors are produced inside a flush and reported per component
//! through [`FlushReport`](crate::runtime::FlushReport); they never abort the
//! rest of the batch.

use thiserror::Error;

use crate::host::NodeHandle;
use crate::tree::ComponentId;

/// Mounting and root-binding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No container with this id exists in the host document.
    #[error("no container with id `{0}` exists in the document")]
    NotFound(String),
    /// Another root already owns this container.
    #[error("container `{0}` is already owned by a mounted root")]
    AlreadyMounted(String),
    /// `unmount` was called for a container that has no root.
    #[error("container `{0}` has no mounted root")]
    NotMounted(String),
}

/// Misuse of the component tree or of a component's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The component reached the terminal `Detached` state.
    #[error("component {0:?} is detached and cannot be added to a tree again")]
    Detached(ComponentId),
    /// The id is not (or no longer) present in the tree arena.
    #[error("component {0:?} does not exist in this tree")]
    UnknownComponent(ComponentId),
    /// The component already has a parent; remove it first.
    #[error("component {child:?} already has parent {parent:?}")]
    AlreadyParented { child: ComponentId, parent: ComponentId },
    /// The component is already attached as the root of a container.
    #[error("component {0:?} is already attached")]
    AlreadyAttached(ComponentId),
    /// Adding the child would make a component its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: ComponentId, child: ComponentId },
    /// The component is not a child of the given parent.
    #[error("component {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ComponentId, child: ComponentId },
    /// A child index was outside the parent's child list.
    #[error("index {index} is out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A reorder request was not a permutation of the current children.
    #[error("new child order for {0:?} is not a permutation of its children")]
    InvalidOrder(ComponentId),
}

/// A component's builder failed to produce a virtual node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render of {component:?} failed: {message}")]
pub struct RenderError {
    /// The component whose builder failed. Filled in by the tree when the
    /// widget reports the error without it.
    pub component: Option<ComponentId>,
    pub message: String,
}

impl RenderError {
    /// Create a render error with a message. The tree attaches the component id.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            component: None,
            message: message.into(),
        }
    }

    pub(crate) fn for_component(mut self, id: ComponentId) -> Self {
        if self.component.is_none() {
            self.component = Some(id);
        }
        self
    }
}

/// Failures reported by a [`Reconciler`](crate::host::Reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The handle does not refer to a live node.
    #[error("node handle {0:?} does not refer to a live node")]
    StaleHandle(NodeHandle),
    /// A patch target was a text node where an element was required.
    #[error("node {0:?} cannot hold children")]
    NotAnElement(NodeHandle),
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
