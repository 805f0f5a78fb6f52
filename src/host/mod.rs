//! Reconciler boundary.
//!
//! The runtime never touches a document directly. It hands virtual nodes to a
//! [`Reconciler`], which realizes them in some host (a browser DOM, a test
//! double, a string buffer) and reports back opaque [`NodeHandle`]s.
//!
//! - [`Reconciler`]: the trait a host implements.
//! - [`MemoryDom`]: headless in-memory host with a mutation log.

pub mod memory;

use serde::Serialize;

use crate::error::ReconcileError;
use crate::event::DomEvent;
use crate::vnode::{VKey, VNode};

pub use memory::{MemoryDom, Mutation};

/// Opaque reference to a node realized by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Wrap a host-specific raw id.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where a patch puts its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// Append as the last child of a container (first mount of a root).
    Append(NodeHandle),
    /// Update, or replace, the node that currently realizes the component.
    Replace(NodeHandle),
}

/// Outcome of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// The node now realizing the patched tree's root.
    pub node: NodeHandle,
    /// Live node of every keyed element in the patched subtree, pre-order.
    pub components: Vec<(VKey, NodeHandle)>,
}

/// A host that can realize virtual nodes.
pub trait Reconciler {
    /// Look up a container by its id attribute.
    fn container(&self, id: &str) -> Option<NodeHandle>;

    /// Bring the host in line with `next`.
    ///
    /// `previous` is the node last realized at `mount`, or `None` for a full
    /// mount. Keyed elements must be matched by key so reordered components
    /// keep their live nodes.
    fn patch(
        &mut self,
        previous: Option<&VNode>,
        next: &VNode,
        mount: Mount,
    ) -> Result<Patched, ReconcileError>;

    /// Remove a realized node and its subtree.
    fn remove(&mut self, node: NodeHandle) -> Result<(), ReconcileError>;

    /// Deliver `event` to `target`, bubbling to its ancestors until a handler
    /// stops propagation. Returns how many handlers ran.
    fn dispatch(&self, target: NodeHandle, event: &DomEvent) -> Result<usize, ReconcileError>;

    /// Set the document title.
    fn set_title(&mut self, _title: &str) {}
}
