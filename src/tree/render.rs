//! Rendering components into virtual nodes.
//!
//! A render pass owns the batch taken from the scheduler. Rendering a
//! component first collects its children's nodes: children still pending in
//! the batch, or never rendered, are rendered in place (and removed from the
//! batch); clean children contribute their cached node unchanged. The widget's
//! element is then merged with the component's chrome, stamped with its key
//! and cached, and the new node is spliced into every ancestor's cache so the
//! caches keep mirroring what the host shows.

use indexmap::IndexSet;
use tracing::{error, trace};

use super::node::ComponentId;
use super::tree::Tree;
use crate::component::RenderCx;
use crate::error::RenderError;
use crate::host::NodeHandle;
use crate::vnode::{el, VNode};

/// Bookkeeping for one flush.
#[derive(Debug, Default)]
pub(crate) struct RenderPass {
    pending: IndexSet<ComponentId>,
    pub(crate) rendered: Vec<ComponentId>,
    pub(crate) errors: Vec<RenderError>,
}

impl RenderPass {
    pub(crate) fn new(pending: IndexSet<ComponentId>) -> Self {
        Self {
            pending,
            ..Self::default()
        }
    }

    /// Next id in first-dirty order.
    pub(crate) fn next(&mut self) -> Option<ComponentId> {
        self.pending.shift_remove_index(0)
    }
}

/// Result of re-rendering one component.
#[derive(Debug)]
pub(crate) struct Rerender {
    /// The component's node before this pass.
    pub(crate) previous: Option<VNode>,
    pub(crate) node: VNode,
    /// Where the component is realized, if it has been mounted.
    pub(crate) live: Option<NodeHandle>,
}

impl Tree {
    /// Render `id` (and whatever in its subtree needs it) and splice the
    /// result into the cached nodes of its ancestors.
    pub(crate) fn render_subtree(&mut self, id: ComponentId, pass: &mut RenderPass) -> Rerender {
        let previous = self.vnode(id).cloned();
        let node = self.render_component(id, pass);

        let key = id.vkey();
        for ancestor in self.ancestors(id) {
            if let Some(slot) = self.slots.get_mut(ancestor) {
                let spliced = slot
                    .cached
                    .as_ref()
                    .and_then(|cached| cached.replace_keyed(key, &node));
                if spliced.is_some() {
                    slot.cached = spliced;
                }
            }
        }

        Rerender {
            previous,
            node,
            live: self.live_node(id),
        }
    }

    fn render_component(&mut self, id: ComponentId, pass: &mut RenderPass) -> VNode {
        let kids = self.children(id).to_vec();
        let mut child_nodes = Vec::with_capacity(kids.len());
        for child in kids {
            let stale = pass.pending.shift_remove(&child);
            let cached = if stale { None } else { self.vnode(child).cloned() };
            let node = match cached {
                Some(node) => node,
                None => self.render_component(child, pass),
            };
            child_nodes.push(node);
        }

        let Some(slot) = self.slots.get(id) else {
            return placeholder(id);
        };
        let result = match slot.widget.as_ref() {
            Some(widget) => widget.render(&RenderCx::new(id, &child_nodes)),
            None => Err(RenderError::new("component has no widget")),
        };

        let node = match result {
            Ok(builder) => {
                let node = builder.with_chrome(&slot.chrome).key(id.vkey()).build();
                trace!(?id, widget = %slot.type_name, "rendered");
                self.lifecycle.on_render(id);
                pass.rendered.push(id);
                node
            }
            Err(err) => {
                let err = err.for_component(id);
                error!(?id, widget = %slot.type_name, error = %err, "render failed");
                // Children rendered above still show up under the old node.
                let fallback = match slot.cached.clone() {
                    Some(cached) => child_nodes.iter().fold(cached, |node, child| {
                        child
                            .key()
                            .and_then(|key| node.replace_keyed(key, child))
                            .unwrap_or(node)
                    }),
                    None => placeholder(id),
                };
                pass.errors.push(err);
                fallback
            }
        };

        if let Some(slot) = self.slots.get_mut(id) {
            slot.cached = Some(node.clone());
        }
        node
    }
}

/// Stand-in for a component whose first render failed. Keyed, so a later
/// successful render replaces it in place.
fn placeholder(id: ComponentId) -> VNode {
    el("template").key(id.vkey()).build()
}
