//! Widget trait: render, mount/unmount hooks, capability mix-ins.
//!
//! A `Widget` is the behavior stored in one tree slot. It renders a pure
//! description of itself into an [`ElementBuilder`]; the tree merges the
//! component's chrome, stamps its key and caches the result. Capabilities such
//! as a dark-mode flag are small [`ClassContributor`] values a widget owns and
//! feeds to its builder.

use std::any::Any;

use super::context::Cx;
use crate::error::RenderError;
use crate::host::NodeHandle;
use crate::reactive::Property;
use crate::tree::ComponentId;
use crate::vnode::{ClassSet, ElementBuilder, VNode};

/// What a widget's builder returns.
pub type Rendered = Result<ElementBuilder, RenderError>;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every component.
///
/// `render` must be a pure function of the widget's properties and the
/// already-rendered children handed in through [`RenderCx`]: calling it twice
/// without intervening writes yields structurally equal nodes.
pub trait Widget: 'static {
    /// Human-readable type name, used in logs and debug output.
    fn type_name(&self) -> &str;

    /// Describe the element this component renders as.
    fn render(&self, cx: &RenderCx<'_>) -> Rendered;

    /// Called after the first reconcile that makes this component's element
    /// live in the host document.
    fn mounted(&mut self, _node: NodeHandle) {}

    /// Called when a reconcile replaced this component's live element with a
    /// new host node, e.g. because an ancestor changed its tag. By default
    /// the component unmounts from `old` and mounts on `new`.
    fn remounted(&mut self, _old: NodeHandle, new: NodeHandle) {
        self.unmounting();
        self.mounted(new);
    }

    /// Called once, before the component is detached, if it was mounted.
    fn unmounting(&mut self) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// RenderCx
// ---------------------------------------------------------------------------

/// Read-only context handed to [`Widget::render`].
pub struct RenderCx<'a> {
    id: ComponentId,
    children: &'a [VNode],
}

impl<'a> RenderCx<'a> {
    pub(crate) fn new(id: ComponentId, children: &'a [VNode]) -> Self {
        Self { id, children }
    }

    /// The component being rendered.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Rendered nodes of the child components, in child-list order.
    pub fn children(&self) -> &'a [VNode] {
        self.children
    }

    pub fn child(&self, index: usize) -> Option<&'a VNode> {
        self.children.get(index)
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A mixed-in capability that adds CSS classes to a widget's element.
pub trait ClassContributor {
    fn contribute(&self, classes: &mut ClassSet);
}

/// Dark-mode flag. Adds the `dark` class while enabled.
#[derive(Debug, Clone)]
pub struct DarkMode {
    enabled: Property<bool>,
}

impl DarkMode {
    pub fn new(cx: &mut Cx<'_>, enabled: bool) -> Self {
        Self {
            enabled: cx.property(enabled),
        }
    }

    pub fn enabled(&self) -> &Property<bool> {
        &self.enabled
    }

    pub fn set(&self, enabled: bool) -> bool {
        self.enabled.set(enabled)
    }
}

impl ClassContributor for DarkMode {
    fn contribute(&self, classes: &mut ClassSet) {
        classes.insert_if(self.enabled.get(), "dark");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;
    use crate::vnode::el;

    struct Panel {
        dark: DarkMode,
    }

    impl Widget for Panel {
        fn type_name(&self) -> &str {
            "Panel"
        }

        fn render(&self, cx: &RenderCx<'_>) -> Rendered {
            Ok(el("section")
                .class("panel")
                .contribute(&self.dark)
                .children(cx.children().iter().cloned()))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn dark_mode_contributes_class() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Panel {
            dark: DarkMode::new(cx, false),
        });
        let panel = tree.widget::<Panel>(id).unwrap();
        let off = panel.render(&RenderCx::new(id, &[])).unwrap().build();
        assert!(!off.as_element().unwrap().has_class("dark"));

        assert!(panel.dark.set(true));
        let on = panel.render(&RenderCx::new(id, &[])).unwrap().build();
        assert!(on.as_element().unwrap().has_class("dark"));
        assert!(on.as_element().unwrap().has_class("panel"));
    }

    #[test]
    fn dark_mode_write_queues_owner() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Panel {
            dark: DarkMode::new(cx, false),
        });
        tree.scheduler().take();
        tree.widget::<Panel>(id).unwrap().dark.set(true);
        assert!(tree.scheduler().is_dirty(id));
    }

    #[test]
    fn render_cx_exposes_children_in_order() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Panel {
            dark: DarkMode::new(cx, false),
        });
        let kids = [VNode::text("a"), VNode::text("b")];
        let cx = RenderCx::new(id, &kids);
        assert_eq!(cx.id(), id);
        assert_eq!(cx.child(1).and_then(VNode::as_text), Some("b"));
        assert!(cx.child(2).is_none());
        let node = tree.widget::<Panel>(id).unwrap().render(&cx).unwrap().build();
        assert_eq!(node.text_content(), "ab");
    }
}
