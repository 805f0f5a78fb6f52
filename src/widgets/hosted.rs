//! Hosted widget: a component wrapping an external widget library.
//!
//! Third-party widgets (charts, maps, pickers) are created on a live host
//! node after mount and torn down before unmount. A [`WidgetAdapter`] is the
//! typed interface to one such library; [`Hosted`] drives it from the
//! component lifecycle so the untyped interop stays inside the adapter.

use std::any::Any;

use tracing::debug;

use crate::component::{RenderCx, Rendered, Widget};
use crate::host::NodeHandle;
use crate::vnode::el;

/// Typed binding to one external widget library.
pub trait WidgetAdapter: 'static {
    /// Construction options understood by the library.
    type Options: 'static;
    /// Handle to a live library widget.
    type Instance: 'static;

    /// Tag of the element the library widget is created on.
    const TAG: &'static str = "div";

    /// Library name, used as the component type name.
    fn name(&self) -> &str;

    /// Create a library widget on the live node.
    fn create(&mut self, node: NodeHandle, options: &Self::Options) -> Self::Instance;

    /// Destroy a library widget.
    fn destroy(&mut self, instance: Self::Instance);
}

/// A component whose content is owned by an external library.
pub struct Hosted<A: WidgetAdapter> {
    adapter: A,
    options: A::Options,
    instance: Option<A::Instance>,
}

impl<A: WidgetAdapter> Hosted<A> {
    pub fn new(adapter: A, options: A::Options) -> Self {
        Self {
            adapter,
            options,
            instance: None,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn options(&self) -> &A::Options {
        &self.options
    }

    /// The live library widget, between mount and unmount.
    pub fn instance(&self) -> Option<&A::Instance> {
        self.instance.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }
}

impl<A: WidgetAdapter> Widget for Hosted<A> {
    fn type_name(&self) -> &str {
        self.adapter.name()
    }

    fn render(&self, _cx: &RenderCx<'_>) -> Rendered {
        Ok(el(A::TAG)
            .class("hosted")
            .attr("data-widget", self.adapter.name()))
    }

    fn mounted(&mut self, node: NodeHandle) {
        if self.instance.is_none() {
            debug!(widget = self.adapter.name(), ?node, "creating hosted widget");
            self.instance = Some(self.adapter.create(node, &self.options));
        }
    }

    fn unmounting(&mut self) {
        if let Some(instance) = self.instance.take() {
            debug!(widget = self.adapter.name(), "destroying hosted widget");
            self.adapter.destroy(instance);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
