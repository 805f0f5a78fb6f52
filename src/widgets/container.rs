//! Container widget: an element wrapping its child components.

use std::any::Any;

use crate::component::{RenderCx, Rendered, Widget};
use crate::vnode::el;

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// Renders its child components, in order, inside one element.
///
/// Children are managed through the tree (`append_child`, `reorder_children`,
/// ...); the container only decides the wrapping tag and classes.
///
/// # Examples
///
/// ```ignore
/// let list = tree.insert(Container::new().with_tag("ul").with_class("items"));
/// ```
#[derive(Debug, Clone)]
pub struct Container {
    tag: String,
    classes: Vec<String>,
}

impl Container {
    /// Create a `<div>` container.
    pub fn new() -> Self {
        Self {
            tag: "div".to_owned(),
            classes: Vec::new(),
        }
    }

    /// Create a container with the "vertical" CSS class.
    pub fn vertical() -> Self {
        Self::new().with_class("vertical")
    }

    /// Create a container with the "horizontal" CSS class.
    pub fn horizontal() -> Self {
        Self::new().with_class("horizontal")
    }

    /// Use a different element tag (builder pattern).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Add a CSS class (builder pattern).
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn type_name(&self) -> &str {
        "Container"
    }

    fn render(&self, cx: &RenderCx<'_>) -> Rendered {
        Ok(el(self.tag.as_str())
            .classes(self.classes.iter().map(String::as_str))
            .children(cx.children().iter().cloned()))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;
    use crate::vnode::VNode;

    fn render(container: &Container, children: &[VNode]) -> VNode {
        let mut tree = Tree::new();
        let id = tree.insert(Container::new());
        container
            .render(&RenderCx::new(id, children))
            .unwrap()
            .build()
    }

    #[test]
    fn empty_container_has_empty_child_list() {
        let node = render(&Container::new(), &[]);
        assert!(node.as_element().unwrap().children().is_empty());
        assert_eq!(node.to_html(), "<div></div>");
    }

    #[test]
    fn children_in_order() {
        let kids = [VNode::text("a"), VNode::text("b"), VNode::text("c")];
        let node = render(&Container::new(), &kids);
        assert_eq!(node.text_content(), "abc");
    }

    #[test]
    fn tag_and_classes() {
        let node = render(&Container::vertical().with_tag("ul").with_class("items"), &[]);
        assert_eq!(node.to_html(), r#"<ul class="vertical items"></ul>"#);
    }

    #[test]
    fn default_is_div() {
        assert_eq!(Container::default().tag(), "div");
        assert_eq!(Container::horizontal().type_name(), "Container");
    }
}
