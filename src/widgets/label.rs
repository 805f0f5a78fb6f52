//! Label widget: a span of reactive text.

use std::any::Any;

use crate::component::{Cx, RenderCx, Rendered, Widget};
use crate::reactive::Property;
use crate::vnode::el;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Displays a single text property.
///
/// # Examples
///
/// ```ignore
/// let id = tree.create(|cx| Label::new(cx, "Hello world!"));
/// tree.widget::<Label>(id).unwrap().set_text("Bye");
/// ```
#[derive(Debug)]
pub struct Label {
    text: Property<String>,
}

impl Label {
    pub fn new(cx: &mut Cx<'_>, text: impl Into<String>) -> Self {
        Self {
            text: cx.property(text.into()),
        }
    }

    /// The text property. Clone it to write from outside the tree.
    pub fn text(&self) -> &Property<String> {
        &self.text
    }

    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.text.set(text.into())
    }
}

impl Widget for Label {
    fn type_name(&self) -> &str {
        "Label"
    }

    fn render(&self, _cx: &RenderCx<'_>) -> Rendered {
        Ok(el("span").class("label").text(self.text.get()))
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

    fn render(tree: &Tree, id: crate::tree::ComponentId) -> crate::vnode::VNode {
        tree.widget::<Label>(id)
            .unwrap()
            .render(&RenderCx::new(id, &[]))
            .unwrap()
            .build()
    }

    #[test]
    fn renders_span_with_text() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Label::new(cx, "Hello world!"));
        assert_eq!(render(&tree, id).to_html(), r#"<span class="label">Hello world!</span>"#);
    }

    #[test]
    fn set_text_changes_output() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Label::new(cx, "a"));
        assert!(tree.widget::<Label>(id).unwrap().set_text("b"));
        assert!(!tree.widget::<Label>(id).unwrap().set_text("b"));
        assert_eq!(render(&tree, id).text_content(), "b");
    }

    #[test]
    fn markup_in_text_is_escaped_on_output() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Label::new(cx, "<em>"));
        let node = render(&tree, id);
        assert_eq!(node.text_content(), "<em>");
        assert_eq!(node.to_html(), r#"<span class="label">&lt;em&gt;</span>"#);
    }
}
