//! Input widget: a text field bound to a property.
//!
//! The field's `input` events write the event value back into the property,
//! so the next flush re-renders the field with the new value.

use std::any::Any;

use crate::component::{Cx, RenderCx, Rendered, Widget};
use crate::reactive::Property;
use crate::vnode::el;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A text input with placeholder and password support.
///
/// # Examples
///
/// ```ignore
/// let id = tree.create(|cx| {
///     Input::new(cx)
///         .with_placeholder("Enter your name...")
///         .with_password(false)
/// });
/// ```
#[derive(Debug)]
pub struct Input {
    value: Property<String>,
    placeholder: String,
    password: bool,
}

impl Input {
    /// Create an empty input.
    pub fn new(cx: &mut Cx<'_>) -> Self {
        Self::with_value(cx, "")
    }

    /// Create an input holding `value`.
    pub fn with_value(cx: &mut Cx<'_>, value: impl Into<String>) -> Self {
        Self {
            value: cx.property(value.into()),
            placeholder: String::new(),
            password: false,
        }
    }

    /// Set the placeholder text (builder pattern).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable or disable password masking (builder pattern).
    pub fn with_password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn value(&self) -> &Property<String> {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_password(&self) -> bool {
        self.password
    }
}

impl Widget for Input {
    fn type_name(&self) -> &str {
        "Input"
    }

    fn render(&self, _cx: &RenderCx<'_>) -> Rendered {
        let value = self.value.clone();
        Ok(el("input")
            .attr("type", if self.password { "password" } else { "text" })
            .attr("value", self.value.get())
            .attr_opt(
                "placeholder",
                (!self.placeholder.is_empty()).then_some(self.placeholder.as_str()),
            )
            .on("input", move |event| {
                if let Some(text) = event.value() {
                    value.set(text.to_owned());
                }
            }))
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
    use crate::event::DomEvent;
    use crate::tree::{ComponentId, Tree};
    use crate::vnode::VNode;

    fn render(tree: &Tree, id: ComponentId) -> VNode {
        tree.widget::<Input>(id)
            .unwrap()
            .render(&RenderCx::new(id, &[]))
            .unwrap()
            .build()
    }

    #[test]
    fn renders_void_input() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Input::with_value(cx, "Alice").with_placeholder("Name"));
        assert_eq!(
            render(&tree, id).to_html(),
            r#"<input placeholder="Name" type="text" value="Alice">"#
        );
    }

    #[test]
    fn password_type() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Input::new(cx).with_password(true));
        let node = render(&tree, id);
        assert_eq!(node.as_element().unwrap().attribute("type"), Some("password"));
        assert!(node.as_element().unwrap().attribute("placeholder").is_none());
    }

    #[test]
    fn input_event_writes_value() {
        let mut tree = Tree::new();
        let id = tree.create(Input::new);
        let node = render(&tree, id);
        node.as_element().unwrap().events()[0].call(&DomEvent::input("typed"));

        let input = tree.widget::<Input>(id).unwrap();
        assert_eq!(input.value().get(), "typed");
        assert!(tree.scheduler().is_dirty(id));
    }
}
