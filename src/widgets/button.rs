//! Button widget: a clickable button with a reactive label.
//!
//! Disabled buttons carry `disabled`, `aria-disabled="true"` and the
//! `disabled` class, and drop their click handler. The dark-mode capability
//! adds the `dark` class.

use std::any::Any;
use std::rc::Rc;

use crate::component::{Cx, DarkMode, RenderCx, Rendered, Widget};
use crate::event::{DomEvent, Handler};
use crate::reactive::Property;
use crate::vnode::el;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button.
///
/// # Examples
///
/// ```ignore
/// let count = Rc::new(Cell::new(0));
/// let id = tree.create(|cx| {
///     Button::new(cx, "Submit").with_on_click(move |_| count.set(count.get() + 1))
/// });
/// ```
pub struct Button {
    label: Property<String>,
    disabled: Property<bool>,
    dark: DarkMode,
    on_click: Option<Handler>,
}

impl Button {
    /// Create an enabled button with the given label.
    pub fn new(cx: &mut Cx<'_>, label: impl Into<String>) -> Self {
        Self {
            label: cx.property(label.into()),
            disabled: cx.property(false),
            dark: DarkMode::new(cx, false),
            on_click: None,
        }
    }

    /// Set the click handler (builder pattern).
    pub fn with_on_click(mut self, handler: impl Fn(&DomEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Set the initial disabled state (builder pattern).
    pub fn disabled(self, disabled: bool) -> Self {
        self.disabled.set(disabled);
        self
    }

    pub fn label(&self) -> &Property<String> {
        &self.label
    }

    pub fn disabled_state(&self) -> &Property<bool> {
        &self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn dark_mode(&self) -> &DarkMode {
        &self.dark
    }
}

impl Widget for Button {
    fn type_name(&self) -> &str {
        "Button"
    }

    fn render(&self, _cx: &RenderCx<'_>) -> Rendered {
        let disabled = self.disabled.get();
        let mut button = el("button")
            .attr("type", "button")
            .class("btn")
            .class_if(disabled, "disabled")
            .contribute(&self.dark)
            .aria("disabled", disabled.to_string())
            .attr_opt("disabled", disabled.then_some(""))
            .text(self.label.get());
        if let Some(handler) = self.on_click.as_ref().filter(|_| !disabled) {
            button = button.on_handler("click", Rc::clone(handler));
        }
        Ok(button)
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
    use crate::tree::{ComponentId, Tree};
    use crate::vnode::VNode;
    use std::cell::Cell;

    fn render(tree: &Tree, id: ComponentId) -> VNode {
        tree.widget::<Button>(id)
            .unwrap()
            .render(&RenderCx::new(id, &[]))
            .unwrap()
            .build()
    }

    #[test]
    fn enabled_button_markup() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Button::new(cx, "OK"));
        assert_eq!(
            render(&tree, id).to_html(),
            r#"<button aria-disabled="false" type="button" class="btn">OK</button>"#
        );
    }

    #[test]
    fn disabled_button_markup() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Button::new(cx, "OK").disabled(true));
        let node = render(&tree, id);
        let el = node.as_element().unwrap();
        assert!(el.has_class("disabled"));
        assert_eq!(el.attribute("aria-disabled"), Some("true"));
        assert_eq!(el.attribute("disabled"), Some(""));
    }

    #[test]
    fn click_handler_only_when_enabled() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut tree = Tree::new();
        let id = tree.create(|cx| {
            Button::new(cx, "Go").with_on_click(move |_| counter.set(counter.get() + 1))
        });

        let node = render(&tree, id);
        let events = node.as_element().unwrap().events();
        assert_eq!(events.len(), 1);
        events[0].call(&DomEvent::click());
        assert_eq!(clicks.get(), 1);

        tree.widget::<Button>(id).unwrap().disabled_state().set(true);
        assert!(render(&tree, id).as_element().unwrap().events().is_empty());
    }

    #[test]
    fn dark_mode_adds_class() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Button::new(cx, "OK"));
        tree.widget::<Button>(id).unwrap().dark_mode().set(true);
        assert!(render(&tree, id).as_element().unwrap().has_class("dark"));
    }

    #[test]
    fn label_is_reactive() {
        let mut tree = Tree::new();
        let id = tree.create(|cx| Button::new(cx, "Save"));
        tree.widget::<Button>(id).unwrap().label().set("Saved".into());
        assert_eq!(render(&tree, id).text_content(), "Saved");
        assert!(tree.scheduler().is_dirty(id));
    }
}
