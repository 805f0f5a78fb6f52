//! Fluent element builder.
//!
//! Widgets describe their output with [`el`] and chain class, attribute,
//! style, handler and child contributions before calling
//! [`build`](ElementBuilder::build):
//!
//! ```ignore
//! use reactree::vnode::el;
//!
//! let node = el("button")
//!     .class("btn")
//!     .class_if(disabled, "disabled")
//!     .aria("disabled", disabled.to_string())
//!     .on("click", |_| println!("clicked"))
//!     .text("OK")
//!     .build();
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use super::class_set::ClassSet;
use super::node::{VElement, VKey, VNode};
use crate::component::ClassContributor;
use crate::event::{DomEvent, EventBinding, Handler};
use crate::tree::Chrome;

/// Start building an element with the given tag.
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder::new(tag)
}

/// A text leaf.
pub fn text(text: impl Into<String>) -> VNode {
    VNode::text(text)
}

/// Accumulates the parts of one element.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    key: Option<VKey>,
    attributes: BTreeMap<String, String>,
    classes: ClassSet,
    styles: BTreeMap<String, String>,
    events: Vec<EventBinding>,
    children: Vec<VNode>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attributes: BTreeMap::new(),
            classes: ClassSet::new(),
            styles: BTreeMap::new(),
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the reconciliation key.
    pub fn key(mut self, key: VKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set an attribute. `class` and `style` are routed to the class set and
    /// style map so they merge with other contributions.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "class" => {
                self.classes.insert(&value);
            }
            "style" => {
                for declaration in value.split(';') {
                    if let Some((prop, val)) = declaration.split_once(':') {
                        let (prop, val) = (prop.trim(), val.trim());
                        if !prop.is_empty() {
                            self.styles.insert(prop.to_owned(), val.to_owned());
                        }
                    }
                }
            }
            _ => {
                self.attributes.insert(name, value);
            }
        }
        self
    }

    /// Set an attribute only when `value` is `Some`.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set an ARIA attribute: `aria("label", "Close")` sets `aria-label`.
    pub fn aria(self, name: &str, value: impl Into<String>) -> Self {
        self.attr(format!("aria-{name}"), value)
    }

    /// Add a CSS class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class);
        self
    }

    /// Add a CSS class when `condition` holds.
    pub fn class_if(mut self, condition: bool, class: &str) -> Self {
        self.classes.insert_if(condition, class);
        self
    }

    /// Add several CSS classes.
    pub fn classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        for class in classes {
            self.classes.insert(class);
        }
        self
    }

    /// Let a mixed-in capability add its classes.
    pub fn contribute(mut self, contributor: &dyn ClassContributor) -> Self {
        contributor.contribute(&mut self.classes);
        self
    }

    /// Set an inline style declaration.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Bind a handler to an event.
    pub fn on(mut self, event: impl Into<String>, handler: impl Fn(&DomEvent) + 'static) -> Self {
        self.events.push(EventBinding::new(event, handler));
        self
    }

    /// Bind an already shared handler.
    pub fn on_handler(mut self, event: impl Into<String>, handler: Handler) -> Self {
        self.events.push(EventBinding::from_handler(event, handler));
        self
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children in order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(VNode::text(text));
        self
    }

    /// Merge component-level chrome. Chrome set by application code wins over
    /// the widget's own attributes and styles; classes and handlers accumulate.
    pub(crate) fn with_chrome(mut self, chrome: &Chrome) -> Self {
        self.classes.extend(chrome.classes());
        for (name, value) in chrome.attributes() {
            self.attributes.insert(name.clone(), value.clone());
        }
        for (prop, value) in chrome.styles() {
            self.styles.insert(prop.clone(), value.clone());
        }
        self.events.extend(chrome.events().iter().cloned());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Finish as an element.
    pub fn build_element(self) -> VElement {
        VElement {
            tag: self.tag,
            key: self.key,
            attributes: self.attributes,
            classes: self.classes,
            styles: self.styles,
            events: self.events,
            children: self.children,
        }
    }

    /// Finish as a node.
    pub fn build(self) -> VNode {
        VNode::Element(Rc::new(self.build_element()))
    }
}

impl From<ElementBuilder> for VNode {
    fn from(builder: ElementBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct DarkFlag(bool);

    impl ClassContributor for DarkFlag {
        fn contribute(&self, classes: &mut ClassSet) {
            classes.insert_if(self.0, "dark");
        }
    }

    #[test]
    fn class_attribute_merges_into_class_set() {
        let node = el("div").class("a").attr("class", "b a").build();
        assert_eq!(node.as_element().unwrap().classes().to_attribute(), "a b");
        assert!(node.as_element().unwrap().attribute("class").is_none());
    }

    #[test]
    fn style_attribute_is_parsed() {
        let node = el("div").attr("style", "color: red; width:10px;").build();
        let el = node.as_element().unwrap();
        assert_eq!(el.style("color"), Some("red"));
        assert_eq!(el.style("width"), Some("10px"));
    }

    #[test]
    fn aria_prefixes_name() {
        let node = el("button").aria("pressed", "true").build();
        assert_eq!(node.as_element().unwrap().attribute("aria-pressed"), Some("true"));
    }

    #[test]
    fn attr_opt_skips_none() {
        let node = el("a").attr_opt("href", None::<&str>).attr_opt("title", Some("t")).build();
        let el = node.as_element().unwrap();
        assert!(el.attribute("href").is_none());
        assert_eq!(el.attribute("title"), Some("t"));
    }

    #[test]
    fn contributors_add_classes_conditionally() {
        let on = el("div").class("panel").contribute(&DarkFlag(true)).build();
        let off = el("div").class("panel").contribute(&DarkFlag(false)).build();
        assert!(on.as_element().unwrap().has_class("dark"));
        assert!(!off.as_element().unwrap().has_class("dark"));
    }

    #[test]
    fn children_keep_order() {
        let node = el("ul")
            .children(["a", "b", "c"].map(|t| el("li").text(t)))
            .build();
        let texts: Vec<String> = node
            .as_element()
            .unwrap()
            .children()
            .iter()
            .map(VNode::text_content)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn chrome_wins_over_widget_attributes() {
        let mut chrome = Chrome::default();
        chrome.set_attribute("title", "from-app");
        chrome.add_class("extra");
        chrome.set_style("color", "blue");
        let node = el("span")
            .attr("title", "from-widget")
            .class("base")
            .style("color", "red")
            .with_chrome(&chrome)
            .build();
        let el = node.as_element().unwrap();
        assert_eq!(el.attribute("title"), Some("from-app"));
        assert_eq!(el.classes().to_attribute(), "base extra");
        assert_eq!(el.style("color"), Some("blue"));
    }

    #[test]
    fn building_twice_is_structurally_equal() {
        let make = || el("p").class("x").on("click", |_| {}).text("same").build();
        assert_eq!(make(), make());
    }
}
