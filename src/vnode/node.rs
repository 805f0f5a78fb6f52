//! Immutable virtual nodes: elements and text leaves.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use super::class_set::ClassSet;
use super::escape;
use crate::event::EventBinding;

/// Identifies the element a component rendered as its root.
///
/// Reconcilers use keys to match component roots across re-orderings and to
/// report the live node of each component after a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VKey(pub u64);

/// One node of a virtual tree.
///
/// Elements are reference-counted so cached subtrees can be spliced into new
/// trees without copying.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VNode {
    Element(Rc<VElement>),
    Text(VText),
}

/// A text leaf. Stored raw; escaped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VText {
    pub(crate) text: String,
}

impl VText {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A virtual element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VElement {
    pub(crate) tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) key: Option<VKey>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "ClassSet::is_empty")]
    pub(crate) classes: ClassSet,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) styles: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) events: Vec<EventBinding>,
    pub(crate) children: Vec<VNode>,
}

impl VElement {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn key(&self) -> Option<VKey> {
        self.key
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn events(&self) -> &[EventBinding] {
        &self.events
    }

    /// Ordered children. Empty, never absent, for childless elements.
    pub fn children(&self) -> &[VNode] {
        &self.children
    }

    fn write_html(&self, out: &mut String) {
        write_open_tag(out, &self.tag, &self.attributes, &self.classes, &self.styles);
        if is_void(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        write_close_tag(out, &self.tag);
    }
}

impl VNode {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        VNode::Text(VText { text: text.into() })
    }

    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(el) => Some(el),
            VNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(t) => Some(&t.text),
            VNode::Element(_) => None,
        }
    }

    /// Component key, for elements that carry one.
    pub fn key(&self) -> Option<VKey> {
        self.as_element().and_then(VElement::key)
    }

    /// Concatenated text of all descendant text leaves.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text(t) => out.push_str(&t.text),
            VNode::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Serialize to HTML. Text and attribute values are escaped once.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            VNode::Text(t) => out.push_str(&escape::text(&t.text)),
            VNode::Element(el) => el.write_html(out),
        }
    }

    /// Find the element carrying `key` in this subtree.
    pub fn find_keyed(&self, key: VKey) -> Option<&VNode> {
        let el = self.as_element()?;
        if el.key == Some(key) {
            return Some(self);
        }
        el.children.iter().find_map(|c| c.find_keyed(key))
    }

    /// All component keys in this subtree, pre-order.
    pub fn keys(&self) -> Vec<VKey> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<VKey>) {
        if let VNode::Element(el) = self {
            keys.extend(el.key);
            el.children.iter().for_each(|c| c.collect_keys(keys));
        }
    }

    /// Return a copy of this tree with the element keyed `key` replaced.
    ///
    /// Only the path from the root to the replaced element is copied; sibling
    /// subtrees are shared. Returns `None` if the key is not present.
    pub fn replace_keyed(&self, key: VKey, replacement: &VNode) -> Option<VNode> {
        let el = self.as_element()?;
        if el.key == Some(key) {
            return Some(replacement.clone());
        }
        for (index, child) in el.children.iter().enumerate() {
            if let Some(new_child) = child.replace_keyed(key, replacement) {
                let mut copy = VElement::clone(el);
                copy.children[index] = new_child;
                return Some(VNode::Element(Rc::new(copy)));
            }
        }
        None
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        VNode::text(text)
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        VNode::text(text)
    }
}

impl From<VElement> for VNode {
    fn from(el: VElement) -> Self {
        VNode::Element(Rc::new(el))
    }
}

// ---------------------------------------------------------------------------
// Markup helpers shared with host serializers
// ---------------------------------------------------------------------------

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements that never have a closing tag or children.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// `k: v; k2: v2` for a `style` attribute.
pub fn style_attribute(styles: &BTreeMap<String, String>) -> String {
    styles
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn write_open_tag(
    out: &mut String,
    tag: &str,
    attributes: &BTreeMap<String, String>,
    classes: &ClassSet,
    styles: &BTreeMap<String, String>,
) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        push_attribute(out, name, value);
    }
    if !classes.is_empty() {
        push_attribute(out, "class", &classes.to_attribute());
    }
    if !styles.is_empty() {
        push_attribute(out, "style", &style_attribute(styles));
    }
    out.push('>');
}

pub(crate) fn write_close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape::attribute(value));
    out.push('"');
}
