//! Component ids and the per-component chrome (classes, styles, attributes,
//! handlers) that application code sets from outside the widget.

use std::collections::BTreeMap;

use slotmap::{new_key_type, Key, KeyData};

use crate::event::{DomEvent, EventBinding};
use crate::vnode::{ClassSet, VKey};

new_key_type! {
    /// Unique identifier for a component. Copy, lightweight (u64).
    pub struct ComponentId;
}

impl ComponentId {
    /// The key stamped on this component's root element.
    pub fn vkey(self) -> VKey {
        VKey(self.data().as_ffi())
    }

    /// Recover the component id from a virtual-node key.
    pub fn from_vkey(key: VKey) -> Self {
        KeyData::from_ffi(key.0).into()
    }
}

/// Classes, styles, attributes and handlers attached to a component by
/// application code. Merged into whatever element the widget renders.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    classes: ClassSet,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    events: Vec<EventBinding>,
}

impl Chrome {
    /// Create chrome with a DOM id attribute (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attributes.insert("id".to_owned(), id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class);
        self
    }

    /// Set an inline style (builder).
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn events(&self) -> &[EventBinding] {
        &self.events
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a CSS class. Returns whether anything changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        self.classes.insert(class)
    }

    /// Remove a CSS class. Returns whether anything changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    /// Toggle a CSS class. Always a change.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        self.classes.toggle(class);
        true
    }

    /// Set an inline style. Returns whether the value changed.
    pub fn set_style(&mut self, property: &str, value: &str) -> bool {
        if self.styles.get(property).map(String::as_str) == Some(value) {
            return false;
        }
        self.styles.insert(property.to_owned(), value.to_owned());
        true
    }

    /// Remove an inline style. Returns whether it was present.
    pub fn remove_style(&mut self, property: &str) -> bool {
        self.styles.remove(property).is_some()
    }

    /// Set an attribute. Returns whether the value changed.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        if self.attributes.get(name).map(String::as_str) == Some(value) {
            return false;
        }
        self.attributes.insert(name.to_owned(), value.to_owned());
        true
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        self.attributes.remove(name).is_some()
    }

    /// Bind an event handler. Always a change.
    pub fn on(&mut self, event: &str, handler: impl Fn(&DomEvent) + 'static) -> bool {
        self.events.push(EventBinding::new(event, handler));
        true
    }
}
