//! Headless in-memory host.
//!
//! `MemoryDom` realizes virtual nodes into a slotmap of plain nodes and logs
//! every change it makes as a [`Mutation`], the way a browser binding would
//! issue DOM calls. Patching diffs the next virtual node against the live
//! nodes: keyed children are matched by key (so a reorder is a handful of
//! `Move`s, never a content rewrite), unkeyed children by position.

use std::collections::{BTreeMap, HashMap, VecDeque};

use indexmap::IndexMap;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use tracing::{debug, trace};

use super::{Mount, NodeHandle, Patched, Reconciler};
use crate::error::ReconcileError;
use crate::event::{DomEvent, EventBinding};
use crate::vnode::escape;
use crate::vnode::node::{write_close_tag, write_open_tag};
use crate::vnode::{is_void, ClassSet, VElement, VKey, VNode};

new_key_type! {
    struct DomKey;
}

fn handle(key: DomKey) -> NodeHandle {
    NodeHandle::from_raw(key.data().as_ffi())
}

fn dom_key(node: NodeHandle) -> DomKey {
    KeyData::from_ffi(node.raw()).into()
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

/// One change applied to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A new element (with its whole subtree) was built.
    CreateElement { node: NodeHandle, tag: String },
    /// A new text node was built.
    CreateText { node: NodeHandle, text: String },
    /// A node was inserted under `parent` at `index`.
    Insert { parent: NodeHandle, node: NodeHandle, index: usize },
    /// An existing child was moved to `index` within the same parent.
    Move { parent: NodeHandle, node: NodeHandle, index: usize },
    /// A node and its subtree were removed.
    Remove { node: NodeHandle },
    SetText { node: NodeHandle, text: String },
    SetAttribute { node: NodeHandle, name: String, value: String },
    RemoveAttribute { node: NodeHandle, name: String },
    /// The full `class` attribute was rewritten.
    SetClass { node: NodeHandle, value: String },
    SetStyle { node: NodeHandle, property: String, value: String },
    RemoveStyle { node: NodeHandle, property: String },
    /// The set of bound event names changed.
    BindEvents { node: NodeHandle, events: Vec<String> },
}

impl Mutation {
    pub fn is_move(&self) -> bool {
        matches!(self, Mutation::Move { .. })
    }

    /// Whether this mutation rewrites node content rather than structure.
    pub fn is_content_change(&self) -> bool {
        matches!(
            self,
            Mutation::SetText { .. }
                | Mutation::SetAttribute { .. }
                | Mutation::RemoveAttribute { .. }
                | Mutation::SetClass { .. }
                | Mutation::SetStyle { .. }
                | Mutation::RemoveStyle { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Content {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        classes: ClassSet,
        styles: BTreeMap<String, String>,
        events: Vec<EventBinding>,
    },
    Text(String),
}

#[derive(Debug)]
struct DomNode {
    content: Content,
    key: Option<VKey>,
    parent: Option<DomKey>,
    children: Vec<DomKey>,
}

// ---------------------------------------------------------------------------
// MemoryDom
// ---------------------------------------------------------------------------

/// In-memory document with named containers.
#[derive(Debug, Default)]
pub struct MemoryDom {
    nodes: SlotMap<DomKey, DomNode>,
    containers: IndexMap<String, DomKey>,
    title: Option<String>,
    mutations: Vec<Mutation>,
}

impl MemoryDom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container (builder).
    pub fn with_container(mut self, id: &str) -> Self {
        self.add_container(id);
        self
    }

    /// Add a `<div id=..>` container. Returns the existing one if present.
    pub fn add_container(&mut self, id: &str) -> NodeHandle {
        if let Some(&key) = self.containers.get(id) {
            return handle(key);
        }
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_owned(), id.to_owned());
        let key = self.nodes.insert(DomNode {
            content: Content::Element {
                tag: "div".to_owned(),
                attributes,
                classes: ClassSet::new(),
                styles: BTreeMap::new(),
                events: Vec::new(),
            },
            key: None,
            parent: None,
            children: Vec::new(),
        });
        self.containers.insert(id.to_owned(), key);
        handle(key)
    }

    /// Remove a container and everything in it.
    pub fn remove_container(&mut self, id: &str) -> bool {
        match self.containers.shift_remove(id) {
            Some(key) => {
                self.drop_subtree(key);
                true
            }
            None => false,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Every mutation since creation (or the last [`take_mutations`]).
    ///
    /// [`take_mutations`]: MemoryDom::take_mutations
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    // -- Inspection ---------------------------------------------------------

    pub fn contains(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(dom_key(node))
    }

    /// Number of live nodes, containers included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tag(&self, node: NodeHandle) -> Option<&str> {
        match &self.nodes.get(dom_key(node))?.content {
            Content::Element { tag, .. } => Some(tag),
            Content::Text(_) => None,
        }
    }

    pub fn attribute(&self, node: NodeHandle, name: &str) -> Option<&str> {
        match &self.nodes.get(dom_key(node))?.content {
            Content::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            Content::Text(_) => None,
        }
    }

    pub fn has_class(&self, node: NodeHandle, class: &str) -> bool {
        matches!(
            self.nodes.get(dom_key(node)).map(|n| &n.content),
            Some(Content::Element { classes, .. }) if classes.contains(class)
        )
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(dom_key(node))?.parent.map(handle)
    }

    pub fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.nodes
            .get(dom_key(node))
            .map(|n| n.children.iter().copied().map(handle).collect())
            .unwrap_or_default()
    }

    /// First element (document order, containers in creation order) whose
    /// `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeHandle> {
        for &root in self.containers.values() {
            let mut stack = vec![root];
            while let Some(key) = stack.pop() {
                let Some(node) = self.nodes.get(key) else {
                    continue;
                };
                if let Content::Element { attributes, .. } = &node.content {
                    if attributes.get("id").map(String::as_str) == Some(id) {
                        return Some(handle(key));
                    }
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        None
    }

    pub fn text_content(&self, node: NodeHandle) -> Option<String> {
        let key = dom_key(node);
        self.nodes.get(key)?;
        let mut out = String::new();
        self.collect_text(key, &mut out);
        Some(out)
    }

    pub fn outer_html(&self, node: NodeHandle) -> Option<String> {
        let key = dom_key(node);
        self.nodes.get(key)?;
        let mut out = String::new();
        self.write_html(key, &mut out);
        Some(out)
    }

    pub fn inner_html(&self, node: NodeHandle) -> Option<String> {
        let node = self.nodes.get(dom_key(node))?;
        let mut out = String::new();
        for &child in &node.children {
            self.write_html(child, &mut out);
        }
        Some(out)
    }

    /// Markup inside the container with the given id.
    pub fn container_html(&self, id: &str) -> Option<String> {
        self.inner_html(handle(*self.containers.get(id)?))
    }

    fn collect_text(&self, key: DomKey, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        match &node.content {
            Content::Text(text) => out.push_str(text),
            Content::Element { .. } => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    fn write_html(&self, key: DomKey, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        match &node.content {
            Content::Text(text) => out.push_str(&escape::text(text)),
            Content::Element {
                tag,
                attributes,
                classes,
                styles,
                ..
            } => {
                write_open_tag(out, tag, attributes, classes, styles);
                if is_void(tag) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                write_close_tag(out, tag);
            }
        }
    }

    // -- Building -----------------------------------------------------------

    fn live(&self, node: NodeHandle) -> Result<DomKey, ReconcileError> {
        let key = dom_key(node);
        if self.nodes.contains_key(key) {
            Ok(key)
        } else {
            Err(ReconcileError::StaleHandle(node))
        }
    }

    fn create(&mut self, vnode: &VNode) -> DomKey {
        match vnode {
            VNode::Text(text) => {
                let key = self.nodes.insert(DomNode {
                    content: Content::Text(text.as_str().to_owned()),
                    key: None,
                    parent: None,
                    children: Vec::new(),
                });
                self.mutations.push(Mutation::CreateText {
                    node: handle(key),
                    text: text.as_str().to_owned(),
                });
                key
            }
            VNode::Element(el) => {
                let key = self.nodes.insert(DomNode {
                    content: Content::Element {
                        tag: el.tag().to_owned(),
                        attributes: el.attributes().clone(),
                        classes: el.classes().clone(),
                        styles: el.styles().clone(),
                        events: el.events().to_vec(),
                    },
                    key: el.key(),
                    parent: None,
                    children: Vec::new(),
                });
                self.mutations.push(Mutation::CreateElement {
                    node: handle(key),
                    tag: el.tag().to_owned(),
                });
                let children: Vec<DomKey> = el.children().iter().map(|c| self.create(c)).collect();
                for &child in &children {
                    if let Some(node) = self.nodes.get_mut(child) {
                        node.parent = Some(key);
                    }
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.children = children;
                }
                key
            }
        }
    }

    /// Whether `key` can be patched into `next` in place.
    fn compatible(&self, key: DomKey, next: &VNode) -> bool {
        let Some(node) = self.nodes.get(key) else {
            return false;
        };
        match (&node.content, next) {
            (Content::Element { tag, .. }, VNode::Element(el)) => {
                tag == el.tag() && node.key == el.key()
            }
            (Content::Text(_), VNode::Text(_)) => true,
            _ => false,
        }
    }

    fn patch_node(&mut self, key: DomKey, next: &VNode) {
        match next {
            VNode::Text(text) => {
                if let Some(DomNode {
                    content: Content::Text(current),
                    ..
                }) = self.nodes.get_mut(key)
                {
                    if current.as_str() != text.as_str() {
                        *current = text.as_str().to_owned();
                        self.mutations.push(Mutation::SetText {
                            node: handle(key),
                            text: text.as_str().to_owned(),
                        });
                    }
                }
            }
            VNode::Element(el) => {
                self.patch_element(key, el);
                self.patch_children(key, el.children());
            }
        }
    }

    fn patch_element(&mut self, key: DomKey, next: &VElement) {
        let Some(DomNode {
            content:
                Content::Element {
                    attributes,
                    classes,
                    styles,
                    events,
                    ..
                },
            ..
        }) = self.nodes.get_mut(key)
        else {
            return;
        };
        let node = handle(key);
        let log = &mut self.mutations;

        for name in attributes.keys() {
            if !next.attributes().contains_key(name) {
                log.push(Mutation::RemoveAttribute {
                    node,
                    name: name.clone(),
                });
            }
        }
        for (name, value) in next.attributes() {
            if attributes.get(name) != Some(value) {
                log.push(Mutation::SetAttribute {
                    node,
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
        *attributes = next.attributes().clone();

        if classes != next.classes() {
            log.push(Mutation::SetClass {
                node,
                value: next.classes().to_attribute(),
            });
            *classes = next.classes().clone();
        }

        for property in styles.keys() {
            if !next.styles().contains_key(property) {
                log.push(Mutation::RemoveStyle {
                    node,
                    property: property.clone(),
                });
            }
        }
        for (property, value) in next.styles() {
            if styles.get(property) != Some(value) {
                log.push(Mutation::SetStyle {
                    node,
                    property: property.clone(),
                    value: value.clone(),
                });
            }
        }
        *styles = next.styles().clone();

        // Handlers are always swapped; only a change of bound names is logged.
        if events.as_slice() != next.events() {
            log.push(Mutation::BindEvents {
                node,
                events: next.events().iter().map(|b| b.event().to_owned()).collect(),
            });
        }
        *events = next.events().to_vec();
    }

    fn patch_children(&mut self, parent: DomKey, next: &[VNode]) {
        let old = match self.nodes.get(parent) {
            Some(node) => node.children.clone(),
            None => return,
        };

        let mut keyed: HashMap<VKey, DomKey> = HashMap::new();
        let mut unkeyed: VecDeque<DomKey> = VecDeque::new();
        for &child in &old {
            match self.nodes.get(child).and_then(|n| n.key) {
                Some(k) => {
                    keyed.insert(k, child);
                }
                None => unkeyed.push_back(child),
            }
        }

        let mut desired = Vec::with_capacity(next.len());
        for vnode in next {
            let matched = match vnode.key() {
                Some(k) => keyed.remove(&k),
                None => unkeyed.pop_front(),
            };
            let dom = match matched {
                Some(existing) if self.compatible(existing, vnode) => {
                    self.patch_node(existing, vnode);
                    existing
                }
                _ => self.create(vnode),
            };
            desired.push(dom);
        }

        // Old children that found no counterpart go away first.
        let mut current: Vec<DomKey> = Vec::with_capacity(old.len());
        for &child in &old {
            if desired.contains(&child) {
                current.push(child);
            } else {
                self.mutations.push(Mutation::Remove {
                    node: handle(child),
                });
                self.drop_subtree(child);
            }
        }

        for (index, &wanted) in desired.iter().enumerate() {
            if current.get(index) == Some(&wanted) {
                continue;
            }
            match current.iter().position(|&k| k == wanted) {
                Some(from) => {
                    current.remove(from);
                    current.insert(index, wanted);
                    self.mutations.push(Mutation::Move {
                        parent: handle(parent),
                        node: handle(wanted),
                        index,
                    });
                }
                None => {
                    current.insert(index, wanted);
                    if let Some(node) = self.nodes.get_mut(wanted) {
                        node.parent = Some(parent);
                    }
                    self.mutations.push(Mutation::Insert {
                        parent: handle(parent),
                        node: handle(wanted),
                        index,
                    });
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children = current;
        }
    }

    /// Put `new` where `old` is and drop `old`.
    fn replace_node(&mut self, old: DomKey, new: DomKey) {
        let parent = self.nodes.get(old).and_then(|n| n.parent);
        if let Some(parent) = parent {
            let index = self.nodes.get_mut(parent).and_then(|p| {
                let index = p.children.iter().position(|&c| c == old)?;
                p.children[index] = new;
                Some(index)
            });
            if let Some(node) = self.nodes.get_mut(new) {
                node.parent = Some(parent);
            }
            if let Some(index) = index {
                self.mutations.push(Mutation::Insert {
                    parent: handle(parent),
                    node: handle(new),
                    index,
                });
            }
        }
        self.mutations.push(Mutation::Remove { node: handle(old) });
        self.drop_subtree(old);
    }

    fn drop_subtree(&mut self, key: DomKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    fn keyed_in(&self, root: DomKey) -> Vec<(VKey, NodeHandle)> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if let Some(k) = node.key {
                found.push((k, handle(key)));
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }
}

impl Reconciler for MemoryDom {
    fn container(&self, id: &str) -> Option<NodeHandle> {
        self.containers.get(id).copied().map(handle)
    }

    fn patch(
        &mut self,
        previous: Option<&VNode>,
        next: &VNode,
        mount: Mount,
    ) -> Result<Patched, ReconcileError> {
        let key = match mount {
            Mount::Append(container) => {
                let parent = self.live(container)?;
                if !matches!(
                    self.nodes.get(parent).map(|n| &n.content),
                    Some(Content::Element { .. })
                ) {
                    return Err(ReconcileError::NotAnElement(container));
                }
                let key = self.create(next);
                let index = match self.nodes.get_mut(parent) {
                    Some(node) => {
                        node.children.push(key);
                        node.children.len() - 1
                    }
                    None => 0,
                };
                if let Some(node) = self.nodes.get_mut(key) {
                    node.parent = Some(parent);
                }
                self.mutations.push(Mutation::Insert {
                    parent: container,
                    node: handle(key),
                    index,
                });
                debug!(?container, "subtree mounted");
                key
            }
            Mount::Replace(live) => {
                let key = self.live(live)?;
                if previous.is_some() && self.compatible(key, next) {
                    self.patch_node(key, next);
                    key
                } else {
                    let new = self.create(next);
                    self.replace_node(key, new);
                    new
                }
            }
        };
        trace!(node = ?handle(key), mutations = self.mutations.len(), "patched");
        Ok(Patched {
            node: handle(key),
            components: self.keyed_in(key),
        })
    }

    fn remove(&mut self, node: NodeHandle) -> Result<(), ReconcileError> {
        let key = self.live(node)?;
        if let Some(parent) = self.nodes.get(key).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != key);
            }
        }
        self.containers.retain(|_, &mut c| c != key);
        self.mutations.push(Mutation::Remove { node });
        self.drop_subtree(key);
        Ok(())
    }

    fn dispatch(&self, target: NodeHandle, event: &DomEvent) -> Result<usize, ReconcileError> {
        let mut current = Some(self.live(target)?);
        let event = event.clone().with_target(target);
        let mut ran = 0;
        while let Some(key) = current {
            let Some(node) = self.nodes.get(key) else {
                break;
            };
            if let Content::Element { events, .. } = &node.content {
                let matching: Vec<EventBinding> = events
                    .iter()
                    .filter(|b| b.matches(event.kind()))
                    .cloned()
                    .collect();
                if !matching.is_empty() {
                    event.set_current_target(handle(key));
                }
                for binding in matching {
                    binding.call(&event);
                    ran += 1;
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
            current = node.parent;
        }
        trace!(kind = event.kind(), handlers = ran, "event dispatched");
        Ok(ran)
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }
}

// ===========================================================================
// Tests
// ===========================================================================
