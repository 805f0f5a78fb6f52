//! The component tree: create, add, remove, reorder, walk.

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace};

use super::node::{Chrome, ComponentId};
use crate::component::{Cx, LifecycleState, LifecycleTracker, Widget};
use crate::error::LifecycleError;
use crate::event::DomEvent;
use crate::host::NodeHandle;
use crate::reactive::Scheduler;
use crate::vnode::{VKey, VNode};

/// Empty slice constant for returning when a component has no children.
const EMPTY_CHILDREN: &[ComponentId] = &[];

/// Everything the tree stores for one component.
pub(super) struct Slot {
    pub(super) widget: Option<Box<dyn Widget>>,
    pub(super) type_name: String,
    pub(super) chrome: Chrome,
    pub(super) state: LifecycleState,
    pub(super) cached: Option<VNode>,
    pub(super) live: Option<NodeHandle>,
    pub(super) mounted: bool,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl Slot {
    fn empty() -> Self {
        Self {
            widget: None,
            type_name: String::new(),
            chrome: Chrome::default(),
            state: LifecycleState::Unattached,
            cached: None,
            live: None,
            mounted: false,
            cleanups: Vec::new(),
        }
    }
}

/// The component tree, backed by a slotmap arena.
///
/// Components live in a single `SlotMap`. Parent/child relationships are
/// stored in secondary maps; the parent link is a plain key, never an owning
/// edge. Detached components stay in the arena as tombstones (so re-adding
/// them fails with a descriptive error) until [`purge_detached`] runs.
///
/// [`purge_detached`]: Tree::purge_detached
pub struct Tree {
    pub(super) slots: SlotMap<ComponentId, Slot>,
    children: SecondaryMap<ComponentId, Vec<ComponentId>>,
    parent: SecondaryMap<ComponentId, ComponentId>,
    scheduler: Scheduler,
    pub(super) lifecycle: LifecycleTracker,
}

impl Tree {
    /// Create an empty tree with its own render queue.
    pub fn new() -> Self {
        Self::with_scheduler(Scheduler::new())
    }

    /// Create an empty tree that queues renders on `scheduler`.
    pub fn with_scheduler(scheduler: Scheduler) -> Self {
        Self {
            slots: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            scheduler,
            lifecycle: LifecycleTracker::new(),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut LifecycleTracker {
        &mut self.lifecycle
    }

    // -- Creation -----------------------------------------------------------

    /// Create an unattached component. `build` receives the construction
    /// context, through which the widget creates its properties.
    pub fn create<W: Widget>(&mut self, build: impl FnOnce(&mut Cx<'_>) -> W) -> ComponentId {
        let id = self.slots.insert(Slot::empty());
        self.children.insert(id, Vec::new());

        let mut cx = Cx::new(id, &self.scheduler);
        let widget = build(&mut cx);
        let cleanups = cx.into_cleanups();

        if let Some(slot) = self.slots.get_mut(id) {
            slot.type_name = widget.type_name().to_owned();
            slot.widget = Some(Box::new(widget));
            slot.cleanups = cleanups;
        }
        debug!(?id, "component created");
        id
    }

    /// Create an unattached component from a widget that owns no properties.
    pub fn insert<W: Widget>(&mut self, widget: W) -> ComponentId {
        self.create(|_| widget)
    }

    // -- Structure ----------------------------------------------------------

    /// Append `child` to the end of `parent`'s child list.
    pub fn append_child(
        &mut self,
        parent: ComponentId,
        child: ComponentId,
    ) -> Result<(), LifecycleError> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` in `parent`'s child list.
    ///
    /// If `parent` is attached, `child` and its subtree become attached and
    /// `parent` is queued for re-render.
    pub fn insert_child(
        &mut self,
        parent: ComponentId,
        index: usize,
        child: ComponentId,
    ) -> Result<(), LifecycleError> {
        let parent_state = self.slot(parent)?.state;
        let child_state = self.slot(child)?.state;

        if parent_state.is_detached() {
            return Err(LifecycleError::Detached(parent));
        }
        if child_state.is_detached() {
            return Err(LifecycleError::Detached(child));
        }
        if let Some(&existing) = self.parent.get(child) {
            return Err(LifecycleError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if child_state.is_attached() {
            return Err(LifecycleError::AlreadyAttached(child));
        }
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(LifecycleError::WouldCycle { parent, child });
        }
        let len = self.children(parent).len();
        if index > len {
            return Err(LifecycleError::IndexOutOfBounds { index, len });
        }

        if let Some(kids) = self.children.get_mut(parent) {
            kids.insert(index, child);
        }
        self.parent.insert(child, parent);
        trace!(?parent, ?child, index, "child inserted");

        if parent_state.is_attached() {
            self.attach(child);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove `child` from `parent`. The child's subtree is detached.
    pub fn remove_child(
        &mut self,
        parent: ComponentId,
        child: ComponentId,
    ) -> Result<(), LifecycleError> {
        self.slot(parent)?;
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or(LifecycleError::NotAChild { parent, child })?;

        if let Some(kids) = self.children.get_mut(parent) {
            kids.remove(position);
        }
        self.parent.remove(child);
        self.mark_dirty(parent);
        self.detach_subtree(child);
        Ok(())
    }

    /// Detach a component and its subtree, removing it from its parent if it
    /// has one. Detaching an already detached component does nothing.
    pub fn detach(&mut self, id: ComponentId) -> Result<(), LifecycleError> {
        if self.slot(id)?.state.is_detached() {
            return Ok(());
        }
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id),
            None => {
                self.detach_subtree(id);
                Ok(())
            }
        }
    }

    /// Move the child at `from` to position `to` in `parent`'s child list.
    pub fn move_child(
        &mut self,
        parent: ComponentId,
        from: usize,
        to: usize,
    ) -> Result<(), LifecycleError> {
        self.slot(parent)?;
        let len = self.children(parent).len();
        for index in [from, to] {
            if index >= len {
                return Err(LifecycleError::IndexOutOfBounds { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        if let Some(kids) = self.children.get_mut(parent) {
            let child = kids.remove(from);
            kids.insert(to, child);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Replace `parent`'s child order. `order` must be a permutation of the
    /// current children.
    pub fn reorder_children(
        &mut self,
        parent: ComponentId,
        order: &[ComponentId],
    ) -> Result<(), LifecycleError> {
        self.slot(parent)?;
        let mut current = self.children(parent).to_vec();
        let mut requested = order.to_vec();
        current.sort_unstable();
        requested.sort_unstable();
        if current != requested {
            return Err(LifecycleError::InvalidOrder(parent));
        }
        if self.children(parent) == order {
            return Ok(());
        }
        if let Some(kids) = self.children.get_mut(parent) {
            kids.clear();
            kids.extend_from_slice(order);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Drop the tombstones of detached components. Returns how many were
    /// removed.
    pub fn purge_detached(&mut self) -> usize {
        let dead: Vec<ComponentId> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.state.is_detached())
            .map(|(id, _)| id)
            .collect();
        for &id in &dead {
            self.lifecycle.forget(id);
            self.slots.remove(id);
            self.children.remove(id);
            self.parent.remove(id);
        }
        if !dead.is_empty() {
            debug!(count = dead.len(), "purged detached components");
        }
        dead.len()
    }

    // -- Queries ------------------------------------------------------------

    /// Get the parent of a component, if it has one.
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a component. Returns an empty slice if it has none
    /// or does not exist.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to its topmost ancestor. Does not include `id`.
    pub fn ancestors(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.slots.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    pub fn state(&self, id: ComponentId) -> Option<LifecycleState> {
        self.slots.get(id).map(|slot| slot.state)
    }

    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.state(id).is_some_and(LifecycleState::is_attached)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of components in the arena, tombstones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn type_name(&self, id: ComponentId) -> Option<&str> {
        self.slots.get(id).map(|slot| slot.type_name.as_str())
    }

    /// Downcast the widget of `id`. `None` once the component is detached.
    pub fn widget<W: Widget>(&self, id: ComponentId) -> Option<&W> {
        self.slots
            .get(id)?
            .widget
            .as_ref()?
            .as_any()
            .downcast_ref::<W>()
    }

    pub fn widget_mut<W: Widget>(&mut self, id: ComponentId) -> Option<&mut W> {
        self.slots
            .get_mut(id)?
            .widget
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<W>()
    }

    /// The last virtual node produced for `id`.
    pub fn vnode(&self, id: ComponentId) -> Option<&VNode> {
        self.slots.get(id)?.cached.as_ref()
    }

    /// The host node currently realizing `id`, once mounted.
    pub fn live_node(&self, id: ComponentId) -> Option<NodeHandle> {
        self.slots.get(id)?.live
    }

    /// Queue `id` for re-render. Ignored unless the component is attached.
    pub fn mark_dirty(&self, id: ComponentId) -> bool {
        self.is_attached(id) && self.scheduler.mark_dirty(id)
    }

    // -- Chrome -------------------------------------------------------------

    pub fn chrome(&self, id: ComponentId) -> Option<&Chrome> {
        self.slots.get(id).map(|slot| &slot.chrome)
    }

    /// Replace all chrome of `id`.
    pub fn set_chrome(&mut self, id: ComponentId, chrome: Chrome) -> Result<(), LifecycleError> {
        self.edit_chrome(id, |c| {
            *c = chrome;
            true
        })
        .map(|_| ())
    }

    pub fn add_class(&mut self, id: ComponentId, class: &str) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.add_class(class))
    }

    pub fn remove_class(&mut self, id: ComponentId, class: &str) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.remove_class(class))
    }

    pub fn toggle_class(&mut self, id: ComponentId, class: &str) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.toggle_class(class))
    }

    pub fn set_style(
        &mut self,
        id: ComponentId,
        property: &str,
        value: &str,
    ) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.set_style(property, value))
    }

    pub fn remove_style(&mut self, id: ComponentId, property: &str) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.remove_style(property))
    }

    pub fn set_attribute(
        &mut self,
        id: ComponentId,
        name: &str,
        value: &str,
    ) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.set_attribute(name, value))
    }

    pub fn remove_attribute(&mut self, id: ComponentId, name: &str) -> Result<bool, LifecycleError> {
        self.edit_chrome(id, |c| c.remove_attribute(name))
    }

    /// Bind an event handler to the component's element.
    pub fn on(
        &mut self,
        id: ComponentId,
        event: &str,
        handler: impl Fn(&DomEvent) + 'static,
    ) -> Result<(), LifecycleError> {
        self.edit_chrome(id, |c| c.on(event, handler)).map(|_| ())
    }

    fn edit_chrome(
        &mut self,
        id: ComponentId,
        edit: impl FnOnce(&mut Chrome) -> bool,
    ) -> Result<bool, LifecycleError> {
        let slot = self.slot_mut(id)?;
        if slot.state.is_detached() {
            return Err(LifecycleError::Detached(id));
        }
        let changed = edit(&mut slot.chrome);
        if changed {
            self.mark_dirty(id);
        }
        Ok(changed)
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Attach `id` and its subtree.
    pub(crate) fn attach(&mut self, id: ComponentId) {
        for c in self.walk_depth_first(id) {
            if let Some(slot) = self.slots.get_mut(c) {
                if slot.state == LifecycleState::Unattached {
                    slot.state = LifecycleState::Attached;
                    self.lifecycle.on_attach(c);
                    trace!(id = ?c, "component attached");
                }
            }
        }
    }

    /// Detach `id` and its subtree, descendants first. Unmount hooks run for
    /// components that were mounted, then cleanup callbacks; cached nodes and
    /// widgets are dropped.
    pub(crate) fn detach_subtree(&mut self, id: ComponentId) {
        let order = self.walk_depth_first(id);
        for &c in order.iter().rev() {
            let Some(slot) = self.slots.get_mut(c) else {
                continue;
            };
            if slot.state.is_detached() {
                continue;
            }
            if slot.mounted {
                if let Some(widget) = slot.widget.as_mut() {
                    widget.unmounting();
                }
            }
            for cleanup in std::mem::take(&mut slot.cleanups) {
                cleanup();
            }
            slot.state = LifecycleState::Detached;
            slot.cached = None;
            slot.live = None;
            slot.mounted = false;
            slot.widget = None;

            self.scheduler.forget(c);
            self.lifecycle.on_detach(c);
            debug!(id = ?c, "component detached");
        }
    }

    /// Record the live host nodes reported by a patch and run `mounted` hooks
    /// for components that just became live. Hooks run children first.
    pub(crate) fn record_live(&mut self, components: &[(VKey, NodeHandle)]) {
        for &(key, node) in components.iter().rev() {
            let id = ComponentId::from_vkey(key);
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            if !slot.state.is_attached() {
                continue;
            }
            let previous = slot.live.replace(node);
            if !slot.mounted {
                slot.mounted = true;
                if let Some(widget) = slot.widget.as_mut() {
                    widget.mounted(node);
                }
                self.lifecycle.on_mount(id);
            } else if let Some(old) = previous.filter(|&old| old != node) {
                debug!(?id, ?old, ?node, "component element rebuilt");
                if let Some(widget) = slot.widget.as_mut() {
                    widget.remounted(old, node);
                }
            }
        }
    }

    /// Undo [`attach`](Self::attach) for a subtree whose first patch failed.
    /// Nothing in it was mounted, so no hooks run.
    pub(crate) fn unattach(&mut self, id: ComponentId) {
        for c in self.walk_depth_first(id) {
            let Some(slot) = self.slots.get_mut(c) else {
                continue;
            };
            if slot.state.is_attached() && !slot.mounted {
                slot.state = LifecycleState::Unattached;
                slot.cached = None;
                slot.live = None;
                self.scheduler.forget(c);
                trace!(id = ?c, "component attach rolled back");
            }
        }
    }

    fn slot(&self, id: ComponentId) -> Result<&Slot, LifecycleError> {
        self.slots
            .get(id)
            .ok_or(LifecycleError::UnknownComponent(id))
    }

    fn slot_mut(&mut self, id: ComponentId) -> Result<&mut Slot, LifecycleError> {
        self.slots
            .get_mut(id)
            .ok_or(LifecycleError::UnknownComponent(id))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::render::RenderPass;
    use crate::widgets::{Container, Label};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Tree, [ComponentId; 5]) {
        let mut tree = Tree::new();
        let root = tree.insert(Container::new());
        let a = tree.insert(Container::new());
        let b = tree.create(|cx| Label::new(cx, "b"));
        let c = tree.create(|cx| Label::new(cx, "c"));
        let d = tree.create(|cx| Label::new(cx, "d"));
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        tree.append_child(a, c).unwrap();
        tree.append_child(a, d).unwrap();
        (tree, [root, a, b, c, d])
    }

    #[test]
    fn parent_and_children() {
        let (tree, [root, a, b, c, d]) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(c).is_empty());
    }

    #[test]
    fn ancestors() {
        let (tree, [root, a, _b, c, _d]) = build_tree();
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn walk_depth_first() {
        let (tree, [root, a, b, c, d]) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_depth_first(a), vec![a, c, d]);
    }

    #[test]
    fn new_components_are_unattached() {
        let (tree, ids) = build_tree();
        for id in ids {
            assert_eq!(tree.state(id), Some(LifecycleState::Unattached));
        }
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn insert_at_index() {
        let (mut tree, [root, a, b, ..]) = build_tree();
        let e = tree.insert(Container::new());
        tree.insert_child(root, 1, e).unwrap();
        assert_eq!(tree.children(root), &[a, e, b]);
    }

    #[test]
    fn insert_out_of_bounds() {
        let (mut tree, [root, ..]) = build_tree();
        let e = tree.insert(Container::new());
        assert_eq!(
            tree.insert_child(root, 5, e),
            Err(LifecycleError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn adding_a_parented_child_fails() {
        let (mut tree, [root, a, _b, c, _d]) = build_tree();
        assert_eq!(
            tree.append_child(root, c),
            Err(LifecycleError::AlreadyParented { child: c, parent: a })
        );
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = Tree::new();
        let top = tree.insert(Container::new());
        let inner = tree.insert(Container::new());
        tree.append_child(top, inner).unwrap();
        assert_eq!(
            tree.append_child(inner, top),
            Err(LifecycleError::WouldCycle { parent: inner, child: top })
        );
        assert_eq!(
            tree.append_child(top, top),
            Err(LifecycleError::WouldCycle { parent: top, child: top })
        );
    }

    #[test]
    fn remove_child_detaches_subtree() {
        let (mut tree, [root, a, b, c, d]) = build_tree();
        tree.remove_child(root, a).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.parent(a), None);
        for id in [a, c, d] {
            assert_eq!(tree.state(id), Some(LifecycleState::Detached));
            assert!(tree.widget::<Label>(id).is_none());
        }
        assert_eq!(tree.state(b), Some(LifecycleState::Unattached));
    }

    #[test]
    fn readding_detached_fails() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.remove_child(root, a).unwrap();
        assert_eq!(tree.append_child(root, a), Err(LifecycleError::Detached(a)));
    }

    #[test]
    fn remove_non_child_fails() {
        let (mut tree, [root, _a, _b, c, _d]) = build_tree();
        assert_eq!(
            tree.remove_child(root, c),
            Err(LifecycleError::NotAChild { parent: root, child: c })
        );
    }

    #[test]
    fn move_child_reorders() {
        let (mut tree, [root, a, b, ..]) = build_tree();
        tree.move_child(root, 0, 1).unwrap();
        assert_eq!(tree.children(root), &[b, a]);
        assert!(tree.move_child(root, 0, 2).is_err());
    }

    #[test]
    fn reorder_requires_permutation() {
        let (mut tree, [root, a, b, c, _d]) = build_tree();
        tree.reorder_children(root, &[b, a]).unwrap();
        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(
            tree.reorder_children(root, &[b, c]),
            Err(LifecycleError::InvalidOrder(root))
        );
        assert_eq!(
            tree.reorder_children(root, &[b]),
            Err(LifecycleError::InvalidOrder(root))
        );
    }

    #[test]
    fn attach_cascades_and_structural_changes_mark_parent() {
        let (mut tree, [root, a, b, c, d]) = build_tree();
        tree.attach(root);
        for id in [root, a, b, c, d] {
            assert!(tree.is_attached(id));
        }

        tree.scheduler().take();
        let e = tree.insert(Container::new());
        tree.append_child(a, e).unwrap();
        assert!(tree.is_attached(e));
        assert!(tree.scheduler().is_dirty(a));
    }

    #[test]
    fn unattached_changes_do_not_queue() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.move_child(root, 0, 1).unwrap();
        tree.add_class(a, "x").unwrap();
        assert!(tree.scheduler().is_empty());
    }

    #[test]
    fn chrome_changes_mark_attached_component() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.attach(root);
        tree.scheduler().take();

        assert_eq!(tree.add_class(a, "wide"), Ok(true));
        assert_eq!(tree.add_class(a, "wide"), Ok(false));
        assert!(tree.chrome(a).unwrap().has_class("wide"));
        assert_eq!(tree.scheduler().queued(), vec![a]);
    }

    #[test]
    fn cleanups_run_once_on_detach() {
        let runs = Rc::new(Cell::new(0));
        let mut tree = Tree::new();
        let counter = runs.clone();
        let id = tree.create(move |cx| {
            cx.on_cleanup(move || counter.set(counter.get() + 1));
            Container::new()
        });
        tree.detach(id).unwrap();
        tree.detach(id).unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn detached_ids_are_forgotten_by_scheduler() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.attach(root);
        tree.mark_dirty(a);
        tree.detach(a).unwrap();
        assert!(!tree.scheduler().is_dirty(a));
        assert!(tree.scheduler().is_dirty(root));
    }

    #[test]
    fn purge_removes_tombstones() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.remove_child(root, a).unwrap();
        assert_eq!(tree.purge_detached(), 3);
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(a));
        assert_eq!(tree.append_child(root, a), Err(LifecycleError::UnknownComponent(a)));
    }

    #[test]
    fn purge_drops_render_counts() {
        let (mut tree, [root, a, ..]) = build_tree();
        tree.attach(root);
        let mut pass = RenderPass::default();
        tree.render_subtree(root, &mut pass);
        assert_eq!(tree.lifecycle().render_count(a), 1);

        tree.remove_child(root, a).unwrap();
        tree.purge_detached();
        assert_eq!(tree.lifecycle().render_count(a), 0);
        assert_eq!(tree.lifecycle().total_renders(), 2);
    }

    #[test]
    fn unattach_rolls_back_unmounted_subtree() {
        let (mut tree, [root, a, b, c, d]) = build_tree();
        tree.attach(root);
        let mut pass = RenderPass::default();
        tree.render_subtree(root, &mut pass);

        tree.unattach(root);
        for id in [root, a, b, c, d] {
            assert_eq!(tree.state(id), Some(LifecycleState::Unattached));
            assert!(tree.vnode(id).is_none());
        }
        tree.attach(root);
        assert!(tree.is_attached(d));
    }

    #[test]
    fn widget_downcast() {
        let (tree, [root, _a, b, ..]) = build_tree();
        assert_eq!(tree.widget::<Label>(b).unwrap().text().get(), "b");
        assert!(tree.widget::<Label>(root).is_none());
        assert_eq!(tree.type_name(b), Some("Label"));
    }

    #[test]
    fn default_impl() {
        let tree = Tree::default();
        assert!(tree.is_empty());
    }
}
