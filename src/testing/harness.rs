//! Harness: programmatic interaction with a headless runtime.
//!
//! The `Harness` wraps a [`Runtime`] over a [`MemoryDom`] with one container
//! (`"app"`) and offers short helpers for mounting, firing events, flushing and
//! reading the realized markup back.

use crate::component::{Cx, Widget};
use crate::error::{ConfigurationError, Result};
use crate::event::DomEvent;
use crate::host::{MemoryDom, Mutation, Reconciler};
use crate::root::Root;
use crate::runtime::{FlushReport, Runtime, RuntimeConfig};
use crate::tree::{ComponentId, Tree};

/// Container id used by [`Harness::new`].
pub const DEFAULT_CONTAINER: &str = "app";

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless runtime driver for tests.
///
/// # Examples
///
/// ```ignore
/// use reactree::testing::Harness;
/// use reactree::widgets::Label;
///
/// let mut h = Harness::new();
/// let label = h.create(|cx| Label::new(cx, "Hello"));
/// h.mount(label).unwrap();
/// assert_eq!(h.text(), "Hello");
/// ```
pub struct Harness {
    runtime: Runtime<MemoryDom>,
}

impl Harness {
    /// A runtime with a single `"app"` container.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Like [`new`](Self::new), with an explicit config. Lifecycle recording
    /// follows the config.
    pub fn with_config(config: RuntimeConfig) -> Self {
        let dom = MemoryDom::new().with_container(DEFAULT_CONTAINER);
        Self {
            runtime: Runtime::with_config(dom, config),
        }
    }

    /// A runtime with the given containers and no default one.
    pub fn with_containers(ids: &[&str]) -> Self {
        let dom = ids
            .iter()
            .fold(MemoryDom::new(), |dom, id| dom.with_container(id));
        Self {
            runtime: Runtime::new(dom),
        }
    }

    // ── Building ─────────────────────────────────────────────────────

    pub fn create<W: Widget>(&mut self, build: impl FnOnce(&mut Cx<'_>) -> W) -> ComponentId {
        self.runtime.create(build)
    }

    /// Mount into the default container.
    pub fn mount(&mut self, component: ComponentId) -> Result<Root> {
        self.runtime.mount(DEFAULT_CONTAINER, component)
    }

    pub fn mount_into(&mut self, container: &str, component: ComponentId) -> Result<Root> {
        self.runtime.mount(container, component)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Click the element whose DOM `id` attribute is `dom_id`.
    pub fn click(&mut self, dom_id: &str) -> Result<usize> {
        self.fire(dom_id, DomEvent::click())
    }

    /// Fire an `input` event carrying `value` at the element with `dom_id`.
    pub fn input(&mut self, dom_id: &str, value: &str) -> Result<usize> {
        self.fire(dom_id, DomEvent::input(value))
    }

    /// Click the element realizing `component`.
    pub fn click_component(&mut self, component: ComponentId) -> Result<usize> {
        let node = self
            .runtime
            .live_node(component)
            .ok_or_else(|| ConfigurationError::NotFound(format!("{component:?}")))?;
        self.runtime.dispatch_event(node, DomEvent::click())
    }

    /// Dispatch `event` at the element with `dom_id`.
    pub fn fire(&mut self, dom_id: &str, event: DomEvent) -> Result<usize> {
        let node = self
            .runtime
            .host()
            .element_by_id(dom_id)
            .ok_or_else(|| ConfigurationError::NotFound(dom_id.to_owned()))?;
        self.runtime.dispatch_event(node, event)
    }

    // ── Processing ───────────────────────────────────────────────────

    pub fn flush(&mut self) -> FlushReport {
        self.runtime.flush()
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Markup inside the default container.
    pub fn html(&self) -> String {
        self.html_of(DEFAULT_CONTAINER).unwrap_or_default()
    }

    pub fn html_of(&self, container: &str) -> Option<String> {
        self.runtime.host().container_html(container)
    }

    /// Text content of the default container.
    pub fn text(&self) -> String {
        let dom = self.runtime.host();
        dom.container(DEFAULT_CONTAINER)
            .and_then(|node| dom.text_content(node))
            .unwrap_or_default()
    }

    pub fn render_count(&self, component: ComponentId) -> usize {
        self.runtime.tree().lifecycle().render_count(component)
    }

    /// Drain the host's mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.runtime.host_mut().take_mutations()
    }

    pub fn runtime(&self) -> &Runtime<MemoryDom> {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime<MemoryDom> {
        &mut self.runtime
    }

    pub fn tree(&self) -> &Tree {
        self.runtime.tree()
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.runtime.tree_mut()
    }

    pub fn dom(&self) -> &MemoryDom {
        self.runtime.host()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::widgets::{Button, Container, Input, Label};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn new_has_default_container() {
        let h = Harness::new();
        assert!(h.dom().container("app").is_some());
        assert_eq!(h.html(), "");
    }

    #[test]
    fn with_containers_has_no_default() {
        let h = Harness::with_containers(&["left", "right"]);
        assert!(h.dom().container("app").is_none());
        assert_eq!(h.html_of("left").as_deref(), Some(""));
    }

    #[test]
    fn mount_and_read_text() {
        let mut h = Harness::new();
        let label = h.create(|cx| Label::new(cx, "Hello"));
        h.mount(label).unwrap();
        assert_eq!(h.text(), "Hello");
        assert_eq!(h.render_count(label), 1);
    }

    #[test]
    fn click_runs_handler_and_flushes() {
        let clicks = Rc::new(Cell::new(0));
        let mut h = Harness::new();
        let root = h.create(|_| Container::new());
        let counter = clicks.clone();
        let button = h.create(move |cx| {
            Button::new(cx, "Go").with_on_click(move |_| counter.set(counter.get() + 1))
        });
        h.tree_mut().append_child(root, button).unwrap();
        h.tree_mut().set_attribute(button, "id", "go").unwrap();
        h.mount(root).unwrap();

        assert_eq!(h.click("go").unwrap(), 1);
        assert_eq!(clicks.get(), 1);
        assert_eq!(h.click_component(button).unwrap(), 1);
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn input_round_trips_through_property() {
        let mut h = Harness::new();
        let field = h.create(Input::new);
        h.tree_mut().set_attribute(field, "id", "name").unwrap();
        h.mount(field).unwrap();

        h.input("name", "Ada").unwrap();
        assert!(!h.runtime().is_dirty());
        assert_eq!(h.render_count(field), 2);
        assert!(h.html().contains(r#"value="Ada""#));
    }

    #[test]
    fn missing_element_is_not_found() {
        let mut h = Harness::new();
        assert_eq!(
            h.click("ghost").unwrap_err(),
            Error::Configuration(ConfigurationError::NotFound("ghost".into()))
        );
    }
}
