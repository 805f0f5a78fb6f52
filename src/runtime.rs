//! Runtime: owns the tree, the host and the root registry.
//!
//! [`Runtime`] is the explicitly constructed service object an application
//! creates at start-up and disposes at shutdown. It mounts components into
//! host containers, flushes the render queue and routes DOM events.
//!
//! Flushes happen at one of three boundaries:
//!
//! 1. an explicit [`Runtime::flush`];
//! 2. the end of [`Runtime::dispatch_event`] (see
//!    [`RuntimeConfig::flush_after_dispatch`]);
//! 3. the async [`render_loop`], which wakes once per batch.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, error, info, trace, warn};

use crate::component::{Cx, Widget};
use crate::error::{ConfigurationError, Error, Result};
use crate::event::DomEvent;
use crate::host::{Mount, NodeHandle, Reconciler};
use crate::reactive::Scheduler;
use crate::root::{check_mountable, Root};
use crate::tree::render::RenderPass;
use crate::tree::{ComponentId, Tree};
use crate::vnode::VNode;

// ---------------------------------------------------------------------------
// RuntimeConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Document title set on the host at construction.
    pub title: Option<String>,
    /// Flush the render queue after every dispatched event.
    pub flush_after_dispatch: bool,
    /// Delay between a batch starting and the render loop flushing it.
    pub frame_interval: Option<Duration>,
    /// Record lifecycle events in the tree's tracker.
    pub record_lifecycle: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: None,
            flush_after_dispatch: true,
            frame_interval: None,
            record_lifecycle: false,
        }
    }
}

impl RuntimeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable flushing after dispatch (builder).
    pub fn with_flush_after_dispatch(mut self, flush: bool) -> Self {
        self.flush_after_dispatch = flush;
        self
    }

    /// Set the render loop's frame interval (builder).
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    /// Record lifecycle events (builder).
    pub fn with_lifecycle_recording(mut self, record: bool) -> Self {
        self.record_lifecycle = record;
        self
    }
}

// ---------------------------------------------------------------------------
// FlushReport
// ---------------------------------------------------------------------------

/// What one flush did.
#[derive(Debug, Default)]
pub struct FlushReport {
    /// Components whose builder ran successfully, in render order.
    pub rendered: Vec<ComponentId>,
    /// Queued components that were no longer attached.
    pub skipped: Vec<ComponentId>,
    /// Render and reconcile failures. Each was logged.
    pub errors: Vec<Error>,
}

impl FlushReport {
    /// Whether the flush had nothing to do.
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty() && self.skipped.is_empty() && self.errors.is_empty()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// Owns a component tree, a host reconciler and the mounted roots.
pub struct Runtime<R: Reconciler> {
    tree: Tree,
    host: R,
    roots: IndexMap<String, Root>,
    config: RuntimeConfig,
    disposed: bool,
}

impl<R: Reconciler> Runtime<R> {
    /// Create a runtime over `host` with the default config.
    pub fn new(host: R) -> Self {
        Self::with_config(host, RuntimeConfig::default())
    }

    pub fn with_config(mut host: R, config: RuntimeConfig) -> Self {
        if let Some(title) = &config.title {
            host.set_title(title);
        }
        let mut tree = Tree::new();
        tree.lifecycle_mut().set_recording(config.record_lifecycle);
        Self {
            tree,
            host,
            roots: IndexMap::new(),
            config,
            disposed: false,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn host(&self) -> &R {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut R {
        &mut self.host
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        self.tree.scheduler()
    }

    /// Create an unattached component. See [`Tree::create`].
    pub fn create<W: Widget>(&mut self, build: impl FnOnce(&mut Cx<'_>) -> W) -> ComponentId {
        self.tree.create(build)
    }

    /// Whether renders are waiting for a flush.
    pub fn is_dirty(&self) -> bool {
        !self.tree.scheduler().is_empty()
    }

    pub fn vnode(&self, id: ComponentId) -> Option<&VNode> {
        self.tree.vnode(id)
    }

    pub fn live_node(&self, id: ComponentId) -> Option<NodeHandle> {
        self.tree.live_node(id)
    }

    pub fn root(&self, container: &str) -> Option<&Root> {
        self.roots.get(container)
    }

    /// Mounted roots in mount order.
    pub fn roots(&self) -> impl Iterator<Item = &Root> {
        self.roots.values()
    }

    // -- Mounting -----------------------------------------------------------

    /// Mount `component` into the container with id `container`.
    ///
    /// The container must exist in the host now. The component and its
    /// subtree become attached and are rendered and realized synchronously.
    /// Render failures inside the subtree are logged and leave stand-ins;
    /// they do not fail the mount.
    pub fn mount(&mut self, container: &str, component: ComponentId) -> Result<Root> {
        let target = self
            .host
            .container(container)
            .ok_or_else(|| ConfigurationError::NotFound(container.to_owned()))?;
        if self.roots.contains_key(container) {
            return Err(ConfigurationError::AlreadyMounted(container.to_owned()).into());
        }
        check_mountable(&self.tree, component)?;

        // Marks from before the first render are covered by it. Marks raised
        // while rendering stay queued for the next flush.
        for id in self.tree.walk_depth_first(component) {
            self.tree.scheduler().forget(id);
        }
        self.tree.attach(component);
        let mut pass = RenderPass::default();
        let rendered = self.tree.render_subtree(component, &mut pass);

        let patched = match self.host.patch(None, &rendered.node, Mount::Append(target)) {
            Ok(patched) => patched,
            Err(err) => {
                error!(container, ?component, error = %err, "mount failed");
                self.tree.unattach(component);
                return Err(err.into());
            }
        };
        self.tree.record_live(&patched.components);

        let root = Root::new(container, component);
        self.roots.insert(container.to_owned(), root.clone());
        info!(
            container,
            ?component,
            rendered = pass.rendered.len(),
            errors = pass.errors.len(),
            "root mounted"
        );
        Ok(root)
    }

    /// Unmount the root in `container`: detach its whole tree (running
    /// unmount hooks while the nodes are still live), then remove the nodes
    /// from the host.
    pub fn unmount(&mut self, container: &str) -> Result<()> {
        let root = self
            .roots
            .shift_remove(container)
            .ok_or_else(|| ConfigurationError::NotMounted(container.to_owned()))?;
        let live = self.tree.live_node(root.component());
        self.tree.detach(root.component())?;
        if let Some(node) = live {
            self.host.remove(node)?;
        }
        info!(container, "root unmounted");
        Ok(())
    }

    // -- Flushing -----------------------------------------------------------

    /// Render every queued component once and reconcile the results.
    ///
    /// The queue is taken atomically; anything queued while this runs lands
    /// in the next flush.
    pub fn flush(&mut self) -> FlushReport {
        let batch = self.tree.scheduler().take();
        if batch.is_empty() {
            return FlushReport::default();
        }
        debug!(pending = batch.len(), "flush started");

        let mut pass = RenderPass::new(batch);
        let mut report = FlushReport::default();
        while let Some(id) = pass.next() {
            if !self.tree.is_attached(id) {
                trace!(?id, "skipping component that is not attached");
                report.skipped.push(id);
                continue;
            }
            let rerender = self.tree.render_subtree(id, &mut pass);
            let Some(live) = rerender.live else {
                continue;
            };
            match self
                .host
                .patch(rerender.previous.as_ref(), &rerender.node, Mount::Replace(live))
            {
                Ok(patched) => self.tree.record_live(&patched.components),
                Err(err) => {
                    error!(?id, error = %err, "reconcile failed");
                    report.errors.push(err.into());
                }
            }
        }

        report.rendered = pass.rendered;
        report
            .errors
            .extend(pass.errors.into_iter().map(Error::from));
        debug!(
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            errors = report.errors.len(),
            "flush finished"
        );
        report
    }

    // -- Events -------------------------------------------------------------

    /// Deliver `event` to `target` and, if configured, flush afterwards.
    /// Returns how many handlers ran.
    pub fn dispatch_event(&mut self, target: NodeHandle, event: DomEvent) -> Result<usize> {
        let ran = self.host.dispatch(target, &event)?;
        if self.config.flush_after_dispatch && self.is_dirty() {
            self.flush();
        }
        Ok(ran)
    }

    // -- Shutdown -----------------------------------------------------------

    /// Unmount every root and stop the render loop.
    pub fn dispose(&mut self) {
        let containers: Vec<String> = self.roots.keys().cloned().collect();
        for container in containers {
            if let Err(err) = self.unmount(&container) {
                warn!(container, error = %err, "unmount during dispose failed");
            }
        }
        self.disposed = true;
        self.tree.scheduler().wake();
        debug!("runtime disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

// ---------------------------------------------------------------------------
// Render loop
// ---------------------------------------------------------------------------

/// Flush `runtime` whenever a batch of renders starts, until it is disposed.
///
/// Must run on a `LocalSet` (`tokio::task::spawn_local`): the runtime is
/// single-threaded. Callers must not hold a borrow of `runtime` across an
/// `.await`.
pub async fn render_loop<R: Reconciler>(runtime: Rc<RefCell<Runtime<R>>>) {
    let (scheduler, frame) = {
        let rt = runtime.borrow();
        (rt.scheduler().clone(), rt.config().frame_interval)
    };
    loop {
        if runtime.borrow().is_disposed() {
            break;
        }
        scheduler.notified().await;
        if let Some(interval) = frame {
            tokio::time::sleep(interval).await;
        }
        let mut rt = runtime.borrow_mut();
        if rt.is_disposed() {
            break;
        }
        rt.flush();
    }
    debug!("render loop stopped");
}

// ===========================================================================
// Tests
// ===========================================================================
