//! Component lifecycle: attach, render, mount, detach.
//!
//! Every component moves through [`LifecycleState`] exactly once:
//! `Unattached → Attached → Detached`. The `LifecycleTracker` counts renders
//! per component and, when recording is enabled, accumulates
//! [`LifecycleEvent`]s that can be drained for inspection.

use std::collections::HashMap;

use crate::tree::ComponentId;

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

/// Where a component is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Created but not reachable from any root.
    #[default]
    Unattached,
    /// Reachable from a mounted root.
    Attached,
    /// Removed. Terminal.
    Detached,
}

impl LifecycleState {
    pub fn is_attached(self) -> bool {
        self == LifecycleState::Attached
    }

    pub fn is_detached(self) -> bool {
        self == LifecycleState::Detached
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during a component's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The component became reachable from a root.
    Attached { component: ComponentId },
    /// The component's builder produced a new virtual node.
    Rendered { component: ComponentId },
    /// The component's element became live in the host document.
    Mounted { component: ComponentId },
    /// The component was removed and released its resources.
    Detached { component: ComponentId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Counts renders and, when recording, accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    recording: bool,
    pending: Vec<LifecycleEvent>,
    renders: HashMap<ComponentId, usize>,
}

impl LifecycleTracker {
    /// Create a tracker that counts renders but does not record events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn event recording on or off. Render counts are always kept.
    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub(crate) fn on_attach(&mut self, component: ComponentId) {
        self.record(LifecycleEvent::Attached { component });
    }

    pub(crate) fn on_render(&mut self, component: ComponentId) {
        *self.renders.entry(component).or_insert(0) += 1;
        self.record(LifecycleEvent::Rendered { component });
    }

    pub(crate) fn on_mount(&mut self, component: ComponentId) {
        self.record(LifecycleEvent::Mounted { component });
    }

    pub(crate) fn on_detach(&mut self, component: ComponentId) {
        self.record(LifecycleEvent::Detached { component });
    }

    fn record(&mut self, event: LifecycleEvent) {
        if self.recording {
            self.pending.push(event);
        }
    }

    /// How many times `component`'s builder has succeeded.
    pub fn render_count(&self, component: ComponentId) -> usize {
        self.renders.get(&component).copied().unwrap_or(0)
    }

    /// Successful builder calls across all components.
    pub fn total_renders(&self) -> usize {
        self.renders.values().sum()
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop the render count of a purged component.
    pub(crate) fn forget(&mut self, component: ComponentId) {
        self.renders.remove(&component);
    }

    /// Forget counts and pending events.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.renders.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
