//! Render request queue.
//!
//! The [`Scheduler`] holds the set of dirty components awaiting a flush,
//! deduplicated and kept in first-dirty order. Marking is cheap and
//! idempotent. The first mark of a batch raises a [`Notify`] permit so an
//! async render loop wakes once per batch, after the current synchronous turn
//! has unwound.
//!
//! The queue is single-threaded (`Rc`); a flush takes the whole set
//! atomically, so marks made while a flush is running land in the next batch.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;
use tokio::sync::Notify;
use tracing::trace;

use crate::tree::ComponentId;

struct Inner {
    queue: RefCell<IndexSet<ComponentId>>,
    notify: Notify,
}

/// Shared handle to a runtime's render request queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

impl Scheduler {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                queue: RefCell::new(IndexSet::new()),
                notify: Notify::new(),
            }),
        }
    }

    /// Request a render of `id`. Returns `false` if it was already queued.
    pub fn mark_dirty(&self, id: ComponentId) -> bool {
        let (inserted, len) = {
            let mut queue = self.inner.queue.borrow_mut();
            let inserted = queue.insert(id);
            (inserted, queue.len())
        };
        if inserted {
            trace!(?id, pending = len, "component marked dirty");
            if len == 1 {
                self.inner.notify.notify_one();
            }
        }
        inserted
    }

    /// Whether `id` is waiting for the next flush.
    pub fn is_dirty(&self, id: ComponentId) -> bool {
        self.inner.queue.borrow().contains(&id)
    }

    /// Number of queued components.
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.queue.borrow().is_empty()
    }

    /// Snapshot of the queued ids in first-dirty order.
    pub fn queued(&self) -> Vec<ComponentId> {
        self.inner.queue.borrow().iter().copied().collect()
    }

    /// Take the whole queue, leaving it empty.
    pub(crate) fn take(&self) -> IndexSet<ComponentId> {
        std::mem::take(&mut *self.inner.queue.borrow_mut())
    }

    /// Drop a pending request (the component was rendered out of band).
    pub(crate) fn forget(&self, id: ComponentId) -> bool {
        self.inner.queue.borrow_mut().shift_remove(&id)
    }

    /// Wait until a batch starts (or [`wake`](Self::wake) is called).
    pub async fn notified(&self) {
        self.inner.notify.notified().await
    }

    /// Wake a waiting render loop without queueing anything.
    pub fn wake(&self) {
        self.inner.notify.notify_one();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
