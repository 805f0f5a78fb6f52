//! Construction context for a component.

use std::fmt;

use crate::reactive::{Equality, Property, Scheduler};
use crate::tree::ComponentId;

/// Handed to the closure that builds a widget in
/// [`Tree::create`](crate::tree::Tree::create).
///
/// The component's id is allocated before the widget exists, so properties
/// created here are owned by it from the start.
pub struct Cx<'a> {
    id: ComponentId,
    scheduler: &'a Scheduler,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(id: ComponentId, scheduler: &'a Scheduler) -> Self {
        Self {
            id,
            scheduler,
            cleanups: Vec::new(),
        }
    }

    /// The id of the component under construction.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Create a property owned by this component, compared by value.
    pub fn property<T: PartialEq + 'static>(&mut self, value: T) -> Property<T> {
        self.property_with(value, Equality::value())
    }

    /// Create a property with an explicit equality policy.
    pub fn property_with<T: 'static>(&mut self, value: T, equality: Equality<T>) -> Property<T> {
        Property::new(self.id, self.scheduler.clone(), value, equality)
    }

    /// Run `f` once when this component is detached.
    pub fn on_cleanup(&mut self, f: impl FnOnce() + 'static) {
        self.cleanups.push(Box::new(f));
    }

    pub(crate) fn into_cleanups(self) -> Vec<Box<dyn FnOnce()>> {
        self.cleanups
    }
}

impl fmt::Debug for Cx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cx")
            .field("id", &self.id)
            .field("cleanups", &self.cleanups.len())
            .finish()
    }
}
