//! Reactive state: observable properties and the render request queue.
//!
//! - [`Property`]: a component-owned cell; unequal writes queue the owner.
//! - [`Equality`]: the change-detection policy of a property.
//! - [`Scheduler`]: deduplicated, first-dirty-ordered queue of components
//!   awaiting a render.

pub mod property;
pub mod scheduler;

pub use property::{Equality, Property};
pub use scheduler::Scheduler;
