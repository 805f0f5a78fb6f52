//! Component system: widget trait, construction context, lifecycle.

pub mod context;
pub mod lifecycle;
pub mod traits;

pub use context::Cx;
pub use lifecycle::{LifecycleEvent, LifecycleState, LifecycleTracker};
pub use traits::{ClassContributor, DarkMode, RenderCx, Rendered, Widget};
