//! Component tree: slotmap arena, structure operations, rendering.

pub mod node;
pub(crate) mod render;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Chrome, ComponentId};
pub use tree::Tree;
