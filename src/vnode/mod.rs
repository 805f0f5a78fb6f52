//! Virtual nodes: immutable descriptions of the DOM a component wants.
//!
//! - [`VNode`] / [`VElement`]: the tree itself, serializable to HTML and JSON.
//! - [`el`] / [`ElementBuilder`]: fluent construction.
//! - [`ClassSet`]: ordered class accumulation.
//! - [`escape`]: the single escaping routine used for all markup output.

pub mod builder;
pub mod class_set;
pub mod escape;
pub mod node;

pub use builder::{el, text, ElementBuilder};
pub use class_set::ClassSet;
pub use node::{is_void, style_attribute, VElement, VKey, VNode, VText};
