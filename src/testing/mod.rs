//! Headless testing framework: Harness, snapshot helpers.
//!
//! Use the [`Harness`] to drive a [`Runtime`](crate::runtime::Runtime) over an
//! in-memory document. Use [`outline`] and [`component_outline`] to capture
//! virtual nodes as text for snapshot-style assertions.

pub mod harness;
pub mod snapshot;

pub use harness::{Harness, DEFAULT_CONTAINER};
pub use snapshot::{component_outline, outline};
