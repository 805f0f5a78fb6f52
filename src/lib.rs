//! # reactree
//!
//! A reactive component tree with batched re-rendering over a virtual-DOM
//! reconciler.
//!
//! Components own observable [`Property`] values. Writing a property marks
//! its owner dirty; dirty components are collected into one batch and
//! re-rendered together at the next flush. Each render produces a [`VNode`]
//! that a [`Reconciler`] turns into minimal changes against the live document.
//!
//! ## Core Systems
//!
//! - **[`reactive`]**: Observable properties and the batching render scheduler
//! - **[`vnode`]**: Immutable virtual nodes and the fluent element builder
//! - **[`component`]**: Widget trait, build/render contexts, lifecycle tracking
//! - **[`tree`]**: Slotmap-backed component arena, chrome, subtree rendering
//! - **[`host`]**: Reconciler boundary and the in-memory document
//! - **[`event`]**: DOM events and handler bindings
//! - **[`runtime`]**: Roots, mounting, flushing and the async render loop
//! - **[`widgets`]**: Built-in widgets: Label, Container, Button, Input, Hosted
//! - **[`testing`]**: Headless harness and snapshot helpers
//!
//! ## Example
//!
//! ```ignore
//! use reactree::host::MemoryDom;
//! use reactree::runtime::Runtime;
//! use reactree::widgets::Label;
//!
//! let mut rt = Runtime::new(MemoryDom::new().with_container("helloworld"));
//! let label = rt.create(|cx| Label::new(cx, "Hello world!"));
//! rt.mount("helloworld", label)?;
//! ```

// Foundation
pub mod error;
pub mod vnode;

// Reactivity and components
pub mod component;
pub mod reactive;
pub mod tree;

// Host boundary
pub mod event;
pub mod host;

// Application
pub mod root;
pub mod runtime;
pub mod widgets;

// Headless testing
pub mod testing;

pub use component::{Cx, RenderCx, Rendered, Widget};
pub use error::{Error, Result};
pub use host::{NodeHandle, Reconciler};
pub use reactive::{Equality, Property};
pub use root::Root;
pub use runtime::{FlushReport, Runtime, RuntimeConfig};
pub use tree::{ComponentId, Tree};
pub use vnode::{el, VNode};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use reactree_macros::view;
