//! # Node Module
//!
//! The immutable tree the resolver walks, and a staged builder for it.
//!
//! A [`Node`] holds a [`NodeKey`](crate::key::NodeKey), an opaque value and an
//! ordered list of children. Values opt into resolver and builder hooks by
//! implementing [`NodeValue`]; plain payloads (`()`, `String`, `&'static str`,
//! numbers, `Option<T>`, `Arc<T>`) already do.
//!
//! Trees are built bottom-up with [`Node::new`], with [`NodeBuilder`], or from a
//! declarative definition through [`tree`](crate::tree).

mod builder;
mod core;
#[cfg(test)]
mod tests;

pub use builder::{ChildStage, NodeBuilder, NodeCallback};
pub use core::{Node, NodeValue};
