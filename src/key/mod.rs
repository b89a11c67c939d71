//! # Key Module
//!
//! Node keys and the capability traits the resolver checks for.
//!
//! A node key is either absent, a static string (tier-1, exact equality) or a
//! [`DynamicKey`] (tier-2, predicate). Node values may expose a
//! [`Restrictable`] check through [`NodeValue`](crate::node::NodeValue).
//!
//! The ready-made keys in this module ([`ParamKey`], [`PatternKey`],
//! [`ChoiceKey`], [`RemainderKey`]) capture into any context implementing
//! [`ParamSink`](crate::context::ParamSink).

mod core;
mod param;
#[cfg(test)]
mod tests;

pub use core::{DynamicKey, NodeKey, Restrictable};
pub use param::{ChoiceKey, ParamKey, PatternKey, RemainderKey};
