//! # Resolver Module
//!
//! Walks a [`PathCursor`](crate::path::PathCursor) through a
//! [`Node`](crate::node::Node) tree and reports where it ends up.
//!
//! ## Algorithm
//!
//! Matching is two-tiered. At each node the next segment is first compared
//! against the children's static keys (plain string equality, first match
//! wins). Only when no static key matches are the children's
//! [`DynamicKey`](crate::key::DynamicKey)s asked, in child order. Static routes
//! therefore never pay for dynamic matching.
//!
//! Before each step the current node's value may veto access through its
//! [`Restrictable`](crate::key::Restrictable) check, which lets an ancestor gate
//! a whole subtree.
//!
//! ## Outcomes
//!
//! Every resolution ends in one of three [`Outcome`]s, returned as data in a
//! [`Resolution`] together with the trail of nodes passed through. None of
//! them is an error.
//!
//! ## Logging
//!
//! The free [`resolve`] function is silent. [`Resolver`] wraps it with timing
//! and `tracing` events: `debug` per attempt, `info` on Found, `warn` on
//! NotFound, Denied and slow matches.

mod core;
#[cfg(test)]
mod tests;

pub use core::{
    resolve, Outcome, Resolution, Resolver, Trail, DEFAULT_SLOW_MATCH_THRESHOLD, MAX_INLINE_TRAIL,
};
