//! # Tree Module
//!
//! Declarative tree definitions, loaded from YAML or JSON and built into a
//! [`Node`](crate::node::Node) tree through a [`Registry`](crate::registry::Registry).
//!
//! ## Format
//!
//! ```yaml
//! value: home
//! children:
//!   - key: users
//!     value: user_list
//!     children:
//!       - param: id
//!         value: user
//!   - key: static
//!     children:
//!       - dynamic: { kind: remainder, arg: file }
//!         value: asset
//! ```
//!
//! Each entry has at most one of `key` (static), `param` (shorthand for the
//! `param` dynamic kind) or `dynamic`. Entries without any of them are keyless.
//! `value` names a registry value; when omitted the value type's `Default` is
//! used.

mod build;
mod load;
mod types;

pub use load::{load_tree_def, TreeFormat};
pub use types::{DynamicDef, TreeDef};
