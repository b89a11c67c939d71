//! # brrtpath
//!
//! **brrtpath** resolves slash-delimited request paths against an immutable
//! tree of keyed nodes. A resolution yields the node the path leads to (whose
//! value is typically a handler), or a well-defined NotFound / Denied outcome,
//! plus the trail of nodes passed through on the way.
//!
//! The tree knows nothing about transports or rendering: it stores keys,
//! values and children, and the resolver walks it.
//!
//! ## Architecture
//!
//! - **[`path`]** - Tokenizes a path into segments, splits off an optional
//!   extension and provides a movable cursor with sub-path rendering
//! - **[`key`]** - Node keys: static strings, or [`DynamicKey`](key::DynamicKey)
//!   predicates that decide on their own whether (and how far) they match
//! - **[`node`]** - The immutable [`Node`](node::Node) tree and its staged builder
//! - **[`resolver`]** - The two-tier matching walk and the logging
//!   [`Resolver`](resolver::Resolver) handle
//! - **[`context`]** - The per-request context passed to keys and restriction checks
//! - **[`registry`]** / **[`tree`]** - Declarative trees built from YAML or JSON
//! - **[`runtime_config`]** / **[`logging`]** - File and environment configuration,
//!   `tracing` subscriber setup
//! - **[`cli`]** - The `brrtpath` command for inspecting tree definitions
//!
//! ### Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Resolver
//!     participant Cursor as PathCursor
//!     participant Node
//!     participant Key as DynamicKey
//!
//!     Caller->>Resolver: resolve("/users/42", ctx)
//!     Resolver->>Cursor: parse with PathOptions
//!     loop while cursor.has_next()
//!         Resolver->>Node: value().restriction()?.is_available(ctx)
//!         Resolver->>Cursor: peek_next()
//!         Resolver->>Node: tier 1: child with equal static key?
//!         alt no static match
//!             Resolver->>Key: tier 2: matches(cursor, ctx)
//!             Key->>Cursor: advance / end
//!         end
//!     end
//!     Resolver-->>Caller: Resolution { outcome, node, trail }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtpath::context::RequestContext;
//! use brrtpath::key::{NodeKey, ParamKey};
//! use brrtpath::node::NodeBuilder;
//! use brrtpath::resolver::{Outcome, Resolver};
//! use http::Method;
//!
//! let tree = NodeBuilder::<&str, RequestContext>::new(NodeKey::None, "home")
//!     .add_node(
//!         NodeBuilder::new("users", "user list")
//!             .add_child(NodeKey::dynamic(ParamKey::new("id")), "user")
//!             .build(),
//!     )
//!     .build();
//!
//! let resolver = Resolver::new(tree);
//! let mut ctx = RequestContext::new(Method::GET, "/users/42");
//! let resolution = resolver.resolve("/users/42", &mut ctx);
//!
//! assert_eq!(resolution.outcome(), Outcome::Found);
//! assert_eq!(resolution.value(), Some(&"user"));
//! assert_eq!(ctx.param("id"), Some("42"));
//! ```
//!
//! ## Concurrency
//!
//! Trees are never mutated after construction. Share one behind an `Arc`
//! (the [`Resolver`](resolver::Resolver) does this) and resolve from any
//! number of threads; each resolution owns its cursor, trail and context.

pub mod cli;
pub mod context;
pub mod key;
pub mod logging;
pub mod node;
pub mod path;
pub mod registry;
pub mod resolver;
pub mod runtime_config;
pub mod tree;

pub use context::RequestContext;
pub use key::{DynamicKey, NodeKey, Restrictable};
pub use node::{Node, NodeBuilder, NodeValue};
pub use path::{CursorError, PathCursor, PathOptions};
pub use resolver::{resolve, Outcome, Resolution, Resolver};
pub use runtime_config::ResolverConfig;
pub use tree::{load_tree_def, TreeDef};
