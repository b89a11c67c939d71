//! # CLI Module
//!
//! Command-line access to declarative trees, for checking a tree definition
//! before shipping it.
//!
//! ## Commands
//!
//! ### `links`
//!
//! List every path a tree definition serves:
//!
//! ```bash
//! brrtpath links --tree site.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve one or more paths and report outcome, terminal node, trail and
//! captured parameters:
//!
//! ```bash
//! brrtpath --config resolver.yaml resolve --tree site.yaml /users/42 /missing
//! brrtpath resolve --tree site.yaml --output json /files/css/site.css
//! ```
//!
//! Node values are the value names from the definition. Dynamic keys use the
//! built-in kinds (`param`, `pattern`, `choice`, `remainder`).

mod commands;


pub use commands::{run_cli, Cli, Commands, OutputFormat, ResolveReport};
