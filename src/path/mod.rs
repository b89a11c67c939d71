//! # Path Module
//!
//! Tokenizes request paths into segments and exposes a movable cursor over them.
//!
//! ## Overview
//!
//! A [`PathCursor`] is built once per request from the raw path string and the
//! configured [`PathOptions`]. The resolver walks it forward segment by segment;
//! dynamic keys may move it further (or back) on their own.
//!
//! - Empty segments are never retained: `/a//b/` has two segments.
//! - An optional extension is split off the last segment (`list.json` →
//!   segment `list`, extension `json`), optionally restricted to an allow-list.
//! - Sub-paths before/after the current position can be rendered as strings.
//!
//! ## Example
//!
//! ```rust
//! use brrtpath::path::PathCursor;
//!
//! let mut cursor = PathCursor::new("/users/42/posts");
//! assert_eq!(cursor.advance().unwrap(), "users");
//! assert_eq!(cursor.previous_path(), "/users");
//! assert_eq!(cursor.path_from_current(), "/42/posts");
//! ```

mod cursor;
mod error;
mod options;

pub use cursor::{CursorMark, PathCursor, SegmentVec, MAX_INLINE_SEGMENTS};
pub use error::{CursorError, CursorErrorKind};
pub use options::{PathOptions, DEFAULT_EXTENSION_SEPARATOR, DEFAULT_PATH_SEPARATOR};
