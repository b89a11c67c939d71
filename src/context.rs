//! Request context passed through resolution.
//!
//! The resolver never reads or writes the context itself; it only hands it to
//! [`Restrictable`](crate::key::Restrictable) values and
//! [`DynamicKey`](crate::key::DynamicKey) predicates. Any type works as a
//! context. [`RequestContext`] is a ready-made one for HTTP-style callers, and
//! [`ParamSink`] is the small interface the built-in keys need from it.

use http::{Extensions, Method};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Maximum number of captured parameters stored inline.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured path parameters, in capture order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A context that can receive captured path parameters.
pub trait ParamSink {
    /// Store `value` under `name`.
    fn insert_param(&mut self, name: &str, value: String);
}

impl ParamSink for HashMap<String, String> {
    fn insert_param(&mut self, name: &str, value: String) {
        self.insert(name.to_string(), value);
    }
}

impl ParamSink for BTreeMap<String, String> {
    fn insert_param(&mut self, name: &str, value: String) {
        self.insert(name.to_string(), value);
    }
}

impl ParamSink for Vec<(String, String)> {
    fn insert_param(&mut self, name: &str, value: String) {
        self.push((name.to_string(), value));
    }
}

/// Per-request state for HTTP-style dispatch.
///
/// Holds the request method and raw path for restriction checks, the
/// parameters captured by dynamic keys, and a typed [`Extensions`] map where
/// keys and restriction checks can stash per-request data (e.g. an entity a
/// key looked up while matching, for the handler to reuse).
///
/// # Example
///
/// ```rust
/// use brrtpath::context::{ParamSink, RequestContext};
/// use http::Method;
///
/// let mut ctx = RequestContext::new(Method::GET, "/users/42");
/// ctx.insert_param("id", "42".to_string());
/// ctx.extensions_mut().insert(42_u64);
///
/// assert_eq!(ctx.param("id"), Some("42"));
/// assert_eq!(ctx.extensions().get::<u64>(), Some(&42));
/// ```
#[derive(Debug, Default)]
pub struct RequestContext {
    method: Method,
    path: String,
    params: ParamVec,
    extensions: Extensions,
}

impl RequestContext {
    /// Context for a request with `method` on `path`.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            params: ParamVec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw request path as received.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a captured parameter by name.
    ///
    /// Uses "last write wins" semantics: if the same name was captured at
    /// several depths, the deepest capture is returned.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All captured parameters in capture order.
    #[must_use]
    pub fn params(&self) -> &[(Arc<str>, String)] {
        &self.params
    }

    /// Convert params to a `HashMap`. Allocates; prefer [`param`](Self::param).
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Typed per-request data.
    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Mutable typed per-request data.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl ParamSink for RequestContext {
    fn insert_param(&mut self, name: &str, value: String) {
        self.params.push((Arc::from(name), value));
    }
}
