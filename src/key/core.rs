use std::fmt;
use std::sync::Arc;

use crate::path::PathCursor;

/// A key that decides programmatically whether it matches the current
/// traversal step.
///
/// The resolver only consults dynamic keys after no child with an equal static
/// key was found (tier 2), in child order; the first key returning `true` wins.
///
/// # Cursor movement
///
/// `matches` is solely responsible for moving `path`. A key matching one
/// segment advances once; a key swallowing the rest of the path calls
/// [`PathCursor::end`]. When `matches` returns `false` the resolver rolls the
/// cursor back to where it was before the call.
///
/// # Side effects
///
/// `matches` may write into the request context, for example to capture a path
/// parameter or cache a looked-up entity for the matched node's consumers. It
/// must not depend on anything beyond `path` and `ctx`.
///
/// # Example
///
/// ```rust
/// use brrtpath::key::DynamicKey;
/// use brrtpath::path::PathCursor;
///
/// /// Matches purely numeric segments.
/// struct NumericKey;
///
/// impl DynamicKey<Vec<u64>> for NumericKey {
///     fn name(&self) -> &str {
///         "{number}"
///     }
///
///     fn matches(&self, path: &mut PathCursor, ctx: &mut Vec<u64>) -> bool {
///         let Ok(Ok(number)) = path.peek_next().map(|s| s.parse::<u64>()) else {
///             return false;
///         };
///         ctx.push(number);
///         path.skip_next()
///     }
/// }
/// ```
pub trait DynamicKey<C>: Send + Sync {
    /// Stable display identifier, used in link listings and logs.
    fn name(&self) -> &str;

    /// Up to `limit` concrete key values this key represents, when it can
    /// enumerate them. `None` means enumeration is not supported.
    fn matching_keys(&self, _limit: usize) -> Option<Vec<String>> {
        None
    }

    /// Decide whether the current step continues into the node owning this key.
    fn matches(&self, path: &mut PathCursor, ctx: &mut C) -> bool;
}

impl<C> fmt::Debug for dyn DynamicKey<C> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynamicKey").field(&self.name()).finish()
    }
}

/// Access check carried by a node value.
///
/// Queried for every node entered during traversal, the root included, before
/// the next segment is matched. Returning `false` ends the resolution with
/// [`Outcome::Denied`](crate::resolver::Outcome::Denied), so an ancestor can
/// gate a whole subtree.
pub trait Restrictable<C> {
    /// Whether the node (and everything below it) is reachable for `ctx`.
    fn is_available(&self, ctx: &C) -> bool;
}

/// Key of a tree node.
pub enum NodeKey<C> {
    /// No key: the node can only be the root or be reached by position
    None,
    /// Matched by string equality against the next segment
    Static(Arc<str>),
    /// Matched by a [`DynamicKey`] predicate
    Dynamic(Arc<dyn DynamicKey<C>>),
}

impl<C> NodeKey<C> {
    /// Wrap a dynamic key.
    pub fn dynamic<K>(key: K) -> Self
    where
        K: DynamicKey<C> + 'static,
    {
        NodeKey::Dynamic(Arc::new(key))
    }

    /// The static key string, if this is a static key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeKey::Static(key) => Some(key),
            _ => None,
        }
    }

    /// The dynamic key, if this is a dynamic key.
    #[inline]
    #[must_use]
    pub fn as_dynamic(&self) -> Option<&dyn DynamicKey<C>> {
        match self {
            NodeKey::Dynamic(key) => Some(key.as_ref()),
            _ => None,
        }
    }

    /// Returns `true` for [`NodeKey::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, NodeKey::None)
    }

    /// Segment text used when listing links: the static key, the dynamic key's
    /// name, or `None` for keyless nodes.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            NodeKey::None => None,
            NodeKey::Static(key) => Some(key),
            NodeKey::Dynamic(key) => Some(key.name()),
        }
    }
}

impl<C> Clone for NodeKey<C> {
    fn clone(&self) -> Self {
        match self {
            NodeKey::None => NodeKey::None,
            NodeKey::Static(key) => NodeKey::Static(Arc::clone(key)),
            NodeKey::Dynamic(key) => NodeKey::Dynamic(Arc::clone(key)),
        }
    }
}

impl<C> Default for NodeKey<C> {
    fn default() -> Self {
        NodeKey::None
    }
}

impl<C> fmt::Debug for NodeKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::None => f.write_str("None"),
            NodeKey::Static(key) => f.debug_tuple("Static").field(key).finish(),
            NodeKey::Dynamic(key) => f.debug_tuple("Dynamic").field(&key.name()).finish(),
        }
    }
}

impl<C> fmt::Display for NodeKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => f.write_str(name),
            None => f.write_str("null"),
        }
    }
}

impl<C> From<&str> for NodeKey<C> {
    fn from(key: &str) -> Self {
        NodeKey::Static(Arc::from(key))
    }
}

impl<C> From<String> for NodeKey<C> {
    fn from(key: String) -> Self {
        NodeKey::Static(Arc::from(key))
    }
}

impl<C> From<Option<&str>> for NodeKey<C> {
    fn from(key: Option<&str>) -> Self {
        key.map_or(NodeKey::None, NodeKey::from)
    }
}

impl<C> From<Arc<dyn DynamicKey<C>>> for NodeKey<C> {
    fn from(key: Arc<dyn DynamicKey<C>>) -> Self {
        NodeKey::Dynamic(key)
    }
}
