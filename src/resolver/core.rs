use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::node::{Node, NodeValue};
use crate::path::{PathCursor, PathOptions};
use crate::runtime_config::ResolverConfig;

/// Maximum trail depth stored inline before spilling to the heap.
pub const MAX_INLINE_TRAIL: usize = 8;

/// Nodes passed through on the way to the terminal outcome, root first.
pub type Trail<'a, V, C> = SmallVec<[&'a Node<V, C>; MAX_INLINE_TRAIL]>;

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every segment was consumed; the terminal node is available.
    Found,
    /// No child of the current node accepted the next segment.
    NotFound,
    /// A node's restriction check refused access.
    Denied,
}

impl Outcome {
    /// Lower-case name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Found => "found",
            Outcome::NotFound => "not_found",
            Outcome::Denied => "denied",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of walking a path through a tree.
///
/// NotFound and Denied are ordinary outcomes, not errors. The trail holds the
/// nodes matched *before* the node where traversal stopped, so a denial at the
/// first child of the root yields a trail of `[root]`.
pub struct Resolution<'a, V, C> {
    root: &'a Node<V, C>,
    node: Option<&'a Node<V, C>>,
    stopped_at: &'a Node<V, C>,
    trail: Trail<'a, V, C>,
    outcome: Outcome,
}

impl<'a, V, C> Resolution<'a, V, C> {
    fn finish(
        root: &'a Node<V, C>,
        stopped_at: &'a Node<V, C>,
        trail: Trail<'a, V, C>,
        outcome: Outcome,
    ) -> Self {
        let node = (outcome == Outcome::Found).then_some(stopped_at);
        Self {
            root,
            node,
            stopped_at,
            trail,
            outcome,
        }
    }

    /// The tree root the resolution started from.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &'a Node<V, C> {
        self.root
    }

    /// The terminal node, present only for [`Outcome::Found`].
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<&'a Node<V, C>> {
        self.node
    }

    /// The terminal node's value, present only for [`Outcome::Found`].
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(Node::value)
    }

    /// The node traversal ended at, whatever the outcome.
    ///
    /// For NotFound this is the node none of whose children matched; for
    /// Denied it is the node whose restriction refused access.
    #[must_use]
    pub fn stopped_at(&self) -> &'a Node<V, C> {
        self.stopped_at
    }

    /// Nodes matched before the node traversal stopped at, root first.
    #[inline]
    #[must_use]
    pub fn trail(&self) -> &[&'a Node<V, C>] {
        &self.trail
    }

    /// Number of nodes in the trail.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// How the resolution ended.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns `true` for [`Outcome::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    /// Take ownership of the trail.
    #[must_use]
    pub fn into_trail(self) -> Trail<'a, V, C> {
        self.trail
    }
}

impl<V: fmt::Debug, C> fmt::Debug for Resolution<'_, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("outcome", &self.outcome)
            .field("node", &self.node.map(ToString::to_string))
            .field("stopped_at", &self.stopped_at.to_string())
            .field("depth", &self.trail.len())
            .finish()
    }
}

fn is_denied<V, C>(node: &Node<V, C>, ctx: &C) -> bool
where
    V: NodeValue<C>,
{
    node.value()
        .restriction()
        .is_some_and(|restriction| !restriction.is_available(ctx))
}

fn match_static<'a, V, C>(node: &'a Node<V, C>, path: &mut PathCursor) -> Option<&'a Node<V, C>> {
    let child = {
        let segment = path.peek_next().ok()?;
        node.children()
            .iter()
            .find(|child| child.key().as_str() == Some(segment.as_ref()))?
    };
    path.skip_next();
    Some(child)
}

fn match_dynamic<'a, V, C>(
    node: &'a Node<V, C>,
    path: &mut PathCursor,
    ctx: &mut C,
) -> Option<&'a Node<V, C>> {
    for child in node.children() {
        let Some(key) = child.key().as_dynamic() else {
            continue;
        };
        let mark = path.mark();
        if key.matches(path, ctx) {
            return Some(child);
        }
        path.reset(mark);
    }
    None
}

/// Walk `path` from `root`, returning where it ends up.
///
/// At each node, while segments remain:
///
/// 1. the node's restriction (if any) is checked against `ctx`;
/// 2. the first child whose static key equals the next segment is taken, and
///    the cursor advances past that segment;
/// 3. failing that, the first child whose [`DynamicKey`](crate::key::DynamicKey)
///    accepts the cursor is taken, with the key responsible for cursor movement;
/// 4. failing that, the result is [`Outcome::NotFound`], cursor left at the
///    unmatched segment.
///
/// Once segments run out, the terminal node's restriction is checked too.
///
/// ```rust
/// use brrtpath::key::{NodeKey, ParamKey};
/// use brrtpath::node::Node;
/// use brrtpath::path::PathCursor;
/// use brrtpath::resolver::{resolve, Outcome};
/// use std::collections::HashMap;
///
/// let root = Node::new(NodeKey::None, "root", vec![
///     Node::new("users", "user list", vec![
///         Node::leaf(NodeKey::dynamic(ParamKey::new("id")), "user page"),
///     ]),
/// ]);
///
/// let mut params: HashMap<String, String> = HashMap::new();
/// let mut path = PathCursor::new("/users/42");
/// let found = resolve(&root, &mut path, &mut params);
///
/// assert_eq!(found.outcome(), Outcome::Found);
/// assert_eq!(found.value(), Some(&"user page"));
/// assert_eq!(found.depth(), 2);
/// assert_eq!(params["id"], "42");
/// ```
pub fn resolve<'a, V, C>(
    root: &'a Node<V, C>,
    path: &mut PathCursor,
    ctx: &mut C,
) -> Resolution<'a, V, C>
where
    V: NodeValue<C>,
{
    let mut current = root;
    let mut trail = Trail::new();

    while path.has_next() {
        if is_denied(current, ctx) {
            return Resolution::finish(root, current, trail, Outcome::Denied);
        }

        let next = match match_static(current, path) {
            Some(child) => Some(child),
            None => match_dynamic(current, path, ctx),
        };

        match next {
            Some(child) => {
                trail.push(current);
                current = child;
            }
            None => return Resolution::finish(root, current, trail, Outcome::NotFound),
        }
    }

    if is_denied(current, ctx) {
        return Resolution::finish(root, current, trail, Outcome::Denied);
    }
    Resolution::finish(root, current, trail, Outcome::Found)
}

/// Default threshold above which a resolution is logged as slow.
pub const DEFAULT_SLOW_MATCH_THRESHOLD: Duration = Duration::from_millis(1);

/// Shareable resolution entry point for one tree.
///
/// Owns the root behind an `Arc` together with the [`PathOptions`] used to
/// parse incoming paths, and logs every resolution through `tracing`.
/// Cloning is cheap and clones share the tree.
///
/// # Example
///
/// ```rust
/// use brrtpath::context::RequestContext;
/// use brrtpath::key::{NodeKey, ParamKey};
/// use brrtpath::node::Node;
/// use brrtpath::path::PathOptions;
/// use brrtpath::resolver::{Outcome, Resolver};
/// use http::Method;
///
/// let root = Node::new(NodeKey::None, "home", vec![
///     Node::new("reports", "reports", vec![
///         Node::leaf(NodeKey::dynamic(ParamKey::new("report")), "report"),
///     ]),
/// ]);
/// let resolver = Resolver::new(root)
///     .with_options(PathOptions::default().extension_separator("."));
///
/// let mut ctx = RequestContext::new(Method::GET, "/reports/q3.pdf");
/// let resolution = resolver.resolve("/reports/q3.pdf", &mut ctx);
///
/// assert_eq!(resolution.outcome(), Outcome::Found);
/// assert_eq!(ctx.param("report"), Some("q3"));
/// ```
pub struct Resolver<V, C> {
    root: Arc<Node<V, C>>,
    options: PathOptions,
    slow_match_threshold: Duration,
}

impl<V, C> Resolver<V, C>
where
    V: NodeValue<C>,
{
    /// Resolver over `root` with default path options.
    pub fn new(root: Node<V, C>) -> Self {
        Self::from_arc(Arc::new(root))
    }

    /// Resolver over an already shared root.
    pub fn from_arc(root: Arc<Node<V, C>>) -> Self {
        Self {
            root,
            options: PathOptions::default(),
            slow_match_threshold: DEFAULT_SLOW_MATCH_THRESHOLD,
        }
    }

    /// Replace the path options used by [`resolve`](Self::resolve).
    #[must_use]
    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    /// Apply path options and the slow-match threshold from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &ResolverConfig) -> Self {
        self.options = config.path.clone();
        self.slow_match_threshold = config.slow_match_threshold();
        self
    }

    /// The shared tree root.
    #[must_use]
    pub fn root(&self) -> &Arc<Node<V, C>> {
        &self.root
    }

    /// Path options used to parse incoming paths.
    #[must_use]
    pub fn options(&self) -> &PathOptions {
        &self.options
    }

    /// Threshold above which a resolution is logged at `warn`.
    #[must_use]
    pub fn slow_match_threshold(&self) -> Duration {
        self.slow_match_threshold
    }

    /// Parse `path` with this resolver's options.
    #[must_use]
    pub fn cursor(&self, path: &str) -> PathCursor {
        self.options.parse(path)
    }

    /// Parse and resolve a raw request path.
    pub fn resolve(&self, path: &str, ctx: &mut C) -> Resolution<'_, V, C> {
        let mut cursor = self.cursor(path);
        self.resolve_cursor(&mut cursor, ctx)
    }

    /// Resolve a prepared cursor.
    ///
    /// The cursor is left where traversal stopped, so after NotFound
    /// [`PathCursor::path_from_current`] gives the unmatched remainder.
    pub fn resolve_cursor(&self, path: &mut PathCursor, ctx: &mut C) -> Resolution<'_, V, C> {
        debug!(
            path = %path,
            segments = path.len(),
            "Path resolution attempt"
        );

        let start = Instant::now();
        let resolution = resolve(&self.root, path, ctx);
        let duration = start.elapsed();

        let outcome = resolution.outcome();
        let node = resolution.stopped_at();
        match outcome {
            Outcome::Found if duration > self.slow_match_threshold => {
                warn!(
                    path = %path,
                    outcome = %outcome,
                    node = %node.key(),
                    depth = resolution.depth(),
                    duration_us = duration.as_micros(),
                    threshold_us = self.slow_match_threshold.as_micros(),
                    "Slow path resolution detected"
                );
            }
            Outcome::Found => {
                info!(
                    path = %path,
                    outcome = %outcome,
                    node = %node.key(),
                    depth = resolution.depth(),
                    duration_us = duration.as_micros(),
                    "Path resolved"
                );
            }
            Outcome::NotFound => {
                warn!(
                    path = %path,
                    outcome = %outcome,
                    stopped_at = %node.key(),
                    unmatched = %path.path_from_current(),
                    depth = resolution.depth(),
                    duration_us = duration.as_micros(),
                    "No node matched path"
                );
            }
            Outcome::Denied => {
                warn!(
                    path = %path,
                    outcome = %outcome,
                    stopped_at = %node.key(),
                    depth = resolution.depth(),
                    duration_us = duration.as_micros(),
                    "Path resolution denied"
                );
            }
        }

        resolution
    }
}

impl<V, C> Clone for Resolver<V, C> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            options: self.options.clone(),
            slow_match_threshold: self.slow_match_threshold,
        }
    }
}

impl<V, C> fmt::Debug for Resolver<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("root_children", &self.root.child_count())
            .field("options", &self.options)
            .field("slow_match_threshold", &self.slow_match_threshold)
            .finish()
    }
}
