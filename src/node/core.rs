use std::fmt;
use std::sync::Arc;

use super::builder::ChildStage;
use crate::key::{NodeKey, Restrictable};

/// Capabilities a node value may expose.
///
/// Both methods default to "not supported", so plain payloads only need an
/// empty `impl`. The resolver asks for [`restriction`](Self::restriction) on
/// every node it enters; [`NodeBuilder`](super::NodeBuilder) calls
/// [`init_node`](Self::init_node) on every value it stages.
///
/// ```rust
/// use brrtpath::key::Restrictable;
/// use brrtpath::node::NodeValue;
/// use brrtpath::context::RequestContext;
///
/// struct AdminPage;
///
/// impl Restrictable<RequestContext> for AdminPage {
///     fn is_available(&self, ctx: &RequestContext) -> bool {
///         ctx.extensions().get::<String>().is_some_and(|role| role == "admin")
///     }
/// }
///
/// impl NodeValue<RequestContext> for AdminPage {
///     fn restriction(&self) -> Option<&dyn Restrictable<RequestContext>> {
///         Some(self)
///     }
/// }
/// ```
pub trait NodeValue<C>: Sized {
    /// The access check for this value, if it has one.
    fn restriction(&self) -> Option<&dyn Restrictable<C>> {
        None
    }

    /// Add children for the node this value is being staged into.
    ///
    /// Called once per staged value, before any explicitly added children.
    fn init_node(&self, _stage: &mut ChildStage<Self, C>) {}
}

macro_rules! plain_node_value {
    ($($ty:ty),* $(,)?) => {
        $(impl<C> NodeValue<C> for $ty {})*
    };
}

plain_node_value!((), bool, i32, i64, u32, u64, usize, String, &'static str);

impl<C, T> NodeValue<C> for Option<T>
where
    T: NodeValue<C>,
{
    fn restriction(&self) -> Option<&dyn Restrictable<C>> {
        self.as_ref().and_then(NodeValue::restriction)
    }
}

impl<C, T> NodeValue<C> for Arc<T>
where
    T: NodeValue<C>,
{
    fn restriction(&self) -> Option<&dyn Restrictable<C>> {
        (**self).restriction()
    }
}

/// An immutable tree node: a key, a value and ordered children.
///
/// Children order is match-priority order. Leaves hold an empty `Vec`, which
/// does not allocate. Nodes have no parent reference; a resolution collects the visited ancestors
/// in its trail instead.
///
/// A `Node` is never mutated after construction and can be read from any
/// number of threads (wrap the root in an `Arc` to share it).
pub struct Node<V, C> {
    key: NodeKey<C>,
    value: V,
    children: Vec<Node<V, C>>,
}

impl<V, C> Node<V, C> {
    /// Create a node with the given children.
    pub fn new(key: impl Into<NodeKey<C>>, value: V, children: Vec<Node<V, C>>) -> Self {
        Self {
            key: key.into(),
            value,
            children,
        }
    }

    /// Create a node without children.
    pub fn leaf(key: impl Into<NodeKey<C>>, value: V) -> Self {
        Self::new(key, value, Vec::new())
    }

    /// The node key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &NodeKey<C> {
        &self.key
    }

    /// The node value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The children, in match-priority order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Node<V, C>] {
        &self.children
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// List every path reachable in this tree, depth first.
    ///
    /// The first entry is `/` for this node itself. Keyless nodes add no
    /// segment; dynamic keys contribute their display name, e.g. `/users/{id}`.
    ///
    /// ```rust
    /// use brrtpath::key::{NodeKey, ParamKey};
    /// use brrtpath::node::Node;
    /// use std::collections::HashMap;
    ///
    /// type Ctx = HashMap<String, String>;
    ///
    /// let root: Node<(), Ctx> = Node::new(NodeKey::None, (), vec![
    ///     Node::new("users", (), vec![Node::leaf(NodeKey::dynamic(ParamKey::new("id")), ())]),
    ///     Node::leaf("login", ()),
    /// ]);
    ///
    /// assert_eq!(root.links(), ["/", "/users", "/users/{id}", "/login"]);
    /// ```
    #[must_use]
    pub fn links(&self) -> Vec<String> {
        let mut links = vec!["/".to_string()];
        let mut prefix = Vec::new();
        for child in &self.children {
            child.collect_links(&mut prefix, &mut links);
        }
        links
    }

    fn collect_links<'a>(&'a self, prefix: &mut Vec<&'a str>, links: &mut Vec<String>) {
        let pushed = match self.key.display_name() {
            Some(name) => {
                prefix.push(name);
                let mut link = String::new();
                for segment in prefix.iter() {
                    link.push('/');
                    link.push_str(segment);
                }
                links.push(link);
                true
            }
            None => false,
        };

        for child in &self.children {
            child.collect_links(prefix, links);
        }

        if pushed {
            prefix.pop();
        }
    }
}

impl<V: fmt::Debug, C> fmt::Debug for Node<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("children", &self.children)
            .finish()
    }
}

impl<V: fmt::Debug, C> fmt::Display for Node<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node@{}={:?} (child nodes: {})",
            self.key,
            self.value,
            self.children.len()
        )
    }
}
