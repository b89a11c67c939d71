use std::sync::Arc;

use super::core::{Node, NodeValue};
use crate::key::NodeKey;

/// Hook applied to every key and value the builder stages.
///
/// Nodes passed in ready-made through `add_node` are left untouched.
pub trait NodeCallback<V, C>: Send + Sync {
    /// Replace or adjust a key before it is stored.
    fn on_key(&self, key: NodeKey<C>) -> NodeKey<C> {
        key
    }

    /// Replace or adjust a value before it is stored.
    fn on_value(&self, value: V) -> V {
        value
    }
}

/// Collects the children of one staged node.
///
/// Handed to [`NodeValue::init_node`] so a value can contribute children to
/// the node it is stored in.
pub struct ChildStage<V, C> {
    children: Vec<Node<V, C>>,
    callback: Option<Arc<dyn NodeCallback<V, C>>>,
}

impl<V, C> ChildStage<V, C>
where
    V: NodeValue<C>,
{
    fn new(callback: Option<Arc<dyn NodeCallback<V, C>>>) -> Self {
        Self {
            children: Vec::new(),
            callback,
        }
    }

    /// Stage a child from a key and value.
    ///
    /// The callback (if any) runs first, then the resulting value's
    /// [`init_node`](NodeValue::init_node) stages the child's own children.
    pub fn add_child(&mut self, key: impl Into<NodeKey<C>>, value: V) -> &mut Self {
        let child = stage(key.into(), value, self.callback.clone());
        self.children.push(child);
        self
    }

    /// Append a ready-made node as-is.
    pub fn add_node(&mut self, node: Node<V, C>) -> &mut Self {
        self.children.push(node);
        self
    }

    /// Number of children staged so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when nothing has been staged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn apply<V, C>(
    key: NodeKey<C>,
    value: V,
    callback: Option<&dyn NodeCallback<V, C>>,
) -> (NodeKey<C>, V) {
    match callback {
        Some(cb) => (cb.on_key(key), cb.on_value(value)),
        None => (key, value),
    }
}

fn stage<V, C>(
    key: NodeKey<C>,
    value: V,
    callback: Option<Arc<dyn NodeCallback<V, C>>>,
) -> Node<V, C>
where
    V: NodeValue<C>,
{
    let (key, value) = apply(key, value, callback.as_deref());
    let mut children = ChildStage::new(callback);
    value.init_node(&mut children);
    Node::new(key, value, children.children)
}

/// Staged, chainable assembly of a [`Node`] tree.
///
/// ```rust
/// use brrtpath::node::NodeBuilder;
/// use std::collections::HashMap;
///
/// let root = NodeBuilder::<&str, HashMap<String, String>>::new(None::<&str>, "home")
///     .add_child("about", "about page")
///     .add_child("contact", "contact page")
///     .build();
///
/// assert_eq!(root.child_count(), 2);
/// assert_eq!(root.children()[1].key().as_str(), Some("contact"));
/// ```
pub struct NodeBuilder<V, C> {
    key: NodeKey<C>,
    value: V,
    children: ChildStage<V, C>,
}

impl<V, C> NodeBuilder<V, C>
where
    V: NodeValue<C>,
{
    /// Start a tree whose root has `key` and `value`.
    pub fn new(key: impl Into<NodeKey<C>>, value: V) -> Self {
        Self::staged(key.into(), value, None)
    }

    /// Start a tree where every staged key and value passes through `callback`,
    /// the root's included.
    pub fn with_callback(
        key: impl Into<NodeKey<C>>,
        value: V,
        callback: impl NodeCallback<V, C> + 'static,
    ) -> Self {
        Self::staged(key.into(), value, Some(Arc::new(callback)))
    }

    fn staged(key: NodeKey<C>, value: V, callback: Option<Arc<dyn NodeCallback<V, C>>>) -> Self {
        let (key, value) = apply(key, value, callback.as_deref());
        let mut children = ChildStage::new(callback);
        value.init_node(&mut children);
        Self {
            key,
            value,
            children,
        }
    }

    /// Add a child built from `key` and `value`.
    #[must_use]
    pub fn add_child(mut self, key: impl Into<NodeKey<C>>, value: V) -> Self {
        self.children.add_child(key, value);
        self
    }

    /// Add a ready-made child node.
    #[must_use]
    pub fn add_node(mut self, node: Node<V, C>) -> Self {
        self.children.add_node(node);
        self
    }

    /// Finish the tree.
    #[must_use]
    pub fn build(self) -> Node<V, C> {
        Node::new(self.key, self.value, self.children.children)
    }
}

impl<V, C> Default for NodeBuilder<V, C>
where
    V: NodeValue<C> + Default,
{
    fn default() -> Self {
        Self::new(NodeKey::None, V::default())
    }
}
