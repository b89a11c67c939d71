use anyhow::{bail, Context, Result};

use super::types::TreeDef;
use crate::key::NodeKey;
use crate::node::{Node, NodeBuilder, NodeValue};
use crate::registry::Registry;

impl TreeDef {
    /// Build the tree, resolving value and key names through `registry`.
    ///
    /// Every node is staged through [`NodeBuilder`], so values that add their
    /// own children via [`NodeValue::init_node`] get them ahead of the
    /// declared children.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending entry when a value or key name is
    /// unknown, a key factory rejects its argument, or an entry declares more
    /// than one kind of key.
    pub fn build<V, C>(&self, registry: &Registry<V, C>) -> Result<Node<V, C>>
    where
        V: NodeValue<C> + Default,
    {
        self.build_at(registry, "")
    }

    fn build_at<V, C>(&self, registry: &Registry<V, C>, parent: &str) -> Result<Node<V, C>>
    where
        V: NodeValue<C> + Default,
    {
        let label = self.label();
        let location = if label.is_empty() {
            parent.to_string()
        } else {
            format!("{parent}/{label}")
        };
        let shown = if location.is_empty() { "/" } else { &location };

        let key = self
            .node_key(registry)
            .with_context(|| format!("Invalid key at '{shown}'"))?;
        let value = match &self.value {
            Some(name) => registry
                .make_value(name)
                .with_context(|| format!("Invalid value at '{shown}'"))?,
            None => V::default(),
        };

        let mut builder = NodeBuilder::new(key, value);
        for child in &self.children {
            builder = builder.add_node(child.build_at(registry, &location)?);
        }
        Ok(builder.build())
    }

    fn node_key<V, C>(&self, registry: &Registry<V, C>) -> Result<NodeKey<C>> {
        match (&self.key, &self.param, &self.dynamic) {
            (None, None, None) => Ok(NodeKey::None),
            (Some(key), None, None) => Ok(NodeKey::from(key.as_str())),
            (None, Some(param), None) => Ok(registry.make_key("param", Some(param))?.into()),
            (None, None, Some(dynamic)) => Ok(registry
                .make_key(&dynamic.kind, dynamic.arg.as_deref())?
                .into()),
            _ => bail!("Only one of 'key', 'param' and 'dynamic' may be set"),
        }
    }
}
