use serde::{Deserialize, Serialize};

/// Dynamic key reference: a registry key kind and its argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamicDef {
    /// Registered key kind, e.g. `pattern`
    pub kind: String,
    /// Kind-specific argument, e.g. `id:[0-9]+`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

/// One node of a declarative tree, with its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeDef {
    /// Static key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Parameter name for a `param` dynamic key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Any registered dynamic key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicDef>,
    /// Registered value name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Children in match-priority order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDef>,
}

impl TreeDef {
    /// Label used in error messages: the static key, `{param}`, `{kind}` or
    /// an empty string for keyless entries.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(key) = &self.key {
            key.clone()
        } else if let Some(param) = &self.param {
            format!("{{{param}}}")
        } else if let Some(dynamic) = &self.dynamic {
            format!("{{{}}}", dynamic.kind)
        } else {
            String::new()
        }
    }

    /// Total number of entries in this subtree, this one included.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeDef::count).sum::<usize>()
    }
}
