use anyhow::{Context, Result};
use std::path::Path;

use super::types::TreeDef;

/// Serialization format of a tree definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// YAML document (`.yaml`, `.yml`)
    Yaml,
    /// JSON document
    Json,
}

impl TreeFormat {
    /// Pick the format from a file extension: `.yaml`/`.yml` is YAML,
    /// anything else JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                TreeFormat::Yaml
            }
            _ => TreeFormat::Json,
        }
    }
}

impl TreeDef {
    /// Parse a definition in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is malformed or contains unknown
    /// fields.
    pub fn parse(content: &str, format: TreeFormat) -> Result<Self> {
        match format {
            TreeFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse tree YAML"),
            TreeFormat::Json => serde_json::from_str(content).context("Failed to parse tree JSON"),
        }
    }
}

/// Load a tree definition from a YAML or JSON file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_tree_def(path: impl AsRef<Path>) -> Result<TreeDef> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree definition {}", path.display()))?;
    TreeDef::parse(&content, TreeFormat::from_path(path))
        .with_context(|| format!("Invalid tree definition {}", path.display()))
}
