//! # Runtime Configuration Module
//!
//! Resolver settings loaded from a YAML file and/or environment variables.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Example |
//! |----------|-------|---------|
//! | `BRRTPATH_PATH_SEPARATOR` | `path.path_separator` | `/` |
//! | `BRRTPATH_EXTENSION_SEPARATOR` | `path.extension_separator` | `.` |
//! | `BRRTPATH_ALLOWED_EXTENSIONS` | `path.allowed_extensions` | `html,json,rss` |
//! | `BRRTPATH_EXTENSION_CASE_SENSITIVE` | `path.extension_case_sensitive` | `false` |
//! | `BRRTPATH_SLOW_MATCH_US` | `slow_match_threshold_us` | `1000` |
//!
//! An empty separator variable disables that separator. Values that fail to
//! parse are ignored with a warning and the previous value is kept.
//!
//! ## Usage
//!
//! ```rust
//! use brrtpath::runtime_config::ResolverConfig;
//!
//! let config = ResolverConfig::from_env();
//! println!("Slow match threshold: {:?}", config.slow_match_threshold());
//! ```
//!
//! ## Example Configuration
//!
//! ```yaml
//! path:
//!   path_separator: "/"
//!   extension_separator: "."
//!   allowed_extensions: [html, json]
//!   extension_case_sensitive: false
//! slow_match_threshold_us: 500
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::path::PathOptions;

/// Default slow-match threshold in microseconds.
pub const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Settings for a [`Resolver`](crate::resolver::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// How incoming paths are tokenized
    pub path: PathOptions,
    /// Resolutions slower than this are logged at `warn` (default: 1000 µs)
    pub slow_match_threshold_us: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            path: PathOptions::default(),
            slow_match_threshold_us: DEFAULT_SLOW_MATCH_US,
        }
    }
}

impl ResolverConfig {
    /// Defaults overridden by `BRRTPATH_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed or has wrongly typed fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse resolver config YAML")
    }

    /// Load a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolver config {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid resolver config {}", path.display()))?;
        Ok(config.with_overrides(|name| env::var(name).ok()))
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sep) = lookup("BRRTPATH_PATH_SEPARATOR") {
            self.path = self.path.path_separator(&sep);
        }
        if let Some(sep) = lookup("BRRTPATH_EXTENSION_SEPARATOR") {
            self.path = self.path.extension_separator(&sep);
        }
        if let Some(list) = lookup("BRRTPATH_ALLOWED_EXTENSIONS") {
            self.path.allowed_extensions = list
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup("BRRTPATH_EXTENSION_CASE_SENSITIVE") {
            match parse_bool(&value) {
                Some(flag) => self.path.extension_case_sensitive = flag,
                None => warn!(
                    variable = "BRRTPATH_EXTENSION_CASE_SENSITIVE",
                    value = %value,
                    "Ignoring invalid boolean"
                ),
            }
        }
        if let Some(value) = lookup("BRRTPATH_SLOW_MATCH_US") {
            match value.trim().parse() {
                Ok(us) => self.slow_match_threshold_us = us,
                Err(_) => warn!(
                    variable = "BRRTPATH_SLOW_MATCH_US",
                    value = %value,
                    "Ignoring invalid threshold"
                ),
            }
        }
        self
    }

    /// The slow-match threshold as a [`Duration`].
    #[must_use]
    pub fn slow_match_threshold(&self) -> Duration {
        Duration::from_micros(self.slow_match_threshold_us)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
