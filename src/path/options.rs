use serde::{Deserialize, Serialize};

use super::PathCursor;

/// Default separator between path segments.
pub const DEFAULT_PATH_SEPARATOR: &str = "/";

/// Default separator between the last segment and its extension.
pub const DEFAULT_EXTENSION_SEPARATOR: &str = ".";

/// Tokenizer settings used to turn a raw path string into a [`PathCursor`].
///
/// An empty string in either separator field means "no separator", same as `None`.
/// When `allowed_extensions` is empty every extension is accepted, otherwise the
/// candidate extension must be one of the listed values (compared according to
/// `extension_case_sensitive`).
///
/// # Example
///
/// ```rust
/// use brrtpath::path::PathOptions;
///
/// let options = PathOptions::default()
///     .extension_separator(".")
///     .allowed_extensions(&["html", "json"])
///     .case_sensitive(false);
///
/// let cursor = options.parse("/pets/list.JSON");
/// assert_eq!(cursor.extension(), Some("json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Separator between segments (`/` by default)
    pub path_separator: Option<String>,
    /// Separator between the last segment and its extension (disabled by default)
    pub extension_separator: Option<String>,
    /// Extensions that may be extracted; empty means any
    pub allowed_extensions: Vec<String>,
    /// Whether `allowed_extensions` is matched case-sensitively
    pub extension_case_sensitive: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            path_separator: Some(DEFAULT_PATH_SEPARATOR.to_string()),
            extension_separator: None,
            allowed_extensions: Vec::new(),
            extension_case_sensitive: true,
        }
    }
}

impl PathOptions {
    /// Options with explicit separators. Empty strings disable the separator.
    #[must_use]
    pub fn new(path_separator: Option<&str>, extension_separator: Option<&str>) -> Self {
        Self {
            path_separator: normalize(path_separator),
            extension_separator: normalize(extension_separator),
            ..Self::default()
        }
    }

    /// Default separators (`/` and `.`) with an extension allow-list.
    #[must_use]
    pub fn with_extensions(allowed: &[&str], case_sensitive: bool) -> Self {
        Self::default()
            .extension_separator(DEFAULT_EXTENSION_SEPARATOR)
            .allowed_extensions(allowed)
            .case_sensitive(case_sensitive)
    }

    /// Set the path separator. An empty string disables segment splitting.
    #[must_use]
    pub fn path_separator(mut self, separator: &str) -> Self {
        self.path_separator = normalize(Some(separator));
        self
    }

    /// Set the extension separator. An empty string disables extension extraction.
    #[must_use]
    pub fn extension_separator(mut self, separator: &str) -> Self {
        self.extension_separator = normalize(Some(separator));
        self
    }

    /// Replace the extension allow-list.
    #[must_use]
    pub fn allowed_extensions(mut self, allowed: &[&str]) -> Self {
        self.allowed_extensions = allowed.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Choose whether the allow-list is matched case-sensitively.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.extension_case_sensitive = case_sensitive;
        self
    }

    /// Tokenize `path` with these options.
    #[must_use]
    pub fn parse(&self, path: &str) -> PathCursor {
        PathCursor::parse(path, self)
    }

    /// Effective path separator (`None` when disabled).
    #[must_use]
    pub fn effective_path_separator(&self) -> Option<&str> {
        self.path_separator.as_deref().filter(|s| !s.is_empty())
    }

    /// Effective extension separator (`None` when disabled).
    #[must_use]
    pub fn effective_extension_separator(&self) -> Option<&str> {
        self.extension_separator.as_deref().filter(|s| !s.is_empty())
    }

    /// Look up `candidate` in the allow-list and return the extension to store.
    ///
    /// With an empty allow-list the candidate itself is returned. On a match the
    /// casing of the allow-list entry wins, so a case-insensitive `JSON` against
    /// `json` yields `json`.
    pub(crate) fn accept_extension(&self, candidate: &str) -> Option<String> {
        if self.allowed_extensions.is_empty() {
            return Some(candidate.to_string());
        }

        self.allowed_extensions
            .iter()
            .find(|allowed| {
                if self.extension_case_sensitive {
                    allowed.as_str() == candidate
                } else {
                    allowed.to_lowercase() == candidate.to_lowercase()
                }
            })
            .cloned()
    }
}

pub(crate) fn normalize(separator: Option<&str>) -> Option<String> {
    separator.filter(|s| !s.is_empty()).map(str::to_string)
}
