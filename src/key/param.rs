//! Ready-made dynamic keys.
//!
//! These cover the common matching policies (single-segment parameters,
//! pattern-restricted parameters, fixed choices and "rest of the path") on top
//! of the [`DynamicKey`] extension point. The resolver knows nothing about
//! them; they are ordinary implementations.

use regex::Regex;
use std::sync::Arc;

use super::core::DynamicKey;
use crate::context::ParamSink;
use crate::path::PathCursor;

fn braced(name: &str) -> String {
    format!("{{{name}}}")
}

/// Matches any single segment and captures it under `name`.
///
/// Displayed as `{name}` in link listings.
#[derive(Debug, Clone)]
pub struct ParamKey {
    name: Arc<str>,
    display: String,
}

impl ParamKey {
    /// Capture the segment under `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            display: braced(name),
        }
    }

    /// Parameter name the segment is stored under.
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.name
    }
}

impl<C: ParamSink> DynamicKey<C> for ParamKey {
    fn name(&self) -> &str {
        &self.display
    }

    fn matches(&self, path: &mut PathCursor, ctx: &mut C) -> bool {
        match path.advance() {
            Ok(segment) => {
                ctx.insert_param(&self.name, segment.into_owned());
                true
            }
            Err(_) => false,
        }
    }
}

/// Matches a single segment against a regular expression and captures it.
///
/// The pattern is anchored at both ends, so `[0-9]+` only accepts segments
/// consisting entirely of digits.
#[derive(Debug, Clone)]
pub struct PatternKey {
    name: Arc<str>,
    display: String,
    regex: Regex,
}

impl PatternKey {
    /// Compile `pattern` for the parameter `name`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error when `pattern` is invalid.
    pub fn new(name: &str, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            name: Arc::from(name),
            display: braced(name),
            regex,
        })
    }

    /// The anchored expression used for matching.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl<C: ParamSink> DynamicKey<C> for PatternKey {
    fn name(&self) -> &str {
        &self.display
    }

    fn matches(&self, path: &mut PathCursor, ctx: &mut C) -> bool {
        let segment = match path.peek_next() {
            Ok(segment) if self.regex.is_match(&segment) => segment.into_owned(),
            _ => return false,
        };
        ctx.insert_param(&self.name, segment);
        path.skip_next()
    }
}

/// Matches one of a fixed set of literal segments and captures which one.
///
/// Unlike a static key, one node serves all choices, and the choices can be
/// enumerated through [`DynamicKey::matching_keys`].
#[derive(Debug, Clone)]
pub struct ChoiceKey {
    name: Arc<str>,
    display: String,
    choices: Vec<String>,
}

impl ChoiceKey {
    /// Accept any of `choices`, capturing the match under `name`.
    #[must_use]
    pub fn new<I, S>(name: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Arc::from(name),
            display: braced(name),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl<C: ParamSink> DynamicKey<C> for ChoiceKey {
    fn name(&self) -> &str {
        &self.display
    }

    fn matching_keys(&self, limit: usize) -> Option<Vec<String>> {
        Some(self.choices.iter().take(limit).cloned().collect())
    }

    fn matches(&self, path: &mut PathCursor, ctx: &mut C) -> bool {
        let segment = match path.peek_next() {
            Ok(segment) if self.choices.iter().any(|c| c.as_str() == segment) => {
                segment.into_owned()
            }
            _ => return false,
        };
        ctx.insert_param(&self.name, segment);
        path.skip_next()
    }
}

/// Swallows the remainder of the path, extension included.
///
/// The captured value is the rest of the path without its leading separator,
/// e.g. `css/site.css` for `/static/css/site.css` when the key sits under
/// `static`. The cursor is left at the end, so the owning node is always the
/// terminal node.
#[derive(Debug, Clone)]
pub struct RemainderKey {
    name: Arc<str>,
    display: String,
}

impl RemainderKey {
    /// Capture the rest of the path under `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            display: format!("{{{name}*}}"),
        }
    }
}

impl<C: ParamSink> DynamicKey<C> for RemainderKey {
    fn name(&self) -> &str {
        &self.display
    }

    fn matches(&self, path: &mut PathCursor, ctx: &mut C) -> bool {
        if !path.has_next() {
            return false;
        }
        let rest = path.path_from_current();
        let rest = match path.path_separator() {
            Some(sep) => rest.strip_prefix(sep).unwrap_or(&rest).to_string(),
            None => rest,
        };
        ctx.insert_param(&self.name, rest);
        path.end();
        true
    }
}
