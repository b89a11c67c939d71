//! # Registry Module
//!
//! Named factories used to turn a declarative [`TreeDef`](crate::tree::TreeDef)
//! into a live tree.
//!
//! A tree definition refers to values and dynamic keys by name only. The
//! registry maps those names to constructors supplied by the application, so
//! nothing is discovered implicitly and every name a definition uses must be
//! registered up front.
//!
//! ## Built-in keys
//!
//! [`Registry::with_builtin_keys`] pre-registers the ready-made keys for
//! contexts implementing [`ParamSink`]:
//!
//! | Kind | Argument | Key |
//! |------|----------|-----|
//! | `param` | `name` | [`ParamKey`] |
//! | `pattern` | `name:regex` | [`PatternKey`] |
//! | `choice` | `name:a,b,c` | [`ChoiceKey`] |
//! | `remainder` | `name` | [`RemainderKey`] |
//!
//! ## Example
//!
//! ```rust
//! use brrtpath::context::RequestContext;
//! use brrtpath::registry::Registry;
//!
//! let registry = Registry::<String, RequestContext>::with_builtin_keys()
//!     .value("home", || "Home page".to_string())
//!     .value("user", || "User profile".to_string());
//!
//! assert_eq!(registry.make_value("home").unwrap(), "Home page");
//! assert_eq!(registry.make_key("param", Some("id")).unwrap().name(), "{id}");
//! assert!(registry.make_value("missing").is_err());
//! ```

use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::ParamSink;
use crate::key::{ChoiceKey, DynamicKey, ParamKey, PatternKey, RemainderKey};

/// Constructor for a named node value.
pub type ValueFactory<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Fallback constructor receiving the requested value name.
pub type NamedValueFactory<V> = Arc<dyn Fn(&str) -> V + Send + Sync>;

/// Constructor for a named dynamic key, given the optional argument from the
/// tree definition.
pub type KeyFactory<C> = Arc<dyn Fn(Option<&str>) -> Result<Arc<dyn DynamicKey<C>>> + Send + Sync>;

/// Name → factory tables for values and dynamic keys.
pub struct Registry<V, C> {
    values: HashMap<String, ValueFactory<V>>,
    fallback: Option<NamedValueFactory<V>>,
    keys: HashMap<String, KeyFactory<C>>,
}

impl<V, C> Default for Registry<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> Registry<V, C> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            fallback: None,
            keys: HashMap::new(),
        }
    }

    /// Register a value factory under `name`, replacing any previous one.
    #[must_use]
    pub fn value<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.values.insert(name.to_string(), Arc::new(factory));
        self
    }

    /// Build values for names without a registered factory from the name itself.
    #[must_use]
    pub fn fallback_value<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(factory));
        self
    }

    /// Register a dynamic-key factory under `kind`, replacing any previous one.
    #[must_use]
    pub fn key<F>(mut self, kind: &str, factory: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<Arc<dyn DynamicKey<C>>> + Send + Sync + 'static,
    {
        self.keys.insert(kind.to_string(), Arc::new(factory));
        self
    }

    /// Build the value registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when `name` is unknown and no fallback is set.
    pub fn make_value(&self, name: &str) -> Result<V> {
        if let Some(factory) = self.values.get(name) {
            return Ok(factory());
        }
        match &self.fallback {
            Some(fallback) => Ok(fallback(name)),
            None => Err(anyhow!(
                "Unknown node value '{name}' (registered: {:?})",
                sorted(self.values.keys())
            )),
        }
    }

    /// Build a dynamic key of `kind` with `arg`.
    ///
    /// # Errors
    ///
    /// Returns an error when `kind` is unknown or its factory rejects `arg`.
    pub fn make_key(&self, kind: &str, arg: Option<&str>) -> Result<Arc<dyn DynamicKey<C>>> {
        let factory = self.keys.get(kind).ok_or_else(|| {
            anyhow!(
                "Unknown dynamic key kind '{kind}' (registered: {:?})",
                sorted(self.keys.keys())
            )
        })?;
        factory(arg).with_context(|| format!("Failed to create dynamic key '{kind}'"))
    }

    /// Whether a value factory is registered under `name`.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether a key factory is registered under `kind`.
    #[must_use]
    pub fn has_key(&self, kind: &str) -> bool {
        self.keys.contains_key(kind)
    }
}

impl<V, C> Registry<V, C>
where
    C: ParamSink + 'static,
{
    /// A registry with the built-in `param`, `pattern`, `choice` and
    /// `remainder` key kinds.
    #[must_use]
    pub fn with_builtin_keys() -> Self {
        Self::new()
            .key("param", |arg| {
                let name = required(arg, "param")?;
                Ok(Arc::new(ParamKey::new(name)) as Arc<dyn DynamicKey<C>>)
            })
            .key("pattern", |arg| {
                let (name, pattern) = split_arg(required(arg, "pattern")?, "pattern")?;
                let key = PatternKey::new(name, pattern)
                    .with_context(|| format!("Invalid pattern '{pattern}'"))?;
                Ok(Arc::new(key) as Arc<dyn DynamicKey<C>>)
            })
            .key("choice", |arg| {
                let (name, choices) = split_arg(required(arg, "choice")?, "choice")?;
                let choices = choices.split(',').map(str::trim).filter(|c| !c.is_empty());
                Ok(Arc::new(ChoiceKey::new(name, choices)) as Arc<dyn DynamicKey<C>>)
            })
            .key("remainder", |arg| {
                let name = required(arg, "remainder")?;
                Ok(Arc::new(RemainderKey::new(name)) as Arc<dyn DynamicKey<C>>)
            })
    }
}

impl<V, C> fmt::Debug for Registry<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("values", &sorted(self.values.keys()))
            .field("fallback", &self.fallback.is_some())
            .field("keys", &sorted(self.keys.keys()))
            .finish()
    }
}

fn sorted<'a>(names: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.map(String::as_str).collect();
    names.sort_unstable();
    names
}

fn required<'a>(arg: Option<&'a str>, kind: &str) -> Result<&'a str> {
    match arg.map(str::trim) {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => bail!("Key kind '{kind}' requires an argument"),
    }
}

fn split_arg<'a>(arg: &'a str, kind: &str) -> Result<(&'a str, &'a str)> {
    match arg.split_once(':') {
        Some((name, rest)) if !name.is_empty() => Ok((name, rest)),
        _ => bail!("Key kind '{kind}' expects 'name:value', got '{arg}'"),
    }
}
