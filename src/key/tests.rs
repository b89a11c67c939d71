use std::collections::HashMap;
use std::sync::Arc;

use super::{ChoiceKey, DynamicKey, NodeKey, ParamKey, PatternKey, RemainderKey};
use crate::path::PathCursor;

type Params = HashMap<String, String>;

#[test]
fn test_param_key_captures_one_segment() {
    let key = ParamKey::new("id");
    let mut path = PathCursor::new("/42/posts");
    let mut params = Params::new();

    assert!(DynamicKey::<Params>::matches(&key, &mut path, &mut params));
    assert_eq!(path.position(), 1);
    assert_eq!(params.get("id").map(String::as_str), Some("42"));
    assert_eq!(DynamicKey::<Params>::name(&key), "{id}");
    assert_eq!(key.param_name(), "id");
    assert!(DynamicKey::<Params>::matching_keys(&key, 10).is_none());
}

#[test]
fn test_param_key_at_end_does_not_match() {
    let key = ParamKey::new("id");
    let mut path = PathCursor::new("");
    let mut params = Params::new();
    assert!(!key.matches(&mut path, &mut params));
    assert!(params.is_empty());
}

#[test]
fn test_pattern_key_is_anchored() {
    let key = PatternKey::new("id", "[0-9]+").unwrap();
    let mut params = Params::new();

    let mut path = PathCursor::new("/a42");
    assert!(!key.matches(&mut path, &mut params));
    assert_eq!(path.position(), 0);

    let mut path = PathCursor::new("/42");
    assert!(key.matches(&mut path, &mut params));
    assert_eq!(params.get("id").map(String::as_str), Some("42"));
    assert!(!path.has_next());
}

#[test]
fn test_pattern_key_invalid_regex() {
    assert!(PatternKey::new("id", "[").is_err());
}

#[test]
fn test_choice_key_enumerates() {
    let key = ChoiceKey::new("lang", ["en", "et", "fi"]);
    let mut params = Params::new();

    assert_eq!(
        DynamicKey::<Params>::matching_keys(&key, 2),
        Some(vec!["en".to_string(), "et".to_string()])
    );

    let mut path = PathCursor::new("/et/docs");
    assert!(key.matches(&mut path, &mut params));
    assert_eq!(params.get("lang").map(String::as_str), Some("et"));

    let mut path = PathCursor::new("/de/docs");
    assert!(!key.matches(&mut path, &mut params));
}

#[test]
fn test_remainder_key_swallows_rest() {
    let key = RemainderKey::new("file");
    let mut path = PathCursor::with_separators("/static/css/site.css", Some("/"), Some("."));
    path.skip_next();
    let mut params = Params::new();

    assert!(key.matches(&mut path, &mut params));
    assert!(!path.has_next());
    assert_eq!(params.get("file").map(String::as_str), Some("css/site.css"));
    assert_eq!(DynamicKey::<Params>::name(&key), "{file*}");
}

#[test]
fn test_node_key_accessors() {
    let none: NodeKey<Params> = NodeKey::None;
    assert!(none.is_none());
    assert_eq!(none.as_str(), None);
    assert!(none.as_dynamic().is_none());
    assert_eq!(none.to_string(), "null");

    let fixed: NodeKey<Params> = "users".into();
    assert_eq!(fixed.as_str(), Some("users"));
    assert_eq!(fixed.display_name(), Some("users"));

    let dynamic: NodeKey<Params> = NodeKey::dynamic(ParamKey::new("id"));
    assert_eq!(dynamic.as_str(), None);
    assert_eq!(dynamic.as_dynamic().map(|k| k.name()), Some("{id}"));
    assert_eq!(format!("{dynamic:?}"), "Dynamic(\"{id}\")");

    let copy = dynamic.clone();
    assert_eq!(copy.display_name(), Some("{id}"));

    let from_option: NodeKey<Params> = Option::<&str>::None.into();
    assert!(from_option.is_none());
}

#[test]
fn test_dynamic_key_debug_shows_name() {
    let key: Arc<dyn DynamicKey<Params>> = Arc::new(ParamKey::new("id"));
    assert_eq!(format!("{key:?}"), "DynamicKey(\"{id}\")");

    let missing: Result<Arc<dyn DynamicKey<Params>>, String> = Err("unknown".to_string());
    assert_eq!(missing.unwrap_err(), "unknown");
}
