use brrtpath::context::RequestContext;
use brrtpath::key::Restrictable;
use brrtpath::node::{ChildStage, Node, NodeValue};
use brrtpath::registry::Registry;
use brrtpath::resolver::{Outcome, Resolver};
use brrtpath::runtime_config::ResolverConfig;
use brrtpath::tree::load_tree_def;
use http::Method;
use std::io::Write;
use tempfile::NamedTempFile;

/// Values an application might register: plain pages, an admin area gated
/// on a role header, and a "help" section that brings its own children.
#[derive(Debug, Clone, Default, PartialEq)]
enum Handler {
    #[default]
    Index,
    Page(String),
    Admin,
    Help,
}

impl Restrictable<RequestContext> for Handler {
    fn is_available(&self, ctx: &RequestContext) -> bool {
        *self != Handler::Admin || ctx.extensions().get::<Role>() == Some(&Role::Admin)
    }
}

impl NodeValue<RequestContext> for Handler {
    fn restriction(&self) -> Option<&dyn Restrictable<RequestContext>> {
        Some(self)
    }

    fn init_node(&self, stage: &mut ChildStage<Self, RequestContext>) {
        if *self == Handler::Help {
            stage
                .add_child("faq", Handler::Page("faq".to_string()))
                .add_child("contact", Handler::Page("contact".to_string()));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Role {
    Admin,
}

fn registry() -> Registry<Handler, RequestContext> {
    Registry::with_builtin_keys()
        .value("admin", || Handler::Admin)
        .value("help", || Handler::Help)
        .fallback_value(|name| Handler::Page(name.to_string()))
}

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const YAML_TREE: &str = r#"
children:
  - key: docs
    value: docs
    children:
      - dynamic: { kind: choice, arg: "lang:en,de" }
        value: docs_lang
        children:
          - param: topic
            value: topic
  - key: help
    value: help
    children:
      - key: about
        value: about
  - key: admin
    value: admin
    children:
      - key: users
        value: admin_users
"#;

fn load(suffix: &str, content: &str) -> Node<Handler, RequestContext> {
    let file = write_temp(suffix, content);
    load_tree_def(file.path()).unwrap().build(&registry()).unwrap()
}

#[test]
fn test_yaml_tree_links() {
    let root = load(".yaml", YAML_TREE);
    assert_eq!(*root.value(), Handler::Index);
    assert_eq!(
        root.links(),
        [
            "/",
            "/docs",
            "/docs/{lang}",
            "/docs/{lang}/{topic}",
            "/help",
            "/help/faq",
            "/help/contact",
            "/help/about",
            "/admin",
            "/admin/users",
        ]
    );
}

#[test]
fn test_json_tree_matches_yaml() {
    let json = r#"{
        "children": [
            {"key": "docs", "value": "docs", "children": [
                {"dynamic": {"kind": "choice", "arg": "lang:en,de"}, "value": "docs_lang",
                 "children": [{"param": "topic", "value": "topic"}]}
            ]},
            {"key": "help", "value": "help", "children": [{"key": "about", "value": "about"}]},
            {"key": "admin", "value": "admin", "children": [{"key": "users", "value": "admin_users"}]}
        ]
    }"#;
    assert_eq!(load(".json", json).links(), load(".yml", YAML_TREE).links());
}

#[test]
fn test_loaded_tree_resolves() {
    let resolver = Resolver::new(load(".yaml", YAML_TREE));

    let mut ctx = RequestContext::new(Method::GET, "/docs/de/install");
    let resolution = resolver.resolve("/docs/de/install", &mut ctx);
    assert_eq!(resolution.value(), Some(&Handler::Page("topic".to_string())));
    assert_eq!(ctx.param("lang"), Some("de"));
    assert_eq!(ctx.param("topic"), Some("install"));

    let mut ctx = RequestContext::new(Method::GET, "/docs/fr/install");
    assert_eq!(
        resolver.resolve("/docs/fr/install", &mut ctx).outcome(),
        Outcome::NotFound
    );

    let mut ctx = RequestContext::new(Method::GET, "/help/faq");
    assert_eq!(
        resolver.resolve("/help/faq", &mut ctx).value(),
        Some(&Handler::Page("faq".to_string()))
    );
}

#[test]
fn test_loaded_tree_restrictions() {
    let resolver = Resolver::new(load(".yaml", YAML_TREE));

    let mut ctx = RequestContext::new(Method::GET, "/admin/users");
    assert_eq!(resolver.resolve("/admin/users", &mut ctx).outcome(), Outcome::Denied);

    let mut ctx = RequestContext::new(Method::GET, "/admin/users");
    ctx.extensions_mut().insert(Role::Admin);
    assert_eq!(resolver.resolve("/admin/users", &mut ctx).outcome(), Outcome::Found);
}

#[test]
fn test_config_file_drives_resolver() {
    let config = write_temp(
        ".yaml",
        "path:\n  extension_separator: \".\"\n  allowed_extensions: [html]\nslow_match_threshold_us: 5000\n",
    );
    let config = ResolverConfig::from_yaml_file(config.path()).unwrap();
    let resolver = Resolver::new(load(".yaml", YAML_TREE)).with_config(&config);
    assert_eq!(resolver.slow_match_threshold().as_micros(), 5000);

    let mut ctx = RequestContext::new(Method::GET, "/help/about.html");
    let resolution = resolver.resolve("/help/about.html", &mut ctx);
    assert_eq!(resolution.value(), Some(&Handler::Page("about".to_string())));
}

#[test]
fn test_load_errors_carry_context() {
    let err = load_tree_def("/nonexistent/tree.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/tree.yaml"), "{err:#}");

    let bad = write_temp(".yaml", "children:\n  - dynamic: { kind: wildcard, arg: x }\n");
    let err = load_tree_def(bad.path()).unwrap().build(&registry()).unwrap_err();
    assert!(format!("{err:#}").contains("wildcard"), "{err:#}");
}
