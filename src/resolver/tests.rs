use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{resolve, Outcome, Resolver};
use crate::key::{DynamicKey, NodeKey, Restrictable};
use crate::node::{Node, NodeValue};
use crate::path::{PathCursor, PathOptions};

type Ctx = HashMap<String, String>;

/// Dynamic key that counts calls and accepts one segment when told to.
struct CountingKey {
    accept: bool,
    calls: AtomicUsize,
}

impl CountingKey {
    fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DynamicKey<Ctx> for CountingKey {
    fn name(&self) -> &str {
        "{counting}"
    }

    fn matches(&self, path: &mut PathCursor, _ctx: &mut Ctx) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.accept && path.skip_next()
    }
}

fn dynamic(key: &Arc<CountingKey>) -> NodeKey<Ctx> {
    let key: Arc<dyn DynamicKey<Ctx>> = Arc::clone(key) as Arc<dyn DynamicKey<Ctx>>;
    key.into()
}

#[derive(Debug, PartialEq)]
enum Page {
    Open(&'static str),
    Locked(&'static str),
}

impl Restrictable<Ctx> for Page {
    fn is_available(&self, ctx: &Ctx) -> bool {
        match self {
            Page::Open(_) => true,
            Page::Locked(_) => ctx.contains_key("user"),
        }
    }
}

impl NodeValue<Ctx> for Page {
    fn restriction(&self) -> Option<&dyn Restrictable<Ctx>> {
        Some(self)
    }
}

fn tree(d: &Arc<CountingKey>) -> Node<Page, Ctx> {
    Node::new(
        NodeKey::None,
        Page::Open("root"),
        vec![
            Node::new(
                "a",
                Page::Locked("a"),
                vec![Node::leaf("x", Page::Open("x"))],
            ),
            Node::leaf("b", Page::Open("b")),
            Node::leaf(dynamic(d), Page::Open("d")),
        ],
    )
}

#[test]
fn test_static_match_skips_dynamic_keys() {
    let d = CountingKey::new(true);
    let root = tree(&d);
    let mut ctx = Ctx::from([("user".to_string(), "alice".to_string())]);

    let mut path = PathCursor::new("/a");
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.outcome(), Outcome::Found);
    assert_eq!(resolution.value(), Some(&Page::Locked("a")));
    assert_eq!(d.calls(), 0);
}

#[test]
fn test_dynamic_fallback() {
    let d = CountingKey::new(true);
    let root = tree(&d);
    let mut ctx = Ctx::new();

    let mut path = PathCursor::new("/c");
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.outcome(), Outcome::Found);
    assert_eq!(resolution.value(), Some(&Page::Open("d")));
    assert_eq!(resolution.trail().len(), 1);
    assert!(std::ptr::eq(resolution.trail()[0], &root));
    assert_eq!(d.calls(), 1);
}

#[test]
fn test_not_found_leaves_cursor_at_segment() {
    let d = CountingKey::new(false);
    let root = tree(&d);
    let mut ctx = Ctx::new();

    let mut path = PathCursor::new("/c/d");
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.outcome(), Outcome::NotFound);
    assert!(resolution.node().is_none());
    assert!(resolution.trail().is_empty());
    assert!(std::ptr::eq(resolution.stopped_at(), &root));
    assert_eq!(path.position(), 0);
    assert_eq!(path.peek_next().unwrap(), "c");
}

#[test]
fn test_denied_intermediate() {
    let d = CountingKey::new(false);
    let root = tree(&d);
    let mut ctx = Ctx::new();

    let mut path = PathCursor::new("/a/x");
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.outcome(), Outcome::Denied);
    assert!(resolution.node().is_none());
    assert_eq!(resolution.trail().len(), 1);
    assert!(std::ptr::eq(resolution.trail()[0], &root));
    assert_eq!(resolution.stopped_at().value(), &Page::Locked("a"));
}

#[test]
fn test_denied_terminal() {
    let d = CountingKey::new(false);
    let root = tree(&d);
    let mut ctx = Ctx::new();

    let mut path = PathCursor::new("/a");
    assert_eq!(resolve(&root, &mut path, &mut ctx).outcome(), Outcome::Denied);

    ctx.insert("user".to_string(), "bob".to_string());
    let mut path = PathCursor::new("/a/x");
    let resolution = resolve(&root, &mut path, &mut ctx);
    assert_eq!(resolution.outcome(), Outcome::Found);
    assert_eq!(resolution.depth(), 2);
}

#[test]
fn test_empty_path_resolves_to_root() {
    let d = CountingKey::new(true);
    let root = tree(&d);
    let mut ctx = Ctx::new();

    for raw in ["", "/", "///"] {
        let mut path = PathCursor::new(raw);
        let resolution = resolve(&root, &mut path, &mut ctx);
        assert_eq!(resolution.outcome(), Outcome::Found);
        assert!(std::ptr::eq(resolution.node().unwrap(), &root));
        assert!(resolution.trail().is_empty());
    }
}

#[test]
fn test_rejecting_dynamic_key_is_rolled_back() {
    struct Greedy;

    impl DynamicKey<Ctx> for Greedy {
        fn name(&self) -> &str {
            "{greedy}"
        }

        fn matches(&self, path: &mut PathCursor, _ctx: &mut Ctx) -> bool {
            path.end();
            path.set_extension_to_segment(true);
            false
        }
    }

    let fallback = CountingKey::new(true);
    let root: Node<&str, Ctx> = Node::new(
        NodeKey::None,
        "root",
        vec![
            Node::leaf(NodeKey::dynamic(Greedy), "greedy"),
            Node::leaf(dynamic(&fallback), "fallback"),
        ],
    );

    let mut ctx = Ctx::new();
    let mut path = PathCursor::with_separators("/page.html", Some("/"), Some("."));
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.value(), Some(&"fallback"));
    assert_eq!(fallback.calls(), 1);
    assert!(!path.is_extension_to_segment());
}

#[test]
fn test_resolver_uses_options() {
    let root: Node<&str, Ctx> = Node::new(
        NodeKey::None,
        "root",
        vec![Node::leaf("feed", "feed")],
    );
    let resolver = Resolver::new(root).with_options(PathOptions::with_extensions(&["rss"], true));

    let mut ctx = Ctx::new();
    assert_eq!(resolver.resolve("/feed.rss", &mut ctx).value(), Some(&"feed"));
    assert_eq!(
        resolver.resolve("/feed.atom", &mut ctx).outcome(),
        Outcome::NotFound
    );

    let cursor = resolver.cursor("/feed.rss");
    assert_eq!(cursor.extension(), Some("rss"));

    let copy = resolver.clone();
    assert!(Arc::ptr_eq(copy.root(), resolver.root()));
}

#[test]
fn test_outcome_display() {
    assert_eq!(Outcome::Found.to_string(), "found");
    assert_eq!(Outcome::NotFound.to_string(), "not_found");
    assert_eq!(Outcome::Denied.as_str(), "denied");
}

#[test]
fn test_static_wins_over_earlier_dynamic_sibling() {
    let d = CountingKey::new(true);
    let root: Node<Page, Ctx> = Node::new(
        NodeKey::None,
        Page::Open("root"),
        vec![
            Node::leaf(dynamic(&d), Page::Open("d")),
            Node::leaf("a", Page::Open("a")),
        ],
    );
    let mut ctx = Ctx::new();

    let mut path = PathCursor::new("/a");
    let resolution = resolve(&root, &mut path, &mut ctx);

    assert_eq!(resolution.outcome(), Outcome::Found);
    assert_eq!(resolution.value(), Some(&Page::Open("a")));
    assert_eq!(d.calls(), 0);

    let mut path = PathCursor::new("/z");
    let resolution = resolve(&root, &mut path, &mut ctx);
    assert_eq!(resolution.value(), Some(&Page::Open("d")));
    assert_eq!(d.calls(), 1);
}
