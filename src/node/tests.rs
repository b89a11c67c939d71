use std::collections::HashMap;
use std::sync::Arc;

use super::{ChildStage, Node, NodeBuilder, NodeCallback, NodeValue};
use crate::key::{NodeKey, ParamKey, RemainderKey};

type Ctx = HashMap<String, String>;

/// Value that stages three fixed children wherever it is stored.
#[derive(Debug, Clone, PartialEq)]
enum Page {
    Plain(&'static str),
    Section,
}

impl NodeValue<Ctx> for Page {
    fn init_node(&self, stage: &mut ChildStage<Self, Ctx>) {
        if *self == Page::Section {
            stage
                .add_node(Node::leaf("first", Page::Plain("one")))
                .add_child("second", Page::Plain("two"))
                .add_node(Node::leaf("third", Page::Plain("three")));
        }
    }
}

struct Replacer;

impl NodeCallback<Page, Ctx> for Replacer {
    fn on_key(&self, _key: NodeKey<Ctx>) -> NodeKey<Ctx> {
        "replaced".into()
    }

    fn on_value(&self, _value: Page) -> Page {
        Page::Plain("replaced")
    }
}

fn assert_key_value(node: &Node<Page, Ctx>, key: Option<&str>, value: &Page, children: usize) {
    assert_eq!(node.key().as_str(), key);
    assert_eq!(node.value(), value);
    assert_eq!(node.child_count(), children);
}

#[test]
fn test_node_new_and_leaf() {
    let leaf: Node<u32, Ctx> = Node::leaf("a", 1);
    assert!(leaf.is_leaf());
    assert_eq!(leaf.children().len(), 0);

    let node = Node::new("b", 2, vec![leaf, Node::leaf(NodeKey::None, 3)]);
    assert_eq!(node.key().as_str(), Some("b"));
    assert_eq!(*node.value(), 2);
    assert_eq!(node.child_count(), 2);
    assert!(node.children()[1].key().is_none());
}

#[test]
fn test_node_display() {
    let node: Node<&str, Ctx> = Node::new("docs", "index", vec![Node::leaf("a", "x")]);
    assert_eq!(node.to_string(), "Node@docs=\"index\" (child nodes: 1)");

    let empty: Node<(), Ctx> = Node::leaf(NodeKey::None, ());
    assert_eq!(empty.to_string(), "Node@null=() (child nodes: 0)");
}

#[test]
fn test_links_depth_first() {
    let root: Node<(), Ctx> = Node::new(
        NodeKey::None,
        (),
        vec![
            Node::new(
                "users",
                (),
                vec![Node::new(
                    NodeKey::dynamic(ParamKey::new("id")),
                    (),
                    vec![Node::leaf("posts", ())],
                )],
            ),
            Node::new(NodeKey::None, (), vec![Node::leaf("hidden", ())]),
            Node::leaf(NodeKey::dynamic(RemainderKey::new("file")), ()),
        ],
    );

    assert_eq!(
        root.links(),
        [
            "/",
            "/users",
            "/users/{id}",
            "/users/{id}/posts",
            "/hidden",
            "/{file*}",
        ]
    );
}

#[test]
fn test_builder_empty() {
    let node = NodeBuilder::<(), Ctx>::default().build();
    assert!(node.key().is_none());
    assert!(node.is_leaf());
}

#[test]
fn test_builder_key_value() {
    let node = NodeBuilder::<Page, Ctx>::new("myKey", Page::Plain("pi")).build();
    assert_key_value(&node, Some("myKey"), &Page::Plain("pi"), 0);
}

#[test]
fn test_builder_one_level() {
    let node = NodeBuilder::<Page, Ctx>::new("myKey", Page::Plain("pi"))
        .add_child("anotherKey", Page::Plain("two"))
        .add_child("thirdKey", Page::Plain("three"))
        .add_node(Node::leaf(NodeKey::None, Page::Plain("")))
        .build();

    assert_key_value(&node, Some("myKey"), &Page::Plain("pi"), 3);
    assert_key_value(&node.children()[0], Some("anotherKey"), &Page::Plain("two"), 0);
    assert_key_value(&node.children()[1], Some("thirdKey"), &Page::Plain("three"), 0);
    assert_key_value(&node.children()[2], None, &Page::Plain(""), 0);
}

#[test]
fn test_builder_aware_value_adds_children() {
    let node = NodeBuilder::<Page, Ctx>::new(NodeKey::None, Page::Plain("root"))
        .add_child("section", Page::Section)
        .add_node(Node::leaf(NodeKey::None, Page::Plain("")))
        .build();

    assert_key_value(&node, None, &Page::Plain("root"), 2);

    let section = &node.children()[0];
    assert_key_value(section, Some("section"), &Page::Section, 3);
    assert_key_value(&section.children()[0], Some("first"), &Page::Plain("one"), 0);
    assert_key_value(&section.children()[1], Some("second"), &Page::Plain("two"), 0);
    assert_key_value(&section.children()[2], Some("third"), &Page::Plain("three"), 0);
}

#[test]
fn test_builder_aware_root_children_come_first() {
    let node = NodeBuilder::<Page, Ctx>::new(NodeKey::None, Page::Section)
        .add_child("extra", Page::Plain("extra"))
        .build();

    let keys: Vec<_> = node.children().iter().map(|c| c.key().as_str()).collect();
    assert_eq!(
        keys,
        [Some("first"), Some("second"), Some("third"), Some("extra")]
    );
}

#[test]
fn test_callback_replaces_staged_keys_and_values() {
    let node = NodeBuilder::<Page, Ctx>::with_callback(NodeKey::None, Page::Plain("root"), Replacer)
        .add_child("section", Page::Section)
        .add_node(Node::leaf(NodeKey::None, Page::Plain("")))
        .build();

    assert_key_value(&node, Some("replaced"), &Page::Plain("replaced"), 2);
    // the replaced value is no longer a section, so nothing gets staged below it
    assert_key_value(&node.children()[0], Some("replaced"), &Page::Plain("replaced"), 0);
    assert_key_value(&node.children()[1], None, &Page::Plain(""), 0);
}

#[test]
fn test_option_value_delegates_restriction() {
    let value: Option<String> = None;
    assert!(NodeValue::<Ctx>::restriction(&value).is_none());

    let shared: Arc<String> = Arc::new("page".to_string());
    assert!(NodeValue::<Ctx>::restriction(&shared).is_none());
}
