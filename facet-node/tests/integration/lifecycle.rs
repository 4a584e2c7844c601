use facet_node::{Node, NodeType, node};

use crate::setup;

fn samples() -> Vec<Node> {
    vec![
        Node::UNDEFINED,
        Node::NULL,
        node!(true),
        node!(7),
        Node::from(1i64 << 40),
        node!(2.5),
        node!("short"),
        Node::from("a string long enough to need its own buffer"),
        node!([1, "two", [3.0]]),
        node!({"k": {"nested": [null]}}),
    ]
}

#[test]
fn clone_is_deep() {
    setup();
    for original in samples() {
        let mut copy = original.clone();
        assert_eq!(copy, original);
        if original.is_void() {
            continue;
        }
        copy.push("extra").unwrap();
        assert_ne!(copy, original, "mutating a clone changed {original:?}");
    }
}

#[test]
fn take_moves_payload() {
    setup();
    for original in samples() {
        let mut source = original.clone();
        let moved = source.take();
        assert_eq!(moved, original);
        assert!(source.is_undefined());
        assert!(source.size().is_err());
    }
}

#[test]
fn nested_clone_is_independent() {
    setup();
    let original = node!({"list": [1, 2]});
    let mut copy = original.clone();
    copy["list"].push(3).unwrap();
    assert_eq!(original["list"].size(), Ok(2));
    assert_eq!(copy["list"].size(), Ok(3));
}

#[test]
fn numbers_compare_across_widths() {
    setup();
    assert_eq!(Node::from(5), Node::from(5.0));
    assert_eq!(Node::from(5i64), Node::from(5.0));
    assert_eq!(Node::from(5i32), Node::from(5i64));
    assert_ne!(Node::from(5), Node::from("5"));
}

#[test]
fn inline_threshold_strings_behave_alike() {
    setup();
    let at = "x".repeat(facet_node::INLINE_LEN_MAX);
    let over = "x".repeat(facet_node::INLINE_LEN_MAX + 1);
    let a = Node::from(at.as_str());
    let b = Node::from(over.as_str());
    assert!(a.is_string() && b.is_string());
    assert_eq!(a.get_string(), Ok(at.as_str()));
    assert_eq!(b.get_string(), Ok(over.as_str()));
    assert_eq!(a.node_type(), b.node_type());
    assert_eq!(a.clone(), a);
    assert_eq!(b.clone(), b);
}

#[test]
fn size_of_node() {
    assert!(std::mem::size_of::<Node>() <= 24);
    assert!(std::mem::size_of::<facet_node::MemberKey>() <= 24);
}

#[test]
fn reset_and_clear() {
    setup();
    let mut n = node!({"a": 1});
    n.clear();
    assert!(n.is_object());
    assert!(n.is_empty());
    n.reset();
    assert_eq!(n.node_type(), NodeType::Undefined);
    n.push(1).unwrap();
    assert_eq!(n, node!([1]));
}

#[test]
fn typed_reads() {
    setup();
    let n = node!({"i": 3, "f": 0.5, "s": "str", "b": false});
    assert_eq!(n["i"].get::<i32>(), Ok(3));
    assert_eq!(n["i"].get_with_default(0i64), 3);
    assert_eq!(n["f"].get_with_default(0i64), 0);
    assert_eq!(n["f"].get::<f32>(), Ok(0.5));
    assert_eq!(n["s"].get::<String>().as_deref(), Ok("str"));
    assert!(!n["b"].get_with_default(true));
    assert_eq!(n["b"].to_string_or_empty(), "");
}
