use facet_node::{Node, NodeError, NodeObject, node};

use crate::setup;

fn names(n: &Node) -> Vec<String> {
    n.members().unwrap().map(|m| m.name.to_string()).collect()
}

#[test]
fn overwrite_keeps_position() {
    setup();
    let mut obj = Node::empty_object();
    obj.set_member("a", 1).unwrap();
    obj.set_member("b", 0).unwrap();
    obj.set_member("a", 2).unwrap();
    assert_eq!(obj.size(), Ok(2));
    assert_eq!(names(&obj), ["a", "b"]);
    assert_eq!(obj.member("a").unwrap(), &Node::from(2));
}

#[test]
fn equality_ignores_member_order() {
    setup();
    assert_eq!(node!({"a": 1, "b": 2}), node!({"b": 2, "a": 1}));
    assert_ne!(node!({"a": 1}), node!({"a": 1, "b": 2}));
    assert_ne!(node!({"a": 1, "b": 2}), node!({"a": 1}));
    assert_ne!(node!({"a": 1}), node!({"a": 2}));
}

#[test]
fn capacity_follows_steps_of_four() {
    setup();
    let mut obj = Node::empty_object();
    let mut caps = Vec::new();
    for i in 0..9 {
        obj.set_member(&format!("m{i}"), i).unwrap();
        caps.push(obj.as_object().unwrap().capacity());
    }
    assert_eq!(caps, [4, 4, 4, 4, 8, 8, 8, 8, 12]);
}

#[test]
fn boundary_keys_survive_growth() {
    setup();
    let inline = "k".repeat(facet_node::INLINE_LEN_MAX);
    let heap = "h".repeat(facet_node::INLINE_LEN_MAX + 1);

    let mut obj = Node::empty_object();
    for i in 0..50 {
        obj.set_member(&format!("{inline}{i}"), i).unwrap();
        obj.set_member(&format!("{heap}{i}"), -i).unwrap();
    }
    obj.set_member(&inline, "inline").unwrap();
    obj.set_member(&heap, "heap").unwrap();

    assert_eq!(obj.size(), Ok(102));
    assert_eq!(obj[inline.as_str()].get_string(), Ok("inline"));
    assert_eq!(obj[heap.as_str()].get_string(), Ok("heap"));
    for i in 0..50 {
        assert_eq!(obj[format!("{heap}{i}").as_str()].get_int32(), Ok(-i));
    }
}

#[test]
fn remove_shifts_survivors() {
    setup();
    let mut obj = node!({"a": 1, "b": 2, "c": 3, "d": 4});
    assert!(obj.remove_member("b"));
    assert!(!obj.remove_member("missing"));
    assert_eq!(names(&obj), ["a", "c", "d"]);
    assert_eq!(obj.object_member_at(1).unwrap().name, "c");
    assert_eq!(
        obj.object_member_at(3).unwrap_err(),
        NodeError::IndexOutOfBounds { index: 3, len: 3 }
    );
}

#[test]
fn set_member_on_scalar_converts() {
    setup();
    let mut n = Node::from(42);
    n.set_member("x", true).unwrap();
    assert!(n.is_object());
    assert_eq!(n, node!({"x": true}));
}

#[test]
fn add_members_batch() {
    setup();
    let mut n = node!({"keep": 0});
    n.add_members(vec![("x".to_string(), 1), ("y".to_string(), 2)])
        .unwrap();
    assert_eq!(n.as_object().unwrap().capacity(), 3);
    assert_eq!(names(&n), ["keep", "x", "y"]);

    let built = Node::object_from([("p", "q")]).unwrap();
    assert_eq!(built["p"].get_string(), Ok("q"));
}

#[test]
fn reserve_object_keeps_members() {
    setup();
    let mut n = node!({"a": 1});
    n.reserve_object(16).unwrap();
    assert_eq!(n.as_object().unwrap().capacity(), 16);
    assert_eq!(n, node!({"a": 1}));
}

#[test]
fn non_object_lookups() {
    setup();
    let n = node!([1]);
    assert!(!n.has_object_member("a"));
    assert!(matches!(n.member("a"), Err(NodeError::TypeMismatch { .. })));
    assert!(matches!(
        n.object_member_at(0),
        Err(NodeError::TypeMismatch { .. })
    ));
}

#[test]
fn node_object_api() {
    setup();
    let mut obj: NodeObject = [("one", 1), ("two", 2)].into_iter().collect();
    *obj.get_mut("two").unwrap() = Node::from(22);
    assert_eq!(obj.values().cloned().collect::<Vec<_>>(), [Node::from(1), Node::from(22)]);
    let (key, value) = obj.remove_entry("one").unwrap();
    assert_eq!(key, "one");
    assert_eq!(value, Node::from(1));
    assert_eq!(Node::from(obj), node!({"two": 22}));
}
