use facet_node::{Node, NodeError, NodeType, node};

use crate::setup;

fn ints(n: &Node) -> Vec<i64> {
    n.iter().unwrap().map(|v| v.get_int().unwrap()).collect()
}

fn range(n: i32) -> Node {
    Node::array_with(n as usize, |i| i as i32).unwrap()
}

#[test]
fn pushes_keep_order_and_count() {
    setup();
    for n in [0usize, 1, 7, 8, 9, 100] {
        let mut array = Node::empty_array();
        for i in 0..n {
            array.push(i as i64).unwrap();
        }
        assert_eq!(array.size(), Ok(n));
        assert_eq!(ints(&array), (0..n as i64).collect::<Vec<_>>());
        assert_eq!(array.as_array().unwrap().capacity(), n.div_ceil(8) * 8);
    }
}

#[test]
fn splice_middle_range() {
    setup();
    let mut source = range(10);
    let removed = source.splice(2, 3).unwrap();
    assert_eq!(ints(&removed), [2, 3, 4]);
    assert_eq!(ints(&source), [0, 1, 5, 6, 7, 8, 9]);
}

#[test]
fn splice_with_insertion() {
    setup();
    let mut source = range(5);
    let removed = source.splice_insert(2, 1, [100, 200]).unwrap();
    assert_eq!(ints(&removed), [2]);
    assert_eq!(ints(&source), [0, 1, 100, 200, 3, 4]);
}

#[test]
fn splice_past_end_leaves_source() {
    setup();
    let mut source = range(5);
    let before = source.clone();
    let removed = source.splice(100, 1).unwrap();
    assert!(removed.is_array());
    assert_eq!(removed.size(), Ok(0));
    assert_eq!(source, before);
}

#[test]
fn splice_on_scalar_is_a_type_mismatch() {
    setup();
    let mut n = Node::from("nope");
    assert_eq!(
        n.splice_insert(0, 0, [1]).unwrap_err(),
        NodeError::TypeMismatch {
            expected: "array",
            got: NodeType::String
        }
    );
    assert_eq!(n.get_string(), Ok("nope"));
}

#[test]
fn index_errors() {
    setup();
    let n = node!([1, 2]);
    assert_eq!(
        n.at(2).unwrap_err(),
        NodeError::IndexOutOfBounds { index: 2, len: 2 }
    );
    assert!(matches!(
        node!({}).at(0),
        Err(NodeError::TypeMismatch { .. })
    ));
}

#[test]
#[should_panic(expected = "index 3 out of bounds (len 1)")]
fn index_sugar_panics_with_message() {
    let n = node!(["only"]);
    let _ = &n[3];
}

#[test]
fn array_factories() {
    setup();
    let from_iter = Node::array_from(["a", "b", "c"]).unwrap();
    assert_eq!(from_iter.as_array().unwrap().capacity(), 3);
    let squares = Node::array_with(4, |i| (i * i) as i64).unwrap();
    assert_eq!(ints(&squares), [0, 1, 4, 9]);
    let collected: Node = (1..=3).map(Node::from).collect();
    assert_eq!(collected, node!([1, 2, 3]));
}

#[test]
fn at_mut_writes_through() {
    setup();
    let mut n = node!([1, 2, 3]);
    *n.at_mut(1).unwrap() = Node::from("two");
    n[2] = Node::NULL;
    assert_eq!(n, node!([1, "two", null]));
}
