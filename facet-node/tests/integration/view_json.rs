use facet_node::{Node, NodeType, ValueView, node};
use serde_json::json;

use crate::setup;

#[test]
fn json_document_converts() {
    setup();
    let doc = json!({
        "name": "facet",
        "count": 3,
        "ratio": 0.25,
        "tags": ["x", "y"],
        "extra": null,
        "ok": true
    });
    let n = Node::from_view(&doc).unwrap();
    let expected = node!({
        "name": "facet",
        "count": 3,
        "ratio": 0.25,
        "tags": ["x", "y"],
        "extra": null,
        "ok": true,
    });
    assert_eq!(n, expected);
    assert_eq!(n["count"].node_type(), NodeType::Int64);
    assert_eq!(n["tags"].as_array().unwrap().capacity(), 2);
}

#[test]
fn large_unsigned_becomes_float() {
    setup();
    let n = Node::from_view(&json!(u64::MAX)).unwrap();
    assert!(n.is_float());
    assert_eq!(n.get_float64(), Ok(u64::MAX as f64));
}

#[test]
fn assign_from_json() {
    setup();
    let mut n = node!([1, 2, 3]);
    n.assign_view(&json!({"a": [true]})).unwrap();
    assert_eq!(n, node!({"a": [true]}));
}

#[test]
fn view_surface() {
    setup();
    let doc = json!({"a": [1, 2]});
    assert!(ValueView::is_object(&doc));
    assert_eq!(ValueView::size(&doc), 1);
    let (name, list) = doc.member_at(0).unwrap();
    assert_eq!(name, "a");
    assert_eq!(list.element(1).and_then(|v| v.as_i64()), Some(2));
}
