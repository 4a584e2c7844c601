use facet_node::{Node, node};
use insta::assert_snapshot;

use crate::setup;

#[test]
fn debug_scalars() {
    setup();
    let n = node!([undefined, null, true, 1, 2.0, "s"]);
    assert_snapshot!(format!("{n:?}"), @r#"[undefined, null, true, 1, 2.0, "s"]"#);
}

#[test]
fn debug_nested_pretty() {
    setup();
    let n = node!({"name": "facet", "tags": ["a", "b"], "meta": {}});
    assert_snapshot!(format!("{n:#?}"), @r#"
    {
        "name": "facet",
        "tags": [
            "a",
            "b",
        ],
        "meta": {},
    }
    "#);
}

#[test]
fn error_messages() {
    setup();
    let n = node!({"x": 1});
    let errors = [
        n.at(0).unwrap_err().to_string(),
        n.member("y").unwrap_err().to_string(),
        n["x"].size().unwrap_err().to_string(),
        Node::from(true).get_string().unwrap_err().to_string(),
    ];
    assert_snapshot!(errors.join("\n"), @r"
    type mismatch: expected array, got object
    object member `y` not found
    int32 does not have a size
    type mismatch: expected string, got bool
    ");
}
