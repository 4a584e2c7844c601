/// Builds a [`Node`](crate::Node) from JSON-like literal syntax.
///
/// Array elements and member values are single token trees: literals,
/// identifiers, nested `[..]`/`{..}` or any expression wrapped in parentheses.
/// Member names are string literals.
///
/// ```
/// use facet_node::node;
///
/// let n = node!({
///     "name": "facet",
///     "tags": ["fast", "small"],
///     "offset": (-3),
///     "parent": null,
/// });
/// assert_eq!(n["tags"][1].get_string(), Ok("small"));
/// assert_eq!(n["offset"].get_int32(), Ok(-3));
/// assert!(n["parent"].is_null());
/// ```
///
/// Like `vec!`, the macro aborts if an allocation fails.
#[macro_export]
macro_rules! node {
    (null) => {
        $crate::Node::NULL
    };
    (undefined) => {
        $crate::Node::UNDEFINED
    };
    ([]) => {
        $crate::Node::empty_array()
    };
    ([ $($element:tt),+ $(,)? ]) => {
        <$crate::Node as ::core::iter::FromIterator<$crate::Node>>::from_iter([
            $( $crate::node!($element) ),+
        ])
    };
    ({}) => {
        $crate::Node::empty_object()
    };
    ({ $($name:literal : $value:tt),+ $(,)? }) => {
        $crate::Node::from(
            <$crate::NodeObject as ::core::iter::FromIterator<(&str, $crate::Node)>>::from_iter([
                $( ($name, $crate::node!($value)) ),+
            ])
        )
    };
    ($other:expr) => {
        $crate::Node::from($other)
    };
}
