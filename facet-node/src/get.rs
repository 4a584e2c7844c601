//! Typed extraction from a [`Node`].

use alloc::string::String;

use crate::error::Result;
use crate::node::Node;

/// Types that can be read out of a [`Node`] with [`Node::get`] and
/// [`Node::get_with_default`].
pub trait FromNode: Sized {
    /// Reads the value with the matching strict getter.
    fn from_node(node: &Node) -> Result<Self>;

    /// Reads the value, falling back to `default` when the node holds some
    /// other type. The default implementation only accepts what
    /// [`from_node`](Self::from_node) accepts.
    fn from_node_or(node: &Node, default: Self) -> Self {
        Self::from_node(node).unwrap_or(default)
    }
}

impl FromNode for bool {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_bool()
    }
}

impl FromNode for i32 {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_int32()
    }
}

impl FromNode for i64 {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_int64()
    }

    /// Also accepts a 32-bit integer, widened.
    fn from_node_or(node: &Node, default: Self) -> Self {
        node.get_int().unwrap_or(default)
    }
}

impl FromNode for f32 {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_float32()
    }
}

impl FromNode for f64 {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_float64()
    }
}

impl FromNode for String {
    fn from_node(node: &Node) -> Result<Self> {
        node.get_string().map(String::from)
    }
}

impl Node {
    /// Reads the node as `T`, failing with `TypeMismatch` unless the node
    /// holds exactly that type.
    ///
    /// ```
    /// use facet_node::Node;
    ///
    /// let n = Node::from(42);
    /// assert_eq!(n.get::<i32>(), Ok(42));
    /// assert!(n.get::<i64>().is_err());
    /// ```
    pub fn get<T: FromNode>(&self) -> Result<T> {
        T::from_node(self)
    }

    /// Reads the node as `T`, or returns `default` if it holds another type.
    ///
    /// `i64` also accepts a 32-bit integer.
    ///
    /// ```
    /// use facet_node::Node;
    ///
    /// assert_eq!(Node::from(7).get_with_default(0i64), 7);
    /// assert_eq!(Node::null().get_with_default(1.5), 1.5);
    /// ```
    #[must_use]
    pub fn get_with_default<T: FromNode>(&self, default: T) -> T {
        T::from_node_or(self, default)
    }
}
