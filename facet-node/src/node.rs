//! The core [`Node`] type.
//!
//! # Memory Layout
//!
//! `Node` is a one-byte type tag followed by the payload of the active type,
//! 24 bytes in total on every supported target:
//!
//! ```text
//! ┌─────┬──────────────────────────────────────────────────────────┐
//! │ tag │ short string: len (1 byte) + up to 22 bytes of UTF-8      │
//! ├─────┼───────┬──────────────────────────────────────────────────┤
//! │ tag │ (pad) │ i32 / i64 / f64                                  │
//! │ tag │ (pad) │ long string: pointer + length                    │
//! │ tag │ (pad) │ array / object: pointer + u32 len + u32 cap      │
//! └─────┴───────┴──────────────────────────────────────────────────┘
//! ```
//!
//! The short string variant has alignment 1, so its length byte sits right
//! after the tag and the characters fill the rest of the node. Everything else
//! starts at offset 8.
//!
//! Each node owns at most one heap buffer (long string, array elements or
//! object members) and never shares it: `clone` copies deeply and
//! [`Node::take`] leaves an undefined node behind.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::mem;
use core::ops::{Index, IndexMut};

use crate::array::NodeArray;
use crate::error::{NodeError, Result};
use crate::inline::InlineStr;
use crate::iter::{Iter, Members};
use crate::object::{MemberRef, NodeObject};
use crate::trace;

/// The logical type of a [`Node`].
///
/// Short and long strings are both [`NodeType::String`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeType {
    /// No value at all
    Undefined,
    /// JSON `null`
    Null,
    /// Boolean
    Bool,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// Double-precision float
    Float,
    /// UTF-8 string
    String,
    /// Array of nodes
    Array,
    /// Object with string keys
    Object,
}

impl NodeType {
    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeType::Undefined => "undefined",
            NodeType::Null => "null",
            NodeType::Bool => "bool",
            NodeType::Int32 => "int32",
            NodeType::Int64 => "int64",
            NodeType::Float => "float",
            NodeType::String => "string",
            NodeType::Array => "array",
            NodeType::Object => "object",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
enum Repr {
    Undefined,
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float(f64),
    ShortString(InlineStr),
    LongString(Box<str>),
    Array(NodeArray),
    Object(NodeObject),
}

/// A dynamically-typed, JSON-compatible value.
///
/// A node is undefined, null, a boolean, a 32- or 64-bit integer, a double, a
/// string, an array of nodes, or an object mapping string keys to nodes.
/// Strings up to [`INLINE_LEN_MAX`](crate::INLINE_LEN_MAX) bytes are stored
/// inside the node without allocating.
///
/// Operations that need a particular type return
/// [`NodeError::TypeMismatch`] when the node holds something else.
#[derive(Clone)]
pub struct Node(Repr);

const _: () = assert!(mem::size_of::<Node>() <= 24);

impl Node {
    /// The undefined node. This is also [`Node::default()`].
    pub const UNDEFINED: Node = Node(Repr::Undefined);

    /// JSON `null`.
    pub const NULL: Node = Node(Repr::Null);

    // === Construction ===

    /// Creates an undefined node.
    #[must_use]
    pub const fn undefined() -> Self {
        Self::UNDEFINED
    }

    /// Creates a null node.
    #[must_use]
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Creates an empty array node without allocating.
    #[must_use]
    pub const fn empty_array() -> Self {
        Node(Repr::Array(NodeArray::new()))
    }

    /// Creates an empty object node without allocating.
    #[must_use]
    pub const fn empty_object() -> Self {
        Node(Repr::Object(NodeObject::new()))
    }

    /// Creates an array node from the items of `iter`, reserving capacity from
    /// its size hint.
    pub fn array_from<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let iter = iter.into_iter();
        let mut array = NodeArray::with_capacity(iter.size_hint().0)?;
        for item in iter {
            array.push(item)?;
        }
        Ok(array.into())
    }

    /// Creates an array node of `len` elements, calling `element_at` for each
    /// index in order.
    pub fn array_with<T, F>(len: usize, mut element_at: F) -> Result<Self>
    where
        T: Into<Node>,
        F: FnMut(usize) -> T,
    {
        let mut array = NodeArray::with_capacity(len)?;
        for i in 0..len {
            array.push(element_at(i))?;
        }
        Ok(array.into())
    }

    /// Creates an object node from name/value pairs, reserving capacity for
    /// all of them.
    pub fn object_from<I, K, V>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Node>,
    {
        let mut node = Node::empty_object();
        node.add_members(members)?;
        Ok(node)
    }

    fn from_str_storage(s: &str) -> Self {
        match InlineStr::new(s) {
            Some(inline) => Node(Repr::ShortString(inline)),
            None => Node(Repr::LongString(Box::from(s))),
        }
    }

    // === Type checking ===

    /// Returns the logical type of this node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match &self.0 {
            Repr::Undefined => NodeType::Undefined,
            Repr::Null => NodeType::Null,
            Repr::Bool(_) => NodeType::Bool,
            Repr::Int32(_) => NodeType::Int32,
            Repr::Int64(_) => NodeType::Int64,
            Repr::Float(_) => NodeType::Float,
            Repr::ShortString(_) | Repr::LongString(_) => NodeType::String,
            Repr::Array(_) => NodeType::Array,
            Repr::Object(_) => NodeType::Object,
        }
    }

    /// Returns `true` if this node is undefined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self.0, Repr::Undefined)
    }

    /// Returns `true` if this node is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.0, Repr::Null)
    }

    /// Returns `true` if this node is undefined or null.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self.0, Repr::Undefined | Repr::Null)
    }

    /// Returns `true` if this node is a boolean.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.0, Repr::Bool(_))
    }

    /// Returns `true` if this node is a 32-bit integer.
    #[must_use]
    pub fn is_int32(&self) -> bool {
        matches!(self.0, Repr::Int32(_))
    }

    /// Returns `true` if this node is a 64-bit integer.
    #[must_use]
    pub fn is_int64(&self) -> bool {
        matches!(self.0, Repr::Int64(_))
    }

    /// Returns `true` if this node is an integer of either width.
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self.0, Repr::Int32(_) | Repr::Int64(_))
    }

    /// Returns `true` if this node is a float.
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self.0, Repr::Float(_))
    }

    /// Returns `true` if this node is an integer or a float.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.is_int() || self.is_float()
    }

    /// Returns `true` if this node is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.0, Repr::ShortString(_) | Repr::LongString(_))
    }

    /// Returns `true` if this node is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.0, Repr::Array(_))
    }

    /// Returns `true` if this node is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.0, Repr::Object(_))
    }

    #[cfg(test)]
    pub(crate) fn is_inline_string(&self) -> bool {
        matches!(self.0, Repr::ShortString(_))
    }

    fn mismatch(&self, expected: &'static str) -> NodeError {
        NodeError::mismatch(expected, self.node_type())
    }

    // === Strict getters ===

    /// Returns the boolean, or `TypeMismatch`.
    pub fn get_bool(&self) -> Result<bool> {
        match self.0 {
            Repr::Bool(b) => Ok(b),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// Returns the 32-bit integer, or `TypeMismatch` (a 64-bit integer doesn't qualify).
    pub fn get_int32(&self) -> Result<i32> {
        match self.0 {
            Repr::Int32(i) => Ok(i),
            _ => Err(self.mismatch("int32")),
        }
    }

    /// Returns the 64-bit integer, or `TypeMismatch` (a 32-bit integer doesn't qualify).
    pub fn get_int64(&self) -> Result<i64> {
        match self.0 {
            Repr::Int64(i) => Ok(i),
            _ => Err(self.mismatch("int64")),
        }
    }

    /// Returns an integer of either width, widened to `i64`.
    pub fn get_int(&self) -> Result<i64> {
        match self.0 {
            Repr::Int32(i) => Ok(i64::from(i)),
            Repr::Int64(i) => Ok(i),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Returns the float narrowed to `f32`, or `TypeMismatch`.
    pub fn get_float32(&self) -> Result<f32> {
        self.get_float64().map(|f| f as f32)
    }

    /// Returns the float, or `TypeMismatch`. Integers don't qualify.
    pub fn get_float64(&self) -> Result<f64> {
        match self.0 {
            Repr::Float(f) => Ok(f),
            _ => Err(self.mismatch("float")),
        }
    }

    /// Same as [`get_float64`](Self::get_float64).
    pub fn get_float(&self) -> Result<f64> {
        self.get_float64()
    }

    /// Returns the string contents, or `TypeMismatch`.
    pub fn get_string(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch("string"))
    }

    /// Returns the string contents, or an empty string for any other type.
    #[must_use]
    pub fn to_string_or_empty(&self) -> String {
        self.as_str().map(String::from).unwrap_or_default()
    }

    /// Numeric value as `f64`, for integers and floats alike.
    pub(crate) fn as_f64_lossy(&self) -> Option<f64> {
        match self.0 {
            Repr::Int32(i) => Some(f64::from(i)),
            Repr::Int64(i) => Some(i as f64),
            Repr::Float(f) => Some(f),
            _ => None,
        }
    }

    // === Borrowing accessors ===

    /// Gets the string contents. Returns `None` if not a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            Repr::ShortString(s) => Some(s.as_str()),
            Repr::LongString(s) => Some(s),
            _ => None,
        }
    }

    /// Gets a reference to the array storage. Returns `None` if not an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&NodeArray> {
        match &self.0 {
            Repr::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Gets a mutable reference to the array storage.
    pub fn as_array_mut(&mut self) -> Option<&mut NodeArray> {
        match &mut self.0 {
            Repr::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Gets a reference to the object storage. Returns `None` if not an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&NodeObject> {
        match &self.0 {
            Repr::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Gets a mutable reference to the object storage.
    pub fn as_object_mut(&mut self) -> Option<&mut NodeObject> {
        match &mut self.0 {
            Repr::Object(o) => Some(o),
            _ => None,
        }
    }

    fn array(&self) -> Result<&NodeArray> {
        self.as_array().ok_or_else(|| self.mismatch("array"))
    }

    fn array_mut(&mut self) -> Result<&mut NodeArray> {
        let got = self.node_type();
        self.as_array_mut().ok_or(NodeError::mismatch("array", got))
    }

    fn object(&self) -> Result<&NodeObject> {
        self.as_object().ok_or_else(|| self.mismatch("object"))
    }

    fn object_mut(&mut self) -> Result<&mut NodeObject> {
        let got = self.node_type();
        self.as_object_mut().ok_or(NodeError::mismatch("object", got))
    }

    /// Turns a non-array node into an empty array, dropping the old payload.
    fn ensure_array(&mut self) -> &mut NodeArray {
        if !self.is_array() {
            trace!("converting {} node to array", self.node_type());
            *self = Node::empty_array();
        }
        match &mut self.0 {
            Repr::Array(a) => a,
            _ => unreachable!(),
        }
    }

    /// Turns a non-object node into an empty object, dropping the old payload.
    fn ensure_object(&mut self) -> &mut NodeObject {
        if !self.is_object() {
            trace!("converting {} node to object", self.node_type());
            *self = Node::empty_object();
        }
        match &mut self.0 {
            Repr::Object(o) => o,
            _ => unreachable!(),
        }
    }

    // === Lifecycle ===

    /// Takes the payload out, leaving an undefined node behind.
    pub fn take(&mut self) -> Node {
        mem::take(self)
    }

    /// Drops the payload and makes this node undefined.
    pub fn reset(&mut self) {
        *self = Node::UNDEFINED;
    }

    // === Size ===

    /// Length of a string (in bytes), array or object.
    ///
    /// Fails with `NotSizeable` for every other type.
    pub fn size(&self) -> Result<usize> {
        match &self.0 {
            Repr::ShortString(s) => Ok(s.len()),
            Repr::LongString(s) => Ok(s.len()),
            Repr::Array(a) => Ok(a.len()),
            Repr::Object(o) => Ok(o.len()),
            _ => Err(NodeError::NotSizeable {
                got: self.node_type(),
            }),
        }
    }

    /// `true` for empty strings, arrays and objects, and for undefined or
    /// null. `false` for booleans and numbers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Repr::Undefined | Repr::Null => true,
            Repr::ShortString(s) => s.len() == 0,
            Repr::LongString(s) => s.is_empty(),
            Repr::Array(a) => a.is_empty(),
            Repr::Object(o) => o.is_empty(),
            Repr::Bool(_) | Repr::Int32(_) | Repr::Int64(_) | Repr::Float(_) => false,
        }
    }

    /// Empties an array or object in place, keeping its capacity. Any other
    /// node is reset to undefined.
    pub fn clear(&mut self) {
        match &mut self.0 {
            Repr::Array(a) => a.clear(),
            Repr::Object(o) => o.clear(),
            _ => self.reset(),
        }
    }

    // === Arrays ===

    /// Grows array capacity to at least `cap` without changing its length.
    ///
    /// A non-array node becomes an empty array. On allocation failure the node
    /// is left as it was.
    pub fn reserve_array(&mut self, cap: usize) -> Result<()> {
        match self.as_array_mut() {
            Some(array) => array.reserve(cap),
            None => {
                *self = NodeArray::with_capacity(cap)?.into();
                Ok(())
            }
        }
    }

    /// Gets an array element.
    pub fn at(&self, index: usize) -> Result<&Node> {
        self.array()?.at(index)
    }

    /// Gets an array element mutably.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Node> {
        self.array_mut()?.at_mut(index)
    }

    /// Appends an element. A non-array node becomes an empty array first.
    pub fn add_array_element(&mut self, value: impl Into<Node>) -> Result<()> {
        self.ensure_array().push(value)
    }

    /// Same as [`add_array_element`](Self::add_array_element).
    pub fn push(&mut self, value: impl Into<Node>) -> Result<()> {
        self.add_array_element(value)
    }

    /// Same as [`add_array_element`](Self::add_array_element).
    pub fn append(&mut self, value: impl Into<Node>) -> Result<()> {
        self.add_array_element(value)
    }

    /// Removes up to `delete_count` elements at `index` and returns them as an
    /// array node. See [`NodeArray::splice`].
    pub fn splice(&mut self, index: usize, delete_count: usize) -> Result<Node> {
        Ok(self.array_mut()?.splice(index, delete_count)?.into())
    }

    /// Removes elements like [`splice`](Self::splice), then inserts `elements`
    /// at `index`. See [`NodeArray::splice_insert`].
    pub fn splice_insert<I>(
        &mut self,
        index: usize,
        delete_count: usize,
        elements: I,
    ) -> Result<Node>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Ok(self
            .array_mut()?
            .splice_insert(index, delete_count, elements)?
            .into())
    }

    // === Objects ===

    /// Grows object capacity to at least `cap` without changing its members.
    ///
    /// A non-object node becomes an empty object. On allocation failure the
    /// node is left as it was.
    pub fn reserve_object(&mut self, cap: usize) -> Result<()> {
        match self.as_object_mut() {
            Some(object) => object.reserve(cap),
            None => {
                *self = NodeObject::with_capacity(cap)?.into();
                Ok(())
            }
        }
    }

    /// Gets an object member's value by name.
    pub fn member(&self, key: &str) -> Result<&Node> {
        self.object()?.member(key)
    }

    /// Gets an object member's value by name, mutably.
    pub fn member_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.object_mut()?.member_mut(key)
    }

    /// Returns `true` if this is an object with a member named `key`.
    #[must_use]
    pub fn has_object_member(&self, key: &str) -> bool {
        self.as_object().is_some_and(|o| o.contains_key(key))
    }

    /// Gets the name and value of the object member at `index`.
    pub fn object_member_at(&self, index: usize) -> Result<MemberRef<'_>> {
        self.object()?.member_at(index)
    }

    /// Sets a member, overwriting an existing one in place or appending a new
    /// one. A non-object node becomes an empty object first.
    pub fn set_member(&mut self, key: &str, value: impl Into<Node>) -> Result<()> {
        self.ensure_object().set(key, value).map(drop)
    }

    /// Sets every name/value pair in order, reserving room for all of them
    /// up front. A non-object node becomes an empty object first.
    pub fn add_members<I, K, V>(&mut self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Node>,
    {
        let members = members.into_iter();
        let object = self.ensure_object();
        object.reserve(object.len() + members.size_hint().0)?;
        for (key, value) in members {
            object.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Removes a member, returning whether it existed. Always `false` for
    /// non-objects.
    pub fn remove_member(&mut self, key: &str) -> bool {
        self.as_object_mut().is_some_and(|o| o.remove(key).is_some())
    }

    // === Iteration ===

    /// Iterates over array elements or object member values.
    pub fn iter(&self) -> Result<Iter<'_>> {
        if self.is_array() || self.is_object() {
            Ok(Iter::new(self))
        } else {
            Err(self.mismatch("array or object"))
        }
    }

    /// Iterates over object members as name/value pairs.
    pub fn members(&self) -> Result<Members<'_>> {
        Ok(Members::new(self.object()?))
    }
}

// === Default ===

impl Default for Node {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

// === PartialEq ===

impl PartialEq for Node {
    /// Numbers compare by value across integer widths and floats; everything
    /// else needs matching types. Objects compare without regard to order.
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_f64_lossy(), other.as_f64_lossy()) {
            return a == b;
        }

        match (&self.0, &other.0) {
            (Repr::Undefined, Repr::Undefined) | (Repr::Null, Repr::Null) => true,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::Array(a), Repr::Array(b)) => a == b,
            (Repr::Object(a), Repr::Object(b)) => a == b,
            _ => match (self.as_str(), other.as_str()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

// === Debug ===

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Undefined => f.write_str("undefined"),
            Repr::Null => f.write_str("null"),
            Repr::Bool(b) => Debug::fmt(b, f),
            Repr::Int32(i) => Debug::fmt(i, f),
            Repr::Int64(i) => Debug::fmt(i, f),
            Repr::Float(x) => Debug::fmt(x, f),
            Repr::ShortString(s) => Debug::fmt(s, f),
            Repr::LongString(s) => Debug::fmt(&**s, f),
            Repr::Array(a) => Debug::fmt(a, f),
            Repr::Object(o) => Debug::fmt(o, f),
        }
    }
}

// === Index ===

impl Index<usize> for Node {
    type Output = Node;

    /// Panics on a non-array or out-of-range index. Use [`Node::at`] to get
    /// an error instead.
    fn index(&self, index: usize) -> &Node {
        self.at(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl IndexMut<usize> for Node {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        self.at_mut(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Index<&str> for Node {
    type Output = Node;

    /// Panics on a non-object or missing key. Use [`Node::member`] to get an
    /// error instead.
    fn index(&self, key: &str) -> &Node {
        self.member(key).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut Node {
        self.member_mut(key).unwrap_or_else(|e| panic!("{e}"))
    }
}

// === From implementations ===

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node(Repr::Bool(b))
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node(Repr::Int32(i))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node(Repr::Int64(i))
    }
}

impl From<f32> for Node {
    fn from(f: f32) -> Self {
        Node(Repr::Float(f64::from(f)))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node(Repr::Float(f))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::from_str_storage(s)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Self::from_str_storage(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        match InlineStr::new(&s) {
            Some(inline) => Node(Repr::ShortString(inline)),
            None => Node(Repr::LongString(s.into_boxed_str())),
        }
    }
}

impl From<NodeArray> for Node {
    fn from(array: NodeArray) -> Self {
        Node(Repr::Array(array))
    }
}

impl From<NodeObject> for Node {
    fn from(object: NodeObject) -> Self {
        Node(Repr::Object(object))
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::NULL,
        }
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect::<NodeArray>().into()
    }
}

impl<T: Into<Node>> FromIterator<T> for Node {
    /// Collect into an array node.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        NodeArray::from_iter(iter).into()
    }
}
