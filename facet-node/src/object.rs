//! Object storage.

use core::fmt::{self, Debug, Formatter};
use core::mem;

use crate::buffer::RawBuf;
use crate::error::{NodeError, Result};
use crate::key::MemberKey;
use crate::node::Node;

/// Capacity class an object jumps to when an insertion finds it full.
#[inline]
pub(crate) const fn next_object_capacity(len: usize) -> usize {
    (len + 4) & !3
}

/// A named member of an object.
#[derive(Clone, PartialEq)]
pub struct Member {
    key: MemberKey,
    value: Node,
}

impl Member {
    /// The member's name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    /// The member's key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    /// The member's value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Node {
        &self.value
    }

    /// The member's value, mutably.
    #[inline]
    pub fn value_mut(&mut self) -> &mut Node {
        &mut self.value
    }

    /// Splits the member into its key and value.
    pub fn into_parts(self) -> (MemberKey, Node) {
        (self.key, self.value)
    }
}

impl Debug for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}

/// Borrowed name and value of an object member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberRef<'a> {
    /// The member's name
    pub name: &'a str,
    /// The member's value
    pub value: &'a Node,
}

impl<'a> From<&'a Member> for MemberRef<'a> {
    fn from(member: &'a Member) -> Self {
        MemberRef {
            name: member.name(),
            value: member.value(),
        }
    }
}

/// The members of an object-typed [`Node`].
///
/// Members are kept in insertion order and looked up by a linear scan, which
/// beats hashing for the handful of members typical objects have. Keys are
/// unique. Inserting into a full object grows it to the next multiple of 4
/// using `realloc`.
#[derive(Clone, Default)]
pub struct NodeObject(RawBuf<Member>);

impl NodeObject {
    /// Creates an empty object without allocating.
    #[must_use]
    pub const fn new() -> Self {
        NodeObject(RawBuf::new())
    }

    /// Creates an empty object with room for `cap` members.
    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut object = Self::new();
        object.reserve(cap)?;
        Ok(object)
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the object has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of members the object can hold without growing.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Grows the capacity to at least `cap` without changing the members.
    pub fn reserve(&mut self, cap: usize) -> Result<()> {
        self.0.grow_to(cap)
    }

    /// Returns the members in insertion order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Member] {
        self.0.as_slice()
    }

    /// Returns an iterator over the members in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Member> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable members. Keys stay read-only.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Member> {
        self.0.as_mut_slice().iter_mut()
    }

    /// Returns an iterator over member names.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.iter().map(Member::name)
    }

    /// Returns an iterator over member values.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.iter().map(Member::value)
    }

    /// Position of the member named `key`.
    #[inline]
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.iter().position(|m| m.key == key)
    }

    /// Returns `true` if a member named `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Gets a member's value by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.iter().find(|m| m.key == key).map(Member::value)
    }

    /// Gets a member's value by name, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.iter_mut().find(|m| m.key == key).map(Member::value_mut)
    }

    /// Gets a member's value by name, failing with `MemberNotFound`.
    pub fn member(&self, key: &str) -> Result<&Node> {
        self.get(key).ok_or_else(|| NodeError::MemberNotFound { name: key.into() })
    }

    /// Mutable counterpart of [`member`](Self::member).
    pub fn member_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.get_mut(key)
            .ok_or_else(|| NodeError::MemberNotFound { name: key.into() })
    }

    /// Gets the member at `index` in insertion order.
    pub fn member_at(&self, index: usize) -> Result<MemberRef<'_>> {
        self.as_slice()
            .get(index)
            .map(MemberRef::from)
            .ok_or_else(|| NodeError::out_of_bounds(index, self.len()))
    }

    /// Sets the member named `key`.
    ///
    /// An existing member is overwritten in place and its old value returned;
    /// otherwise a new member is appended.
    pub fn set(&mut self, key: &str, value: impl Into<Node>) -> Result<Option<Node>> {
        let value = value.into();
        if let Some(index) = self.position(key) {
            let slot = &mut self.0.as_mut_slice()[index].value;
            return Ok(Some(mem::replace(slot, value)));
        }

        if self.len() == self.capacity() {
            self.0.grow_to(next_object_capacity(self.len()))?;
        }
        self.0.push_within_capacity(Member {
            key: MemberKey::new(key),
            value,
        });
        Ok(None)
    }

    /// Removes the member named `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the member named `key`, returning its key and value.
    ///
    /// Later members shift left by one slot, keeping their order.
    pub fn remove_entry(&mut self, key: &str) -> Option<(MemberKey, Node)> {
        let index = self.position(key)?;
        Some(self.0.remove(index).into_parts())
    }

    /// Drops all members, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a NodeObject {
    type Item = &'a Member;
    type IntoIter = core::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: Into<Node>> FromIterator<(K, V)> for NodeObject {
    /// Later duplicates overwrite earlier ones. Aborts on allocation failure,
    /// like `Vec`.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut object = NodeObject::new();
        object.0.grow_to_or_abort(iter.size_hint().0);
        for (key, value) in iter {
            if object.len() == object.capacity() && !object.contains_key(key.as_ref()) {
                object
                    .0
                    .grow_to_or_abort(next_object_capacity(object.len()));
            }
            // Capacity is ensured above, so this can't fail.
            let _ = object.set(key.as_ref(), value);
        }
        object
    }
}

impl PartialEq for NodeObject {
    /// Member order doesn't matter.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|m| other.get(m.name()).is_some_and(|v| *v == m.value))
    }
}

impl Debug for NodeObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|m| (&m.key, &m.value)))
            .finish()
    }
}
