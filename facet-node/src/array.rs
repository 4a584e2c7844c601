//! Array storage.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut};

use crate::buffer::RawBuf;
use crate::error::{NodeError, Result};
use crate::node::Node;

/// Capacity class an array jumps to when an append finds it full.
#[inline]
pub(crate) const fn next_array_capacity(cap: usize) -> usize {
    (cap + 8) & !7
}

/// The elements of an array-typed [`Node`].
///
/// A `NodeArray` is a pointer plus `u32` length and capacity, so it fits in a
/// `Node` next to the type tag. Appending past capacity grows to the next
/// multiple of 8 using `realloc`.
#[derive(Clone, Default)]
pub struct NodeArray(RawBuf<Node>);

impl NodeArray {
    /// Creates an empty array without allocating.
    #[must_use]
    pub const fn new() -> Self {
        NodeArray(RawBuf::new())
    }

    /// Creates an empty array with room for `cap` elements.
    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut array = Self::new();
        array.reserve(cap)?;
        Ok(array)
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the array has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the array can hold without growing.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Node] {
        self.0.as_slice()
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Node] {
        self.0.as_mut_slice()
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.as_slice().iter()
    }

    /// Gets an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.as_slice().get(index)
    }

    /// Gets a mutable element by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.as_mut_slice().get_mut(index)
    }

    /// Gets an element by index, failing with `IndexOutOfBounds`.
    pub fn at(&self, index: usize) -> Result<&Node> {
        let len = self.len();
        self.get(index)
            .ok_or_else(|| NodeError::out_of_bounds(index, len))
    }

    /// Mutable counterpart of [`at`](Self::at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.len();
        self.get_mut(index)
            .ok_or_else(|| NodeError::out_of_bounds(index, len))
    }

    /// Grows the capacity to at least `cap` without changing the length.
    pub fn reserve(&mut self, cap: usize) -> Result<()> {
        self.0.grow_to(cap)
    }

    /// Appends an element, growing to the next multiple of 8 when full.
    pub fn push(&mut self, value: impl Into<Node>) -> Result<()> {
        if self.len() == self.capacity() {
            self.0.grow_to(next_array_capacity(self.capacity()))?;
        }
        self.0.push_within_capacity(value.into());
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<Node> {
        match self.len() {
            0 => None,
            len => Some(self.0.remove(len - 1)),
        }
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> Result<Node> {
        if index >= self.len() {
            return Err(NodeError::out_of_bounds(index, self.len()));
        }
        Ok(self.0.remove(index))
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Removes up to `delete_count` elements starting at `index` and returns
    /// them, in order, as a new array.
    ///
    /// If `index` is past the end nothing is removed and the result is empty.
    pub fn splice(&mut self, index: usize, delete_count: usize) -> Result<NodeArray> {
        let count = self.clamp_delete(index, delete_count);
        let mut removed = NodeArray::with_capacity(count)?;
        if count != 0 {
            self.0.move_range_into(index, count, &mut removed.0);
        }
        Ok(removed)
    }

    /// Like [`splice`](Self::splice), then inserts `elements` at `index`
    /// (clamped to the new length).
    ///
    /// Every allocation the call needs happens before the array is touched, so
    /// on error the array is unchanged.
    pub fn splice_insert<I>(
        &mut self,
        index: usize,
        delete_count: usize,
        elements: I,
    ) -> Result<NodeArray>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let mut staged = stage(elements)?;
        let count = self.clamp_delete(index, delete_count);
        let mut removed = NodeArray::with_capacity(count)?;
        let new_len = self.len() - count + staged.len();
        self.0.grow_to(new_len)?;

        if count != 0 {
            self.0.move_range_into(index, count, &mut removed.0);
        }
        let at = index.min(self.len());
        self.0.insert_all(at, &mut staged);
        Ok(removed)
    }

    fn clamp_delete(&self, index: usize, delete_count: usize) -> usize {
        match self.len().checked_sub(index) {
            Some(available) if available > 0 => delete_count.min(available),
            _ => 0,
        }
    }
}

/// Collects `elements` into a scratch buffer, growing by the array capacity class.
fn stage<I>(elements: I) -> Result<RawBuf<Node>>
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    let iter = elements.into_iter();
    let mut staged = RawBuf::new();
    staged.grow_to(iter.size_hint().0)?;
    for element in iter {
        if staged.len() == staged.capacity() {
            staged.grow_to(next_array_capacity(staged.capacity()))?;
        }
        staged.push_within_capacity(element.into());
    }
    Ok(staged)
}

// === Iterators ===

impl<'a> IntoIterator for &'a NodeArray {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut NodeArray {
    type Item = &'a mut Node;
    type IntoIter = core::slice::IterMut<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Into<Node>> FromIterator<T> for NodeArray {
    /// Aborts on allocation failure, like `Vec`.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = NodeArray::new();
        array.0.grow_to_or_abort(iter.size_hint().0);
        for value in iter {
            if array.len() == array.capacity() {
                array
                    .0
                    .grow_to_or_abort(next_array_capacity(array.capacity()));
            }
            array.0.push_within_capacity(value.into());
        }
        array
    }
}

// === Index ===

impl Index<usize> for NodeArray {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.as_slice()[index]
    }
}

impl IndexMut<usize> for NodeArray {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.as_mut_slice()[index]
    }
}

// === Comparison ===

impl PartialEq for NodeArray {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Debug for NodeArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}
