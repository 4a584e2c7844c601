//! Forward iteration over container nodes.

use core::iter::FusedIterator;

use crate::node::Node;
use crate::object::{Member, MemberRef, NodeObject};

#[derive(Clone, Copy)]
enum Container<'a> {
    Array(&'a [Node]),
    Object(&'a [Member]),
}

impl Container<'_> {
    fn len(&self) -> usize {
        match self {
            Container::Array(a) => a.len(),
            Container::Object(o) => o.len(),
        }
    }
}

/// Iterator over the elements of an array node or the member values of an
/// object node, created by [`Node::iter`].
///
/// It is a container reference plus a position. Cloning it gives an
/// independent cursor at the same position.
#[derive(Clone)]
pub struct Iter<'a> {
    container: Container<'a>,
    index: usize,
}

impl<'a> Iter<'a> {
    /// Anything other than an array or object iterates as empty.
    pub(crate) fn new(node: &'a Node) -> Self {
        let container = match (node.as_array(), node.as_object()) {
            (Some(array), _) => Container::Array(array.as_slice()),
            (None, Some(object)) => Container::Object(object.as_slice()),
            (None, None) => Container::Array(Default::default()),
        };
        Iter {
            container,
            index: 0,
        }
    }

    /// Position of the item the next call to [`next`](Iterator::next) yields.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name and value of the member at the current position.
    ///
    /// Returns `None` when iterating an array or once the iterator is
    /// exhausted.
    #[must_use]
    pub fn member(&self) -> Option<MemberRef<'a>> {
        match self.container {
            Container::Object(members) => members.get(self.index).map(MemberRef::from),
            Container::Array(_) => None,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let item = match self.container {
            Container::Array(elements) => elements.get(self.index)?,
            Container::Object(members) => members.get(self.index)?.value(),
        };
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.container.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Iterator over the members of an object node, created by [`Node::members`].
#[derive(Clone)]
pub struct Members<'a> {
    inner: core::slice::Iter<'a, Member>,
}

impl<'a> Members<'a> {
    pub(crate) fn new(object: &'a NodeObject) -> Self {
        Members {
            inner: object.iter(),
        }
    }
}

impl<'a> Iterator for Members<'a> {
    type Item = MemberRef<'a>;

    fn next(&mut self) -> Option<MemberRef<'a>> {
        self.inner.next().map(MemberRef::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Members<'_> {}
impl FusedIterator for Members<'_> {}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    /// Non-containers iterate as empty; use [`Node::iter`] to get an error
    /// instead.
    fn into_iter(self) -> Iter<'a> {
        Iter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn array_elements_in_order() {
        let n = Node::from(vec![1, 2, 3]);
        let seen: Vec<i64> = n.iter().unwrap().map(|v| v.get_int().unwrap()).collect();
        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(n.iter().unwrap().len(), 3);
    }

    #[test]
    fn object_values_and_members() {
        let n = Node::object_from([("x", 1), ("y", 2)]).unwrap();
        let values: Vec<_> = n.iter().unwrap().cloned().collect();
        assert_eq!(values, [Node::from(1), Node::from(2)]);

        let mut it = n.iter().unwrap();
        assert_eq!(it.member().unwrap().name, "x");
        it.next();
        assert_eq!(it.index(), 1);
        assert_eq!(it.member().unwrap().name, "y");
        it.next();
        assert!(it.member().is_none());
        assert!(it.next().is_none());

        let names: Vec<_> = n.members().unwrap().map(|m| m.name).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn restart_from_clone() {
        let n = Node::from(vec!["a", "b"]);
        let start = n.iter().unwrap();
        let mut ahead = start.clone();
        ahead.next();
        assert_eq!(start.count(), 2);
        assert_eq!(ahead.count(), 1);
    }

    #[test]
    fn scalars_are_not_iterable() {
        assert!(Node::from(1).iter().is_err());
        assert!(Node::from(vec![1]).members().is_err());
        assert_eq!((&Node::from("s")).into_iter().count(), 0);
    }
}
