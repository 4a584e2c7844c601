//! Read-only views of foreign value trees, and conversion from them.
//!
//! [`ValueView`] is the small capability surface [`Node::from_view`] needs to
//! rebuild an owned tree from some other value representation. It never
//! mutates what it looks at.

use crate::array::NodeArray;
use crate::error::Result;
use crate::node::Node;
use crate::object::NodeObject;

/// Read-only access to a dynamically-typed value.
///
/// Predicates are checked in declaration order by [`Node::from_view`], so an
/// implementation may report more than one (a number that is both int64 and
/// float64, say) and the first one wins. Getters return `None` when the value
/// isn't of the requested type.
pub trait ValueView {
    /// No value, or an explicit null.
    fn is_void(&self) -> bool;
    /// Boolean
    fn is_bool(&self) -> bool;
    /// 32-bit integer
    fn is_int32(&self) -> bool;
    /// 64-bit integer
    fn is_int64(&self) -> bool;
    /// Single-precision float
    fn is_float32(&self) -> bool {
        false
    }
    /// Double-precision float
    fn is_float64(&self) -> bool;
    /// UTF-8 string
    fn is_string(&self) -> bool;
    /// Heterogeneous sequence
    fn is_array(&self) -> bool;
    /// Homogeneous sequence, converted the same way as an array
    fn is_vector(&self) -> bool {
        false
    }
    /// Named members
    fn is_object(&self) -> bool;

    /// Boolean payload
    fn get_bool(&self) -> Option<bool>;
    /// 32-bit integer payload
    fn get_int32(&self) -> Option<i32>;
    /// 64-bit integer payload
    fn get_int64(&self) -> Option<i64>;
    /// Single-precision float payload
    fn get_float32(&self) -> Option<f32> {
        None
    }
    /// Double-precision float payload
    fn get_float64(&self) -> Option<f64>;
    /// String payload
    fn get_string(&self) -> Option<&str>;

    /// Number of elements or members. Zero for scalars.
    fn size(&self) -> usize;
    /// Element `index` of an array or vector.
    fn element(&self, index: usize) -> Option<&Self>;
    /// Name and value of member `index` of an object.
    fn member_at(&self, index: usize) -> Option<(&str, &Self)>;
}

impl Node {
    /// Builds an owned node tree from a view.
    ///
    /// Void becomes null, scalars map directly, arrays and vectors become
    /// arrays and objects become objects, each with capacity reserved for the
    /// reported size. Anything the view doesn't classify becomes null.
    pub fn from_view<V: ValueView + ?Sized>(view: &V) -> Result<Node> {
        if view.is_void() {
            return Ok(Node::NULL);
        }

        let node = if view.is_bool() {
            view.get_bool().map(Node::from)
        } else if view.is_int32() {
            view.get_int32().map(Node::from)
        } else if view.is_int64() {
            view.get_int64().map(Node::from)
        } else if view.is_float32() {
            view.get_float32().map(Node::from)
        } else if view.is_float64() {
            view.get_float64().map(Node::from)
        } else if view.is_string() {
            view.get_string().map(Node::from)
        } else if view.is_array() || view.is_vector() {
            let len = view.size();
            let mut array = NodeArray::with_capacity(len)?;
            for element in (0..len).filter_map(|i| view.element(i)) {
                array.push(Node::from_view(element)?)?;
            }
            Some(array.into())
        } else if view.is_object() {
            let len = view.size();
            let mut object = NodeObject::with_capacity(len)?;
            for (name, value) in (0..len).filter_map(|i| view.member_at(i)) {
                object.set(name, Node::from_view(value)?)?;
            }
            Some(object.into())
        } else {
            None
        };

        Ok(node.unwrap_or(Node::NULL))
    }

    /// Replaces this node with the conversion of `view`.
    ///
    /// The conversion runs first, so on error this node is unchanged.
    pub fn assign_view<V: ValueView + ?Sized>(&mut self, view: &V) -> Result<()> {
        *self = Node::from_view(view)?;
        Ok(())
    }
}

impl ValueView for Node {
    fn is_void(&self) -> bool {
        Node::is_void(self)
    }

    fn is_bool(&self) -> bool {
        Node::is_bool(self)
    }

    fn is_int32(&self) -> bool {
        Node::is_int32(self)
    }

    fn is_int64(&self) -> bool {
        Node::is_int64(self)
    }

    fn is_float64(&self) -> bool {
        Node::is_float(self)
    }

    fn is_string(&self) -> bool {
        Node::is_string(self)
    }

    fn is_array(&self) -> bool {
        Node::is_array(self)
    }

    fn is_object(&self) -> bool {
        Node::is_object(self)
    }

    fn get_bool(&self) -> Option<bool> {
        Node::get_bool(self).ok()
    }

    fn get_int32(&self) -> Option<i32> {
        Node::get_int32(self).ok()
    }

    fn get_int64(&self) -> Option<i64> {
        Node::get_int64(self).ok()
    }

    fn get_float64(&self) -> Option<f64> {
        Node::get_float64(self).ok()
    }

    fn get_string(&self) -> Option<&str> {
        self.as_str()
    }

    fn size(&self) -> usize {
        Node::size(self).unwrap_or(0)
    }

    fn element(&self, index: usize) -> Option<&Node> {
        self.as_array()?.get(index)
    }

    fn member_at(&self, index: usize) -> Option<(&str, &Node)> {
        let member = self.as_object()?.as_slice().get(index)?;
        Some((member.name(), member.value()))
    }
}

/// Integers that fit `i64` report as int64 and every other number as float64.
/// Member order follows `serde_json::Map` iteration order.
#[cfg(feature = "serde_json")]
impl ValueView for serde_json::Value {
    fn is_void(&self) -> bool {
        self.is_null()
    }

    fn is_bool(&self) -> bool {
        self.is_boolean()
    }

    fn is_int32(&self) -> bool {
        false
    }

    fn is_int64(&self) -> bool {
        serde_json::Value::is_i64(self)
    }

    fn is_float64(&self) -> bool {
        self.is_number() && !serde_json::Value::is_i64(self)
    }

    fn is_string(&self) -> bool {
        serde_json::Value::is_string(self)
    }

    fn is_array(&self) -> bool {
        serde_json::Value::is_array(self)
    }

    fn is_object(&self) -> bool {
        serde_json::Value::is_object(self)
    }

    fn get_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn get_int32(&self) -> Option<i32> {
        self.as_i64().and_then(|i| i32::try_from(i).ok())
    }

    fn get_int64(&self) -> Option<i64> {
        self.as_i64()
    }

    fn get_float64(&self) -> Option<f64> {
        self.as_f64()
    }

    fn get_string(&self) -> Option<&str> {
        self.as_str()
    }

    fn size(&self) -> usize {
        match self {
            serde_json::Value::String(s) => s.len(),
            serde_json::Value::Array(a) => a.len(),
            serde_json::Value::Object(o) => o.len(),
            _ => 0,
        }
    }

    fn element(&self, index: usize) -> Option<&serde_json::Value> {
        self.as_array()?.get(index)
    }

    fn member_at(&self, index: usize) -> Option<(&str, &serde_json::Value)> {
        self.as_object()?
            .iter()
            .nth(index)
            .map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn node_view_round_trips() {
        let mut original = Node::empty_object();
        original.set_member("list", vec![Node::from(1), Node::from("two")]).unwrap();
        original.set_member("flag", true).unwrap();
        original.set_member("none", Node::UNDEFINED).unwrap();

        let copy = Node::from_view(&original).unwrap();
        assert_eq!(copy["list"], original["list"]);
        assert_eq!(copy["flag"], Node::from(true));
        // Undefined converts to null.
        assert!(copy["none"].is_null());
        assert_eq!(copy.as_object().unwrap().capacity(), 3);
    }

    #[test]
    fn assign_view_replaces() {
        let source = Node::from(vec![1.5, 2.5]);
        let mut target = Node::from("old");
        target.assign_view(&source).unwrap();
        assert_eq!(target, source);
        assert_eq!(target.as_array().unwrap().capacity(), 2);
    }

    struct Opaque;

    impl ValueView for Opaque {
        fn is_void(&self) -> bool {
            false
        }
        fn is_bool(&self) -> bool {
            false
        }
        fn is_int32(&self) -> bool {
            false
        }
        fn is_int64(&self) -> bool {
            false
        }
        fn is_float64(&self) -> bool {
            false
        }
        fn is_string(&self) -> bool {
            false
        }
        fn is_array(&self) -> bool {
            false
        }
        fn is_object(&self) -> bool {
            false
        }
        fn get_bool(&self) -> Option<bool> {
            None
        }
        fn get_int32(&self) -> Option<i32> {
            None
        }
        fn get_int64(&self) -> Option<i64> {
            None
        }
        fn get_float64(&self) -> Option<f64> {
            None
        }
        fn get_string(&self) -> Option<&str> {
            None
        }
        fn size(&self) -> usize {
            0
        }
        fn element(&self, _: usize) -> Option<&Self> {
            None
        }
        fn member_at(&self, _: usize) -> Option<(&str, &Self)> {
            None
        }
    }

    #[test]
    fn unknown_kind_becomes_null() {
        assert!(Node::from_view(&Opaque).unwrap().is_null());
    }
}
