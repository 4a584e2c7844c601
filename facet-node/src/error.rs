//! Errors reported by [`Node`](crate::Node) operations.

use alloc::string::String;

use crate::NodeType;

/// Error type for node operations.
///
/// Every fallible operation checks its preconditions before touching any
/// storage, so a returned error means the node is exactly as it was before
/// the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The operation requires a type the node does not currently hold
    TypeMismatch {
        /// What the operation needed
        expected: &'static str,
        /// What the node actually contained
        got: NodeType,
    },
    /// An array index or object position past the live range
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of live elements or members
        len: usize,
    },
    /// Keyed object access for a key that isn't present
    MemberNotFound {
        /// The key that was looked up
        name: String,
    },
    /// `size()` was called on a type that has no size
    NotSizeable {
        /// The type the node holds
        got: NodeType,
    },
    /// Growing a buffer failed
    AllocationFailure {
        /// The capacity (in elements) that could not be allocated
        capacity: usize,
    },
}

impl core::fmt::Display for NodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NodeError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            NodeError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len {len})")
            }
            NodeError::MemberNotFound { name } => {
                write!(f, "object member `{name}` not found")
            }
            NodeError::NotSizeable { got } => write!(f, "{got} does not have a size"),
            NodeError::AllocationFailure { capacity } => {
                write!(f, "failed to allocate storage for {capacity} elements")
            }
        }
    }
}

impl core::error::Error for NodeError {}

impl NodeError {
    pub(crate) fn mismatch(expected: &'static str, got: NodeType) -> Self {
        NodeError::TypeMismatch { expected, got }
    }

    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        NodeError::IndexOutOfBounds { index, len }
    }
}

/// Result type for node operations.
pub type Result<T> = core::result::Result<T, NodeError>;
