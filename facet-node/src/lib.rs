//! `facet-node` provides a compact, dynamically-typed value for JSON-like data.
//!
//! # Features
//!
//! - **24-byte `Node`**: a one-byte type tag plus payload, checked at compile time
//! - **Inline short strings**: strings and member names up to 22 bytes never allocate
//! - **Exclusive ownership**: every node owns its payload; `clone` is a deep copy
//! - **Fallible growth**: allocation failure is an error, not an abort, and leaves
//!   the node as it was
//! - **`no_std` compatible**: works with just `alloc`
//!
//! # Design
//!
//! Arrays and objects store their items in a single buffer grown with
//! `realloc`, moving every live item in one bulk copy. Array capacity grows in
//! steps of 8, object capacity in steps of 4. Objects keep insertion order and
//! look members up by linear scan, which suits the small objects this type is
//! meant for.
//!
//! ```
//! use facet_node::{Node, node};
//!
//! let mut config = node!({"name": "demo", "retries": 3});
//! config.set_member("verbose", true)?;
//! config["retries"] = Node::from(5);
//!
//! assert_eq!(config.size()?, 3);
//! assert_eq!(config.member("retries")?.get_int32()?, 5);
//! # Ok::<(), facet_node::NodeError>(())
//! ```
//!
//! # Cargo features
//!
//! - `std` (default): links the standard library
//! - `tracing`: logs buffer growth at trace level and allocation failures at debug level
//! - `serde_json`: implements [`ValueView`] for `serde_json::Value`, so JSON
//!   documents convert with [`Node::from_view`]

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]

extern crate alloc;

#[macro_use]
mod macros;

mod buffer;

mod error;
pub use error::{NodeError, Result};

mod inline;
pub use inline::INLINE_LEN_MAX;

mod key;
pub use key::MemberKey;

mod array;
pub use array::NodeArray;

mod object;
pub use object::{Member, MemberRef, NodeObject};

mod node;
pub use node::{Node, NodeType};

mod get;
pub use get::FromNode;

mod iter;
pub use iter::{Iter, Members};

mod view;
pub use view::ValueView;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
