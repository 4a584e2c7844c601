//! Object member keys.

use alloc::boxed::Box;
use alloc::string::String;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::inline::InlineStr;

/// The name of an object member.
///
/// Keys up to [`INLINE_LEN_MAX`](crate::INLINE_LEN_MAX) bytes live inside the
/// 24-byte key itself; longer keys own a heap buffer of exactly their length.
/// Neither form points into itself, so the object storage can move keys around
/// with a plain byte copy when it reallocates.
#[derive(Clone)]
pub struct MemberKey(KeyRepr);

#[derive(Clone)]
enum KeyRepr {
    Inline(InlineStr),
    Heap(Box<str>),
}

const _: () = assert!(core::mem::size_of::<MemberKey>() <= 24);

impl MemberKey {
    /// Creates a key from a `&str`.
    #[must_use]
    pub fn new(s: &str) -> Self {
        match InlineStr::new(s) {
            Some(inline) => MemberKey(KeyRepr::Inline(inline)),
            None => MemberKey(KeyRepr::Heap(Box::from(s))),
        }
    }

    /// Returns the key as a `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            KeyRepr::Inline(s) => s.as_str(),
            KeyRepr::Heap(s) => s,
        }
    }

    /// Returns the length of the key in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            KeyRepr::Inline(s) => s.len(),
            KeyRepr::Heap(s) => s.len(),
        }
    }

    /// Returns `true` if the key is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) fn is_inline(&self) -> bool {
        matches!(self.0, KeyRepr::Inline(_))
    }
}

impl Deref for MemberKey {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for MemberKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for MemberKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for MemberKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MemberKey {}

impl PartialEq<str> for MemberKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for MemberKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for MemberKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for MemberKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Debug for MemberKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl From<&str> for MemberKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MemberKey {
    fn from(s: String) -> Self {
        match InlineStr::new(&s) {
            Some(inline) => MemberKey(KeyRepr::Inline(inline)),
            None => MemberKey(KeyRepr::Heap(s.into_boxed_str())),
        }
    }
}

impl From<&String> for MemberKey {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl From<MemberKey> for String {
    fn from(key: MemberKey) -> Self {
        match key.0 {
            KeyRepr::Inline(s) => s.as_str().into(),
            KeyRepr::Heap(s) => s.into_string(),
        }
    }
}
