//! Fixed-capacity string stored directly inside its owner.

use core::fmt::{self, Debug, Formatter};

/// Longest string (in bytes) that is stored inline instead of on the heap.
pub const INLINE_LEN_MAX: usize = 22;

/// Up to [`INLINE_LEN_MAX`] bytes of UTF-8 plus a length byte.
///
/// Alignment is 1, so an enum carrying this next to a pointer-sized variant
/// packs the discriminant into the spare leading byte.
#[derive(Clone, Copy)]
pub(crate) struct InlineStr {
    len: u8,
    bytes: [u8; INLINE_LEN_MAX],
}

const _: () = assert!(core::mem::size_of::<InlineStr>() == INLINE_LEN_MAX + 1);
const _: () = assert!(INLINE_LEN_MAX <= u8::MAX as usize);

impl InlineStr {
    /// Returns `None` if `s` is longer than [`INLINE_LEN_MAX`].
    #[inline]
    pub(crate) fn new(s: &str) -> Option<Self> {
        if s.len() > INLINE_LEN_MAX {
            return None;
        }
        let mut bytes = [0u8; INLINE_LEN_MAX];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Some(Self {
            len: s.len() as u8,
            bytes,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub(crate) fn as_str(&self) -> &str {
        // Safety: the bytes were copied from a &str and the length is unchanged.
        unsafe { core::str::from_utf8_unchecked(&self.bytes[..self.len()]) }
    }
}

impl Debug for InlineStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}
