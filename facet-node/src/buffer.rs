//! Owned, growable raw buffer shared by array and object storage.
//!
//! `RawBuf<T>` is deliberately small: one pointer plus two `u32` counters, so
//! that a [`Node`](crate::Node) holding one stays within its 24-byte budget.
//! Elements `[0, len)` are initialized; slots `[len, cap)` are never read.
//!
//! Growth goes through [`realloc`], which relocates the live elements by raw
//! byte copy. Every Rust value may be moved that way, so no per-element fix-up
//! is needed after the buffer moves.

use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error, realloc};
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::{NodeError, Result};
use crate::{debug, trace};

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    len: u32,
    cap: u32,
    _owns: PhantomData<T>,
}

// Safety: RawBuf owns its elements exactly like Vec<T> does.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// An empty buffer. Does not allocate.
    pub(crate) const fn new() -> Self {
        const { assert!(mem::size_of::<T>() != 0) };
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            _owns: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap as usize
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }

    fn layout(cap: usize) -> Option<Layout> {
        Layout::array::<T>(cap).ok()
    }

    /// Grows the buffer so it can hold at least `new_cap` elements.
    ///
    /// Does nothing if the capacity is already large enough. On failure the
    /// buffer keeps its old allocation, length and capacity.
    pub(crate) fn grow_to(&mut self, new_cap: usize) -> Result<()> {
        if new_cap <= self.capacity() {
            return Ok(());
        }

        let fail = || {
            debug!("allocation of {new_cap} elements failed");
            NodeError::AllocationFailure { capacity: new_cap }
        };

        if new_cap > u32::MAX as usize {
            return Err(fail());
        }
        let new_layout = Self::layout(new_cap).ok_or_else(fail)?;

        let raw = unsafe {
            if self.cap == 0 {
                alloc(new_layout)
            } else {
                // The old layout was valid when it was allocated, and it is smaller.
                let old_layout = Layout::array::<T>(self.capacity()).unwrap_unchecked();
                realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
            }
        };

        let ptr = NonNull::new(raw.cast::<T>()).ok_or_else(fail)?;
        trace!("grew buffer from {} to {new_cap} elements", self.cap);
        self.ptr = ptr;
        self.cap = new_cap as u32;
        Ok(())
    }

    /// Like [`grow_to`](Self::grow_to), but aborts through
    /// [`handle_alloc_error`] the way `Vec` does. Used where the signature
    /// can't carry an error (`Clone`, `FromIterator`).
    pub(crate) fn grow_to_or_abort(&mut self, new_cap: usize) {
        if self.grow_to(new_cap).is_err() {
            match Self::layout(new_cap) {
                Some(layout) => handle_alloc_error(layout),
                None => panic!("capacity overflow"),
            }
        }
    }

    /// Appends `value`. The caller must have grown the buffer first.
    pub(crate) fn push_within_capacity(&mut self, value: T) {
        assert!(self.len < self.cap, "push past capacity");
        unsafe {
            self.ptr.as_ptr().add(self.len()).write(value);
        }
        self.len += 1;
    }

    /// Removes the element at `index`, shifting the tail left by one slot.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "remove index out of range");
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Moves `count` elements starting at `start` onto the end of `out`, then
    /// closes the gap with a single bulk copy.
    ///
    /// `out` must already have room for `count` more elements.
    pub(crate) fn move_range_into(&mut self, start: usize, count: usize, out: &mut RawBuf<T>) {
        let len = self.len();
        assert!(start <= len && count <= len - start, "range out of bounds");
        assert!(out.capacity() - out.len() >= count, "destination too small");
        unsafe {
            let src = self.ptr.as_ptr().add(start);
            ptr::copy_nonoverlapping(src, out.ptr.as_ptr().add(out.len()), count);
            ptr::copy(src.add(count), src, len - start - count);
        }
        out.len += count as u32;
        self.len -= count as u32;
    }

    /// Moves every element of `src` into this buffer at `index`, shifting the
    /// tail right. Leaves `src` empty.
    ///
    /// This buffer must already have room for `src.len()` more elements.
    pub(crate) fn insert_all(&mut self, index: usize, src: &mut RawBuf<T>) {
        let len = self.len();
        let count = src.len();
        assert!(index <= len, "insert index out of range");
        assert!(self.capacity() - len >= count, "insert past capacity");
        unsafe {
            let dst = self.ptr.as_ptr().add(index);
            ptr::copy(dst, dst.add(count), len - index);
            ptr::copy_nonoverlapping(src.ptr.as_ptr(), dst, count);
        }
        src.len = 0;
        self.len += count as u32;
    }

    /// Drops every live element, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        let live: *mut [T] = self.as_mut_slice();
        // Length goes to zero first so a panicking destructor can't cause a double drop.
        self.len = 0;
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T: Clone> Clone for RawBuf<T> {
    /// Deep copy that keeps the source's capacity.
    fn clone(&self) -> Self {
        let mut out = RawBuf::new();
        out.grow_to_or_abort(self.capacity());
        for item in self.as_slice() {
            out.push_within_capacity(item.clone());
        }
        out
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.clear();
        if self.cap != 0 {
            unsafe {
                let layout = Layout::array::<T>(self.capacity()).unwrap_unchecked();
                dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
    }
}

impl<T> Default for RawBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}
