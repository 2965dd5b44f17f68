// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut, Index, IndexMut, Range};
use core::ptr::NonNull;
use core::slice::SliceIndex;

use stagevec_alloc::{AllocStrategy, Heap};
use tracing::trace;

use crate::cursor::{Cursor, CursorMut};
use crate::error::StageVecError;
use crate::reverse::Reverse;
use crate::staging::{RawParts, retire};

/// A contiguous growable array whose storage comes from an [`AllocStrategy`].
///
/// Every operation that needs new storage builds it in a staging buffer
/// first and swaps it in only once all fallible work has succeeded: on
/// error (or panic in an element's `Clone`) the container is left exactly
/// as it was. Operations that fit in the current capacity mutate in place.
///
/// Growth follows `2 * capacity + 1`. Capacity is never reduced implicitly.
///
/// # Example
///
/// ```rust
/// use stagevec::{StageVec, StageVecError};
///
/// fn example() -> Result<(), StageVecError> {
///     let mut v = StageVec::new();
///
///     for x in [10, 5, 3, 7, 8, 0] {
///         v.push(x)?;
///     }
///
///     assert_eq!(v.len(), 6);
///     assert_eq!(v.capacity(), 7);
///
///     v.erase(1)?;
///     assert_eq!(v.as_slice(), &[10, 3, 7, 8, 0]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct StageVec<T, A: AllocStrategy = Heap> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: StageVec owns its elements and its strategy exclusively.
unsafe impl<T: Send, A: AllocStrategy + Send> Send for StageVec<T, A> {}

// SAFETY: shared access only hands out shared references.
unsafe impl<T: Sync, A: AllocStrategy + Sync> Sync for StageVec<T, A> {}

impl<T> StageVec<T> {
    /// Creates an empty container on the global heap. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Heap::new())
    }
}

impl<T, A: AllocStrategy> StageVec<T, A> {
    /// Creates an empty container using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub(crate) fn from_parts(parts: RawParts<T>, alloc: A) -> Self {
        Self {
            ptr: parts.ptr,
            len: parts.len,
            cap: parts.cap,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Detaches the buffer, leaving `self` empty with zero capacity.
    pub(crate) fn take_parts(&mut self) -> RawParts<T> {
        RawParts {
            ptr: core::mem::replace(&mut self.ptr, NonNull::dangling()),
            len: core::mem::take(&mut self.len),
            cap: core::mem::take(&mut self.cap),
        }
    }

    /// Swaps in a committed buffer and retires the previous one.
    ///
    /// Slots of the previous buffer in `discard` still hold live elements and
    /// are destroyed; every other slot was relocated into `parts`.
    pub(crate) fn install(&mut self, parts: RawParts<T>, discard: Range<usize>, op: &'static str) {
        trace!(
            target: "stagevec::staging",
            op,
            old_capacity = self.cap,
            capacity = parts.cap,
            len = parts.len,
            "committed staged buffer"
        );

        let old = self.take_parts();
        self.ptr = parts.ptr;
        self.len = parts.len;
        self.cap = parts.cap;

        // SAFETY (PRECONDITIONS ARE MET): old was this container's buffer, the
        // caller relocated everything outside `discard`
        unsafe { retire(&self.alloc, old.ptr, old.cap, discard) }
    }

    /// Destroys every element and releases the storage.
    pub(crate) fn release_all(&mut self) {
        let old = self.take_parts();

        // SAFETY (PRECONDITIONS ARE MET): old is this container's buffer, [0, len) is live
        unsafe { retire(&self.alloc, old.ptr, old.cap, 0..old.len) }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a raw pointer to the first slot.
    ///
    /// Dangling (but aligned) when the capacity is zero.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a raw mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live, ptr is aligned and non-null
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live, access is exclusive
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// [`StageVecError::OutOfRange`] if `index >= len()`. Negative indices
    /// cast to `usize` wrap around and are rejected the same way.
    pub fn at(&self, index: usize) -> Result<&T, StageVecError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(StageVecError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// [`StageVecError::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, StageVecError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(StageVecError::OutOfRange { index, len })
    }

    /// Returns the first element, or `None` if empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Cursor at the first element. The null cursor when empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        if self.is_empty() {
            return Cursor::null();
        }

        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor one past the last element. The null cursor when empty.
    pub fn end(&self) -> Cursor<'_, T> {
        if self.is_empty() {
            return Cursor::null();
        }

        Cursor::new(self.as_slice(), self.len)
    }

    /// Mutable cursor at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        if self.is_empty() {
            return CursorMut::null();
        }

        CursorMut::new(self.as_mut_slice(), 0)
    }

    /// Mutable cursor one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        if self.is_empty() {
            return CursorMut::null();
        }

        let len = self.len;
        CursorMut::new(self.as_mut_slice(), len)
    }

    /// Reverse cursor at the last element.
    pub fn rbegin(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.end())
    }

    /// Reverse cursor one before the first element.
    pub fn rend(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.begin())
    }

    /// Mutable reverse cursor at the last element.
    pub fn rbegin_mut(&mut self) -> Reverse<CursorMut<'_, T>> {
        Reverse::new(self.end_mut())
    }

    /// Mutable reverse cursor one before the first element.
    pub fn rend_mut(&mut self) -> Reverse<CursorMut<'_, T>> {
        Reverse::new(self.begin_mut())
    }
}

impl<T, A: AllocStrategy> Drop for StageVec<T, A> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<T, A: AllocStrategy + Default> Default for StageVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: AllocStrategy> fmt::Debug for StageVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: AllocStrategy> Deref for StageVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: AllocStrategy> DerefMut for StageVec<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: AllocStrategy> Index<I> for StageVec<T, A> {
    type Output = I::Output;

    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: AllocStrategy> IndexMut<I> for StageVec<T, A> {
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, U, A, B> PartialEq<StageVec<U, B>> for StageVec<T, A>
where
    T: PartialEq<U>,
    A: AllocStrategy,
    B: AllocStrategy,
{
    fn eq(&self, other: &StageVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: AllocStrategy> Eq for StageVec<T, A> {}

impl<T, U, A: AllocStrategy, const N: usize> PartialEq<[U; N]> for StageVec<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, A: AllocStrategy> PartialEq<[U]> for StageVec<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<'a, T, A: AllocStrategy> IntoIterator for &'a StageVec<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: AllocStrategy> IntoIterator for &'a mut StageVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
