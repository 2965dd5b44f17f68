// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign};

/// Pointer-like positioning shared by [`Cursor`], [`CursorMut`] and [`Reverse`](crate::Reverse).
pub trait RandomAccess {
    /// Element type the cursor points at.
    type Item;

    /// Signed position within the underlying sequence.
    fn position(&self) -> isize;

    /// Moves the cursor by `n` elements.
    fn advance(&mut self, n: isize);

    /// Returns the element `offset` positions away from the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the target lies outside the sequence.
    fn at(&self, offset: isize) -> &Self::Item;
}

/// Mutable counterpart of [`RandomAccess::at`].
pub trait RandomAccessMut: RandomAccess {
    /// Returns the element `offset` positions away from the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the target lies outside the sequence.
    fn at_mut(&mut self, offset: isize) -> &mut Self::Item;
}

#[inline]
fn resolve(pos: isize, offset: isize, len: usize) -> usize {
    match pos.checked_add(offset).map(usize::try_from) {
        Some(Ok(index)) if index < len => index,
        _ => panic!("cursor target {pos}{offset:+} is out of range for length {len}"),
    }
}

/// Read-only random-access cursor over a contiguous sequence.
///
/// Moving a cursor never panics; dereferencing or indexing one whose target
/// lies outside the sequence does. Cursors from different sequences compare
/// unequal and unordered. For zero-sized `T`, two sequences of the same
/// length share an address and cannot be told apart.
pub struct Cursor<'a, T> {
    slice: &'a [T],
    pos: isize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], pos: usize) -> Self {
        Self {
            slice,
            pos: pos as isize,
        }
    }

    /// The canonical cursor of an empty sequence.
    pub const fn null() -> Self {
        Self { slice: &[], pos: 0 }
    }

    /// Returns the element under the cursor, or `None` when it is past either end.
    pub fn get(&self) -> Option<&'a T> {
        usize::try_from(self.pos).ok().and_then(|i| self.slice.get(i))
    }

    /// Pre-increment.
    pub fn inc(&mut self) -> &mut Self {
        self.pos += 1;
        self
    }

    /// Pre-decrement.
    pub fn dec(&mut self) -> &mut Self {
        self.pos -= 1;
        self
    }

    /// Post-increment: advances and returns the previous cursor.
    pub fn post_inc(&mut self) -> Self {
        let prev = *self;
        self.pos += 1;
        prev
    }

    /// Post-decrement: steps back and returns the previous cursor.
    pub fn post_dec(&mut self) -> Self {
        let prev = *self;
        self.pos -= 1;
        prev
    }

    /// Exchanges the positions (and sequences) of two cursors.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    // Empty sequences all share the null position. Otherwise address and
    // length must both match: zero-sized elements all live at the same
    // dangling address.
    fn same_sequence(&self, other: &[T]) -> bool {
        (self.slice.is_empty() && other.is_empty()) || core::ptr::eq(self.slice, other)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Default for Cursor<'_, T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<T> RandomAccess for Cursor<'_, T> {
    type Item = T;

    fn position(&self) -> isize {
        self.pos
    }

    fn advance(&mut self, n: isize) {
        self.pos += n;
    }

    fn at(&self, offset: isize) -> &T {
        &self.slice[resolve(self.pos, offset, self.slice.len())]
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.at(0)
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, offset: isize) -> &T {
        self.at(offset)
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self.pos += n;
        self
    }
}

impl<'a, T> Add<Cursor<'a, T>> for isize {
    type Output = Cursor<'a, T>;

    fn add(self, cursor: Cursor<'a, T>) -> Cursor<'a, T> {
        cursor + self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self.pos -= n;
        self
    }
}

impl<T> Sub for Cursor<'_, T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_sequence(other.slice), "cursors from different sequences");
        self.pos - other.pos
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.pos += n;
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.pos -= n;
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_sequence(other.slice) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_sequence(other.slice).then(|| self.pos.cmp(&other.pos))
    }
}

/// Mutable random-access cursor over a contiguous sequence.
///
/// Holds the sequence exclusively, so only one exists at a time. Use
/// [`CursorMut::as_cursor`] to compare it against read-only positions.
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    pos: isize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T], pos: usize) -> Self {
        Self {
            slice,
            pos: pos as isize,
        }
    }

    /// The canonical mutable cursor of an empty sequence.
    pub fn null() -> Self {
        Self {
            slice: &mut [],
            pos: 0,
        }
    }

    /// Reborrows as a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            slice: &*self.slice,
            pos: self.pos,
        }
    }

    /// Returns the element under the cursor, or `None` when it is past either end.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        usize::try_from(self.pos)
            .ok()
            .and_then(|i| self.slice.get_mut(i))
    }

    /// Pre-increment.
    pub fn inc(&mut self) -> &mut Self {
        self.pos += 1;
        self
    }

    /// Pre-decrement.
    pub fn dec(&mut self) -> &mut Self {
        self.pos -= 1;
        self
    }

    /// Post-increment: advances and returns a read-only cursor at the previous position.
    pub fn post_inc(&mut self) -> Cursor<'_, T> {
        self.pos += 1;
        self.as_cursor() - 1
    }

    /// Post-decrement: steps back and returns a read-only cursor at the previous position.
    pub fn post_dec(&mut self) -> Cursor<'_, T> {
        self.pos -= 1;
        self.as_cursor() + 1
    }

    /// Exchanges two mutable cursors.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<T> Default for CursorMut<'_, T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor {
            slice: cursor.slice,
            pos: cursor.pos,
        }
    }
}

impl<T> RandomAccess for CursorMut<'_, T> {
    type Item = T;

    fn position(&self) -> isize {
        self.pos
    }

    fn advance(&mut self, n: isize) {
        self.pos += n;
    }

    fn at(&self, offset: isize) -> &T {
        &self.slice[resolve(self.pos, offset, self.slice.len())]
    }
}

impl<T> RandomAccessMut for CursorMut<'_, T> {
    fn at_mut(&mut self, offset: isize) -> &mut T {
        let index = resolve(self.pos, offset, self.slice.len());
        &mut self.slice[index]
    }
}

impl<T> Deref for CursorMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.at(0)
    }
}

impl<T> DerefMut for CursorMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.at_mut(0)
    }
}

impl<T> Index<isize> for CursorMut<'_, T> {
    type Output = T;

    fn index(&self, offset: isize) -> &T {
        self.at(offset)
    }
}

impl<T> IndexMut<isize> for CursorMut<'_, T> {
    fn index_mut(&mut self, offset: isize) -> &mut T {
        self.at_mut(offset)
    }
}

impl<T> Add<isize> for CursorMut<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self.pos += n;
        self
    }
}

impl<'a, T> Add<CursorMut<'a, T>> for isize {
    type Output = CursorMut<'a, T>;

    fn add(self, cursor: CursorMut<'a, T>) -> CursorMut<'a, T> {
        cursor + self
    }
}

impl<T> Sub<isize> for CursorMut<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self.pos -= n;
        self
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.pos += n;
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.pos -= n;
    }
}

// Mixed comparisons and distances between mutable and read-only cursors.

impl<T> PartialEq<Cursor<'_, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &Cursor<'_, T>) -> bool {
        other.same_sequence(&*self.slice) && self.pos == other.pos
    }
}

impl<T> PartialEq<CursorMut<'_, T>> for Cursor<'_, T> {
    fn eq(&self, other: &CursorMut<'_, T>) -> bool {
        other == self
    }
}

impl<T> PartialOrd<Cursor<'_, T>> for CursorMut<'_, T> {
    fn partial_cmp(&self, other: &Cursor<'_, T>) -> Option<Ordering> {
        other
            .same_sequence(&*self.slice)
            .then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> PartialOrd<CursorMut<'_, T>> for Cursor<'_, T> {
    fn partial_cmp(&self, other: &CursorMut<'_, T>) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl<T> Sub<Cursor<'_, T>> for &CursorMut<'_, T> {
    type Output = isize;

    fn sub(self, other: Cursor<'_, T>) -> isize {
        debug_assert!(other.same_sequence(&*self.slice), "cursors from different sequences");
        self.pos - other.pos
    }
}

impl<T> Sub<&CursorMut<'_, T>> for Cursor<'_, T> {
    type Output = isize;

    fn sub(self, other: &CursorMut<'_, T>) -> isize {
        -(other - self)
    }
}
