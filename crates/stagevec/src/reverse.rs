// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign};

use crate::cursor::{RandomAccess, RandomAccessMut};

/// Cursor adapter that walks its base cursor backwards.
///
/// A reverse cursor built on `base` refers to the element just before
/// `base`, so `Reverse::new(end)` is the first element of the reversed
/// sequence and `Reverse::new(begin)` is one past its last.
///
/// # Example
///
/// ```rust
/// use stagevec::StageVec;
///
/// let v = StageVec::from_slice(&[1, 2, 3]).expect("Failed to build");
/// let mut it = v.rbegin();
///
/// assert_eq!(*it, 3);
/// it += 2;
/// assert_eq!(*it, 1);
/// assert_eq!(v.rend() - it, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse<C> {
    base: C,
}

impl<C: RandomAccess> Reverse<C> {
    /// Wraps `base`.
    pub fn new(base: C) -> Self {
        Self { base }
    }

    /// Returns the underlying cursor.
    pub fn base(&self) -> &C {
        &self.base
    }

    /// Unwraps the underlying cursor.
    pub fn into_base(self) -> C {
        self.base
    }

    /// Pre-increment.
    pub fn inc(&mut self) -> &mut Self {
        self.base.advance(-1);
        self
    }

    /// Pre-decrement.
    pub fn dec(&mut self) -> &mut Self {
        self.base.advance(1);
        self
    }

    /// Exchanges two reverse cursors.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<C: RandomAccess + Copy> Reverse<C> {
    /// Post-increment: advances and returns the previous cursor.
    pub fn post_inc(&mut self) -> Self {
        let prev = *self;
        self.inc();
        prev
    }

    /// Post-decrement: steps back and returns the previous cursor.
    pub fn post_dec(&mut self) -> Self {
        let prev = *self;
        self.dec();
        prev
    }
}

impl<C: RandomAccess> RandomAccess for Reverse<C> {
    type Item = C::Item;

    fn position(&self) -> isize {
        -self.base.position()
    }

    fn advance(&mut self, n: isize) {
        self.base.advance(-n);
    }

    fn at(&self, offset: isize) -> &C::Item {
        self.base.at(-1 - offset)
    }
}

impl<C: RandomAccessMut> RandomAccessMut for Reverse<C> {
    fn at_mut(&mut self, offset: isize) -> &mut C::Item {
        self.base.at_mut(-1 - offset)
    }
}

impl<C: RandomAccess> Deref for Reverse<C> {
    type Target = C::Item;

    fn deref(&self) -> &C::Item {
        self.at(0)
    }
}

impl<C: RandomAccessMut> DerefMut for Reverse<C> {
    fn deref_mut(&mut self) -> &mut C::Item {
        self.at_mut(0)
    }
}

impl<C: RandomAccess> Index<isize> for Reverse<C> {
    type Output = C::Item;

    fn index(&self, offset: isize) -> &C::Item {
        self.at(offset)
    }
}

impl<C: RandomAccessMut> IndexMut<isize> for Reverse<C> {
    fn index_mut(&mut self, offset: isize) -> &mut C::Item {
        self.at_mut(offset)
    }
}

impl<C: RandomAccess> Add<isize> for Reverse<C> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }
}

impl<C: RandomAccess> Sub<isize> for Reverse<C> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self.advance(-n);
        self
    }
}

impl<C: RandomAccess> Sub for Reverse<C> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        other.base.position() - self.base.position()
    }
}

impl<C: RandomAccess> AddAssign<isize> for Reverse<C> {
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl<C: RandomAccess> SubAssign<isize> for Reverse<C> {
    fn sub_assign(&mut self, n: isize) {
        self.advance(-n);
    }
}

impl<C: PartialEq> PartialEq for Reverse<C> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<C: Eq> Eq for Reverse<C> {}

impl<C: PartialOrd> PartialOrd for Reverse<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}
