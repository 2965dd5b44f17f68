// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::convert::Infallible;

use stagevec_alloc::AllocStrategy;

use crate::error::StageVecError;
use crate::stage_vec::StageVec;
use crate::staging::StagingBuffer;

impl<T, A: AllocStrategy> StageVec<T, A> {
    /// Appends `value`.
    ///
    /// A full container grows to `2 * capacity + 1` through a staging buffer.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if growth is needed and refused.
    /// The container is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), StageVecError> {
        self.emplace_back_with(|| value)
    }

    /// Appends the element produced by `f`.
    ///
    /// `f` runs after any needed storage has been acquired.
    pub fn emplace_back_with<F>(&mut self, f: F) -> Result<(), StageVecError>
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_back_with(|| Ok::<T, Infallible>(f()))
    }

    /// Appends the element produced by the fallible constructor `f`.
    ///
    /// # Errors
    ///
    /// - [`StageVecError::ElementOperation`] if `f` fails.
    /// - [`StageVecError::AllocationFailure`] if growth is needed and refused.
    ///
    /// On any error the container is unchanged.
    pub fn try_emplace_back_with<E, F>(&mut self, f: F) -> Result<(), StageVecError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if self.len < self.cap {
            let value = f().map_err(StageVecError::ElementOperation)?;

            // SAFETY (PRECONDITIONS ARE MET): len < cap, slot is unconstructed
            unsafe { self.alloc.construct(self.ptr.add(self.len), value) };
            self.len += 1;

            return Ok(());
        }

        let new_cap = self
            .cap
            .checked_mul(2)
            .and_then(|cap| cap.checked_add(1))
            .ok_or(StageVecError::CapacityOverflow {
                requested: self.cap.saturating_mul(2).saturating_add(1),
            })?;

        let mut staging = StagingBuffer::new(&self.alloc, new_cap).map_err(StageVecError::widen)?;
        staging.skip(self.len);
        staging.push(f().map_err(StageVecError::ElementOperation)?);

        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live and retired without destruction
        unsafe { staging.relocate_front(self.ptr.as_ptr(), self.len) };
        let parts = staging.commit();
        self.install(parts, 0..0, "push");

        Ok(())
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and is now outside [0, len)
        Some(unsafe { self.ptr.add(self.len).read() })
    }

    /// Destroys the last element in place.
    ///
    /// Calling it on an empty container is a contract violation: it trips a
    /// debug assertion and does nothing in release builds.
    pub fn pop_back(&mut self) {
        debug_assert!(self.len > 0, "pop_back() on an empty StageVec");

        if self.len > 0 {
            self.truncate(self.len - 1);
        }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Inserts `value` before position `index` and returns `index`.
    ///
    /// Insertion always stages a new buffer of capacity
    /// `max(capacity, len + 1)`, even when spare capacity exists.
    ///
    /// # Errors
    ///
    /// - [`StageVecError::OutOfRange`] if `index > len()`.
    /// - [`StageVecError::AllocationFailure`] if the storage is refused.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, StageVecError> {
        self.emplace_with(index, || value)
    }

    /// Inserts the element produced by `f` before position `index`.
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> Result<usize, StageVecError>
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_with(index, || Ok::<T, Infallible>(f()))
    }

    /// Inserts the element produced by the fallible constructor `f` before `index`.
    ///
    /// # Errors
    ///
    /// [`StageVecError::ElementOperation`] if `f` fails, plus the errors of
    /// [`StageVec::insert`]. On any error the container is unchanged.
    pub fn try_emplace_with<E, F>(&mut self, index: usize, f: F) -> Result<usize, StageVecError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.stage_insert(index, 1, |staging| {
            staging.push(f()?);
            Ok(())
        })
    }

    /// Inserts `n` clones of `value` before `index`.
    ///
    /// Returns `index`; inserting zero elements changes nothing.
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<usize, StageVecError>
    where
        T: Clone,
    {
        self.stage_insert(index, n, |staging| {
            staging.try_fill_with(n, || Ok::<T, Infallible>(value.clone()))
        })
    }

    /// Inserts clones of `src` before `index`.
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<usize, StageVecError>
    where
        T: Clone,
    {
        self.stage_insert(index, src.len(), |staging| {
            staging.extend_cloned(src);
            Ok::<(), Infallible>(())
        })
    }

    /// Inserts the items of an exact-size iterator before `index`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, StageVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let n = iter.len();

        self.stage_insert(index, n, |staging| {
            staging.extend(iter, n);
            Ok::<(), Infallible>(())
        })
    }

    fn stage_insert<E, F>(&mut self, index: usize, n: usize, fill: F) -> Result<usize, StageVecError<E>>
    where
        F: FnOnce(&mut StagingBuffer<'_, T, A>) -> Result<(), E>,
    {
        let len = self.len;

        if index > len {
            return Err(StageVecError::OutOfRange { index, len });
        }

        if n == 0 {
            return Ok(index);
        }

        let new_len = len.checked_add(n).ok_or(StageVecError::CapacityOverflow {
            requested: len.saturating_add(n),
        })?;

        let mut staging =
            StagingBuffer::new(&self.alloc, self.cap.max(new_len)).map_err(StageVecError::widen)?;
        staging.skip(index);
        fill(&mut staging).map_err(StageVecError::ElementOperation)?;

        let base = self.ptr.as_ptr();

        // SAFETY (PRECONDITIONS ARE MET): both runs are live and retired without destruction
        unsafe {
            staging.relocate_back(base.add(index), len - index);
            staging.relocate_front(base, index);
        }

        let parts = staging.commit();
        self.install(parts, 0..0, "insert");

        Ok(index)
    }

    // =========================================================================
    // Erasure
    // =========================================================================

    /// Removes the element at `index`.
    ///
    /// Returns the index of the element that followed it (equal to the new
    /// `len()` when the last element was removed).
    ///
    /// # Errors
    ///
    /// - [`StageVecError::OutOfRange`] if `index >= len()`.
    /// - [`StageVecError::AllocationFailure`] if an interior erase cannot
    ///   acquire its staging buffer.
    pub fn erase(&mut self, index: usize) -> Result<usize, StageVecError> {
        let len = self.len;

        if index >= len {
            return Err(StageVecError::OutOfRange { index, len });
        }

        self.erase_range(index, index + 1)
    }

    /// Removes the elements in `[first, last)`.
    ///
    /// A range that reaches the end is destroyed in place. An interior range
    /// stages a buffer at the current capacity. An empty range changes
    /// nothing. Returns `first`, which then indexes the element that
    /// followed the range (or equals the new `len()`).
    ///
    /// # Errors
    ///
    /// - [`StageVecError::OutOfRange`] if `last > len()` or `first > last`.
    /// - [`StageVecError::AllocationFailure`] if an interior erase cannot
    ///   acquire its staging buffer.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<usize, StageVecError> {
        let len = self.len;

        if last > len {
            return Err(StageVecError::OutOfRange { index: last, len });
        }

        if first > last {
            return Err(StageVecError::OutOfRange { index: first, len });
        }

        if first == last {
            return Ok(first);
        }

        if last == len {
            self.truncate(first);
            return Ok(first);
        }

        let mut staging = StagingBuffer::new(&self.alloc, self.cap)?;
        let base = self.ptr.as_ptr();

        // SAFETY (PRECONDITIONS ARE MET): both runs are live; [first, last) is destroyed on install
        unsafe {
            staging.relocate_back(base, first);
            staging.relocate_back(base.add(last), len - last);
        }

        let parts = staging.commit();
        self.install(parts, first..last, "erase");

        Ok(first)
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// Replaces the contents with the items of an exact-size iterator.
    ///
    /// Always stages a new buffer whose capacity equals the new length.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if the storage is refused. The
    /// previous contents survive any error.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), StageVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let n = iter.len();

        let mut staging = StagingBuffer::new(&self.alloc, n)?;
        staging.extend(iter, n);

        let parts = staging.commit();
        self.install(parts, 0..self.len, "assign");

        Ok(())
    }

    /// Replaces the contents with clones of `src`.
    pub fn assign_slice(&mut self, src: &[T]) -> Result<(), StageVecError>
    where
        T: Clone,
    {
        let mut staging = StagingBuffer::new(&self.alloc, src.len())?;
        staging.extend_cloned(src);

        let parts = staging.commit();
        self.install(parts, 0..self.len, "assign");

        Ok(())
    }

    /// Replaces the contents with `n` clones of `value`.
    pub fn assign_n(&mut self, n: usize, value: T) -> Result<(), StageVecError>
    where
        T: Clone,
    {
        let mut staging = StagingBuffer::new(&self.alloc, n)?;
        staging.extend(core::iter::repeat_n(value, n), n);

        let parts = staging.commit();
        self.install(parts, 0..self.len, "assign");

        Ok(())
    }
}
