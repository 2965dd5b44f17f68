// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::convert::Infallible;

use stagevec_alloc::AllocStrategy;

use crate::error::StageVecError;
use crate::stage_vec::StageVec;
use crate::staging::{StagingBuffer, destroy_range};

impl<T, A: AllocStrategy> StageVec<T, A> {
    /// Ensures room for `n` elements in total.
    ///
    /// No-op when `n <= capacity()`; otherwise capacity becomes exactly `n`.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] or
    /// [`StageVecError::CapacityOverflow`]. The container is unchanged.
    pub fn reserve(&mut self, n: usize) -> Result<(), StageVecError> {
        if n <= self.cap {
            return Ok(());
        }

        self.restage(n, "reserve")
    }

    /// Reduces capacity to `len()`. No-op when they already match.
    pub fn shrink_to_fit(&mut self) -> Result<(), StageVecError> {
        if self.cap == self.len {
            return Ok(());
        }

        self.restage(self.len, "shrink_to_fit")
    }

    fn restage(&mut self, cap: usize, op: &'static str) -> Result<(), StageVecError> {
        let mut staging = StagingBuffer::new(&self.alloc, cap)?;

        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live and retired without destruction
        unsafe { staging.relocate_back(self.ptr.as_ptr(), self.len) };

        let parts = staging.commit();
        self.install(parts, 0..0, op);

        Ok(())
    }

    /// Destroys every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Destroys the elements at `[n, len)` in place. No-op when `n >= len()`.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.len {
            return;
        }

        let old_len = self.len;
        self.len = n;

        // SAFETY (PRECONDITIONS ARE MET): [n, old_len) was live and is now outside [0, len)
        unsafe { destroy_range(&self.alloc, self.ptr, n..old_len) };
    }

    /// Resizes to `n` elements, filling new slots with clones of `value`.
    pub fn resize(&mut self, n: usize, value: T) -> Result<(), StageVecError>
    where
        T: Clone,
    {
        self.resize_with(n, || value.clone())
    }

    /// Resizes to `n` elements, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, n: usize) -> Result<(), StageVecError>
    where
        T: Default,
    {
        self.resize_with(n, T::default)
    }

    /// Resizes to `n` elements, filling new slots with values produced by `f`.
    pub fn resize_with<F>(&mut self, n: usize, mut f: F) -> Result<(), StageVecError>
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(n, || Ok::<T, Infallible>(f()))
    }

    /// Resizes to `n` elements, filling new slots with the fallible constructor `f`.
    ///
    /// Shrinking destroys the tail in place. Growing within capacity
    /// constructs in place; growing beyond it stages a buffer of capacity
    /// exactly `n`.
    ///
    /// # Errors
    ///
    /// - [`StageVecError::ElementOperation`] if `f` fails. Elements appended
    ///   in place by this call are destroyed again, as they are when `f`
    ///   panics.
    /// - [`StageVecError::AllocationFailure`] if growth is refused.
    ///
    /// On any error the container holds its previous elements.
    pub fn try_resize_with<E, F>(&mut self, n: usize, mut f: F) -> Result<(), StageVecError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        let len = self.len;

        if n <= len {
            self.truncate(n);
            return Ok(());
        }

        if n <= self.cap {
            let mut rewind = RewindOnDrop { vec: self, len };

            while rewind.vec.len < n {
                let value = f().map_err(StageVecError::ElementOperation)?;
                let vec = &mut *rewind.vec;

                // SAFETY (PRECONDITIONS ARE MET): len < n <= cap, slot is unconstructed
                unsafe { vec.alloc.construct(vec.ptr.add(vec.len), value) };
                vec.len += 1;
            }

            core::mem::forget(rewind);
            return Ok(());
        }

        let mut staging = StagingBuffer::new(&self.alloc, n).map_err(StageVecError::widen)?;
        staging.skip(len);
        staging
            .try_fill_with(n - len, f)
            .map_err(StageVecError::ElementOperation)?;

        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live and retired without destruction
        unsafe { staging.relocate_front(self.ptr.as_ptr(), len) };

        let parts = staging.commit();
        self.install(parts, 0..0, "resize");

        Ok(())
    }
}

// Truncates back to `len` unless forgotten; covers both error returns and
// unwinding out of the fill closure.
struct RewindOnDrop<'a, T, A: AllocStrategy> {
    vec: &'a mut StageVec<T, A>,
    len: usize,
}

impl<T, A: AllocStrategy> Drop for RewindOnDrop<'_, T, A> {
    fn drop(&mut self) {
        self.vec.truncate(self.len);
    }
}
