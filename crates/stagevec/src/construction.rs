// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::handle_alloc_error;

use stagevec_alloc::{AllocStrategy, Heap};
use tracing::trace;

use crate::error::StageVecError;
use crate::stage_vec::StageVec;
use crate::staging::StagingBuffer;

/// Turns a staging error into the panic/abort behaviour of infallible APIs.
pub(crate) fn unwrap_staged<R>(result: Result<R, StageVecError>) -> R {
    match result {
        Ok(value) => value,
        Err(StageVecError::AllocationFailure(err)) => handle_alloc_error(err.layout),
        Err(err) => panic!("{err}"),
    }
}

impl<T> StageVec<T> {
    /// Creates a container on the global heap holding clones of `src`.
    ///
    /// # Errors
    ///
    /// See [`StageVec::from_slice_in`].
    pub fn from_slice(src: &[T]) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        Self::from_slice_in(src, Heap::new())
    }

    /// Creates a container on the global heap holding `n` clones of `value`.
    ///
    /// # Errors
    ///
    /// See [`StageVec::from_elem_in`].
    pub fn from_elem(value: T, n: usize) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        Self::from_elem_in(value, n, Heap::new())
    }
}

impl<T, A: AllocStrategy> StageVec<T, A> {
    /// Creates a container from an exact-size iterator.
    ///
    /// Capacity equals the iterator's reported length; elements are
    /// constructed in iteration order. An empty iterator allocates nothing.
    ///
    /// # Errors
    ///
    /// - [`StageVecError::AllocationFailure`] if `alloc` refuses the storage.
    /// - [`StageVecError::CapacityOverflow`] if the length does not fit in a
    ///   single allocation.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Result<Self, StageVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut v = Self::new_in(alloc);
        v.assign_iter(iter)?;
        Ok(v)
    }

    /// Creates a container holding clones of `src`.
    ///
    /// # Errors
    ///
    /// See [`StageVec::from_iter_in`].
    pub fn from_slice_in(src: &[T], alloc: A) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        let mut v = Self::new_in(alloc);
        v.assign_slice(src)?;
        Ok(v)
    }

    /// Creates a container from an array literal, moving its elements in.
    ///
    /// # Errors
    ///
    /// See [`StageVec::from_iter_in`].
    pub fn from_array_in<const N: usize>(array: [T; N], alloc: A) -> Result<Self, StageVecError> {
        Self::from_iter_in(array, alloc)
    }

    /// Creates a container holding `n` clones of `value`.
    ///
    /// # Errors
    ///
    /// See [`StageVec::from_iter_in`].
    pub fn from_elem_in(value: T, n: usize, alloc: A) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        let mut v = Self::new_in(alloc);
        v.assign_n(n, value)?;
        Ok(v)
    }

    /// Copies the container, using the strategy chosen by
    /// [`AllocStrategy::select_on_copy`].
    ///
    /// Capacity of the copy equals `len()`.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if the storage cannot be acquired.
    /// Nothing is left behind on failure.
    pub fn try_clone(&self) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        self.try_clone_in(self.alloc.select_on_copy())
    }

    /// Copies the container into storage acquired from `alloc`.
    ///
    /// # Errors
    ///
    /// See [`StageVec::try_clone`].
    pub fn try_clone_in(&self, alloc: A) -> Result<Self, StageVecError>
    where
        T: Clone,
    {
        Self::from_slice_in(self.as_slice(), alloc)
    }

    /// Moves the contents out in O(1).
    ///
    /// `self` is left empty with zero capacity and keeps a clone of its
    /// strategy. No element is constructed or destroyed.
    pub fn take(&mut self) -> Self {
        let alloc = self.alloc.clone();
        core::mem::replace(self, Self::new_in(alloc))
    }

    /// Moves the contents into a container that uses `alloc`.
    ///
    /// When `alloc` is interchangeable with the current strategy the buffer
    /// is adopted in O(1). Otherwise the elements are relocated into storage
    /// acquired from `alloc`, and the previous buffer is released. Either
    /// way `self` ends up empty with zero capacity.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if `alloc` refuses the storage,
    /// in which case `self` is left untouched.
    pub fn move_in(&mut self, alloc: A) -> Result<Self, StageVecError> {
        if self.alloc.interchangeable_with(&alloc) {
            let parts = self.take_parts();
            return Ok(Self::from_parts(parts, alloc));
        }

        trace!(
            target: "stagevec::propagation",
            len = self.len,
            "move with foreign allocation strategy relocates elements"
        );

        let mut staging = StagingBuffer::new(&alloc, self.len)?;
        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live and forgotten below
        unsafe { staging.relocate_back(self.ptr.as_ptr(), self.len) };
        let parts = staging.commit();

        self.len = 0;
        self.release_all();

        Ok(Self::from_parts(parts, alloc))
    }
}

impl<T: Clone, A: AllocStrategy> Clone for StageVec<T, A> {
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if the storage cannot be acquired.
    fn clone(&self) -> Self {
        unwrap_staged(self.try_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        unwrap_staged(self.assign_from(source))
    }
}

impl<T, A: AllocStrategy + Default, const N: usize> From<[T; N]> for StageVec<T, A> {
    fn from(array: [T; N]) -> Self {
        unwrap_staged(Self::from_array_in(array, A::default()))
    }
}
