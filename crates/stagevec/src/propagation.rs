// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Copy-assignment, move-assignment and swap under the strategy's
//! propagation policy.

use stagevec_alloc::AllocStrategy;
use tracing::trace;

use crate::error::StageVecError;
use crate::stage_vec::StageVec;
use crate::staging::StagingBuffer;

impl<T, A: AllocStrategy> StageVec<T, A> {
    /// Copy-assignment: replaces the contents with clones of `src`.
    ///
    /// With [`AllocStrategy::PROPAGATE_ON_COPY`] the destination adopts a
    /// clone of the source's strategy. If the two strategies are not
    /// interchangeable, the destination first releases all of its storage,
    /// so a failure afterwards leaves it empty rather than holding storage
    /// it can no longer release.
    ///
    /// Capacity afterwards equals `src.len()`.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if the storage is refused.
    pub fn assign_from(&mut self, src: &Self) -> Result<(), StageVecError>
    where
        T: Clone,
    {
        if A::PROPAGATE_ON_COPY {
            if !self.alloc.interchangeable_with(&src.alloc) {
                trace!(
                    target: "stagevec::propagation",
                    len = self.len,
                    "copy-assignment releases storage before adopting source strategy"
                );
                self.release_all();
            }

            self.alloc = src.alloc.clone();
        }

        self.assign_slice(src.as_slice())
    }

    /// Move-assignment: takes over the contents of `src`, leaving it empty.
    ///
    /// O(1) when [`AllocStrategy::PROPAGATE_ON_MOVE`] is set or the
    /// strategies are interchangeable: the destination releases its storage
    /// and adopts the source's buffer (and, when propagating, a clone of its
    /// strategy). Otherwise the elements are relocated into storage acquired
    /// from the destination's own strategy and the source's buffer is
    /// released. In both cases `src` ends with zero length and capacity.
    ///
    /// # Errors
    ///
    /// [`StageVecError::AllocationFailure`] if the relocating path cannot
    /// acquire storage. Both containers are unchanged.
    pub fn move_assign_from(&mut self, src: &mut Self) -> Result<(), StageVecError> {
        if A::PROPAGATE_ON_MOVE || self.alloc.interchangeable_with(&src.alloc) {
            self.release_all();

            if A::PROPAGATE_ON_MOVE {
                self.alloc = src.alloc.clone();
            }

            let parts = src.take_parts();
            self.ptr = parts.ptr;
            self.len = parts.len;
            self.cap = parts.cap;

            return Ok(());
        }

        trace!(
            target: "stagevec::propagation",
            len = src.len,
            "move-assignment between foreign strategies relocates elements"
        );

        let mut staging = StagingBuffer::new(&self.alloc, src.len)?;
        // SAFETY (PRECONDITIONS ARE MET): src [0, len) is live and forgotten below
        unsafe { staging.relocate_back(src.ptr.as_ptr(), src.len) };
        let parts = staging.commit();

        src.len = 0;
        src.release_all();
        self.install(parts, 0..self.len, "move_assign");

        Ok(())
    }

    /// Exchanges the contents of two containers in O(1).
    ///
    /// Strategies are exchanged too when
    /// [`AllocStrategy::PROPAGATE_ON_SWAP`] is set.
    ///
    /// # Panics
    ///
    /// Panics if the strategies are neither propagating nor interchangeable:
    /// neither container could release the other's storage.
    pub fn swap_with(&mut self, other: &mut Self) {
        assert!(
            A::PROPAGATE_ON_SWAP || self.alloc.interchangeable_with(&other.alloc),
            "swap_with() on StageVecs whose strategies are neither interchangeable nor propagating"
        );

        core::mem::swap(&mut self.ptr, &mut other.ptr);
        core::mem::swap(&mut self.len, &mut other.len);
        core::mem::swap(&mut self.cap, &mut other.cap);

        if A::PROPAGATE_ON_SWAP {
            core::mem::swap(&mut self.alloc, &mut other.alloc);
        }
    }
}
