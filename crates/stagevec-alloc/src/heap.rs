// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::strategy::AllocStrategy;

/// Global-heap strategy with compile-time propagation and equality policy.
///
/// - `PROPAGATE`: sets all three propagation traits.
/// - `EQUAL`: whether any two instances are interchangeable. With `false`,
///   no two instances (not even an instance and itself) are interchangeable,
///   which forces containers onto their element-wise transfer paths.
///
/// The aliases below name the four combinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heap<const PROPAGATE: bool = false, const EQUAL: bool = true>;

/// Heap strategy that propagates on copy, move and swap.
pub type PropagatingHeap = Heap<true, true>;

/// Heap strategy whose instances are never interchangeable.
pub type DistinctHeap = Heap<false, false>;

/// Heap strategy that propagates and whose instances are never interchangeable.
pub type PropagatingDistinctHeap = Heap<true, false>;

impl<const PROPAGATE: bool, const EQUAL: bool> Heap<PROPAGATE, EQUAL> {
    /// Creates a new heap strategy.
    pub const fn new() -> Self {
        Self
    }
}

unsafe impl<const PROPAGATE: bool, const EQUAL: bool> AllocStrategy for Heap<PROPAGATE, EQUAL> {
    const PROPAGATE_ON_COPY: bool = PROPAGATE;
    const PROPAGATE_ON_MOVE: bool = PROPAGATE;
    const PROPAGATE_ON_SWAP: bool = PROPAGATE;

    fn acquire(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        heap_acquire(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: guaranteed by caller
        unsafe { heap_release(ptr, layout) }
    }

    fn interchangeable_with(&self, _other: &Self) -> bool {
        EQUAL
    }
}

/// Acquires `layout` from the global allocator.
pub(crate) fn heap_acquire(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    debug_assert!(layout.size() != 0, "zero-sized acquire");

    // SAFETY: layout has non-zero size (checked above in debug, contract otherwise)
    let ptr = unsafe { alloc::alloc::alloc(layout) };
    NonNull::new(ptr).ok_or(AllocError::new(layout))
}

/// Releases `ptr` back to the global allocator.
///
/// # Safety
///
/// `ptr` was returned by [`heap_acquire`] with the same `layout`.
pub(crate) unsafe fn heap_release(ptr: NonNull<u8>, layout: Layout) {
    // SAFETY (PRECONDITIONS ARE MET): ptr/layout pair comes from heap_acquire
    unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
}
