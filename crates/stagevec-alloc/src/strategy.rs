// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// A pluggable policy for acquiring and releasing raw storage.
///
/// Containers hold one strategy instance and route every acquire, release,
/// construct and destroy through it. Besides storage, a strategy decides how
/// it travels between containers:
///
/// - `PROPAGATE_ON_COPY`: copy-assignment replaces the destination's strategy
///   with the source's.
/// - `PROPAGATE_ON_MOVE`: move-assignment replaces the destination's strategy
///   with the source's.
/// - `PROPAGATE_ON_SWAP`: swapping two containers also swaps their strategies.
///
/// Two instances are interchangeable when storage acquired by one may be
/// released by the other (see [`AllocStrategy::interchangeable_with`]).
///
/// # Safety
///
/// Implementors must guarantee that:
/// - a pointer returned by `acquire(layout)` is valid for reads and writes of
///   `layout.size()` bytes and aligned to `layout.align()` until it is passed
///   to `release` with the same layout;
/// - `release` accepts any pointer acquired by `self` or by an instance for
///   which `interchangeable_with` returns `true`.
///
/// # Example
///
/// ```rust
/// use core::alloc::Layout;
/// use stagevec_alloc::{AllocStrategy, Heap};
///
/// let heap: Heap = Heap::default();
/// let layout = Layout::array::<u64>(4).unwrap();
///
/// let ptr = heap.acquire(layout).expect("acquire failed");
/// unsafe { heap.release(ptr, layout) };
///
/// assert!(heap.interchangeable_with(&Heap::new()));
/// ```
pub unsafe trait AllocStrategy: Clone {
    /// Copy-assignment adopts the source's strategy.
    const PROPAGATE_ON_COPY: bool = false;
    /// Move-assignment adopts the source's strategy.
    const PROPAGATE_ON_MOVE: bool = false;
    /// Swap exchanges strategies.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Acquires storage for `layout`.
    ///
    /// `layout.size()` is never zero; containers use a dangling pointer for
    /// zero-sized requests and never hand it back to the strategy.
    fn acquire(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases storage previously returned by [`AllocStrategy::acquire`].
    ///
    /// # Safety
    ///
    /// - `ptr` was acquired by `self` (or an interchangeable instance) with
    ///   exactly `layout`.
    /// - `ptr` has not been released yet.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns `true` if storage acquired by `self` may be released by
    /// `other` and vice versa.
    fn interchangeable_with(&self, other: &Self) -> bool;

    /// Returns the strategy a copy-constructed container should use.
    fn select_on_copy(&self) -> Self {
        self.clone()
    }

    /// Constructs `value` in `slot`.
    ///
    /// # Safety
    ///
    /// `slot` is valid for writes and does not hold a live value.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY: guaranteed by caller
        unsafe { slot.as_ptr().write(value) }
    }

    /// Destroys the value in `slot`.
    ///
    /// # Safety
    ///
    /// `slot` holds a live value that is not used again after this call.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: guaranteed by caller
        unsafe { core::ptr::drop_in_place(slot.as_ptr()) }
    }
}
