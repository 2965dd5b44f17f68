// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::mem::ManuallyDrop;
use core::ops::Range;
use core::ptr::NonNull;

use stagevec_alloc::AllocStrategy;
use tracing::debug;

use crate::error::StageVecError;

/// Pointer/length/capacity triple handed over by [`StagingBuffer::commit`].
#[derive(Debug)]
pub(crate) struct RawParts<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
}

impl<T> RawParts<T> {
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
        }
    }
}

fn slots_layout<T>(cap: usize) -> Result<Layout, StageVecError> {
    Layout::array::<T>(cap).map_err(|_| StageVecError::CapacityOverflow { requested: cap })
}

/// Acquires room for `cap` elements of `T` from `alloc`.
///
/// Zero-sized requests never reach the strategy.
pub(crate) fn acquire_slots<T, A: AllocStrategy>(
    alloc: &A,
    cap: usize,
) -> Result<NonNull<T>, StageVecError> {
    let layout = slots_layout::<T>(cap)?;

    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    match alloc.acquire(layout) {
        Ok(ptr) => Ok(ptr.cast()),
        Err(err) => {
            debug!(
                target: "stagevec::staging",
                size = layout.size(),
                align = layout.align(),
                capacity = cap,
                "allocation strategy refused acquire"
            );
            Err(err.into())
        }
    }
}

/// Destroys the live elements in `live` and releases the `cap` slots at `ptr`.
///
/// A destructor that panics does not stop the others: the remaining
/// elements are still destroyed and the storage is still released.
///
/// # Safety
///
/// - `ptr` was returned by [`acquire_slots`] for `cap` on `alloc` (or an
///   interchangeable instance) and has not been released.
/// - Every index in `live` holds a constructed element; no other slot does.
pub(crate) unsafe fn retire<T, A: AllocStrategy>(
    alloc: &A,
    ptr: NonNull<T>,
    cap: usize,
    live: Range<usize>,
) {
    let layout = Layout::array::<T>(cap)
        .ok()
        .filter(|layout| layout.size() != 0);

    Retirement {
        alloc,
        ptr,
        live,
        layout,
    }
    .destroy_live();
}

/// Destroys the live elements in `live` without releasing any storage.
///
/// # Safety
///
/// Every index in `live` holds a constructed element that is no longer
/// reachable through its container.
pub(crate) unsafe fn destroy_range<T, A: AllocStrategy>(
    alloc: &A,
    ptr: NonNull<T>,
    live: Range<usize>,
) {
    Retirement {
        alloc,
        ptr,
        live,
        layout: None,
    }
    .destroy_live();
}

// Whatever is left in `live` when this drops (including during unwinding)
// is destroyed, then `layout` is released.
struct Retirement<'a, T, A: AllocStrategy> {
    alloc: &'a A,
    ptr: NonNull<T>,
    live: Range<usize>,
    layout: Option<Layout>,
}

impl<T, A: AllocStrategy> Retirement<'_, T, A> {
    fn destroy_live(&mut self) {
        // An index leaves `live` before its element is destroyed.
        for index in self.live.by_ref() {
            // SAFETY (PRECONDITIONS ARE MET): index was in the live range
            unsafe { self.alloc.destroy(self.ptr.add(index)) };
        }
    }
}

impl<T, A: AllocStrategy> Drop for Retirement<'_, T, A> {
    fn drop(&mut self) {
        self.destroy_live();

        if let Some(layout) = self.layout.take() {
            // SAFETY (PRECONDITIONS ARE MET): same layout the slots were acquired with
            unsafe { self.alloc.release(self.ptr.cast(), layout) };
        }
    }
}

/// Scratch buffer that builds a container's next backing storage.
///
/// Constructed elements always form one contiguous window
/// `[start, start + len)`. New elements are constructed at the end of the
/// window; existing elements are relocated bitwise around it. Relocation
/// cannot fail, so callers run every fallible step first and relocate last,
/// right before [`StagingBuffer::commit`].
///
/// Dropping an uncommitted buffer destroys exactly the window and releases
/// the storage, leaving the container it was built for untouched.
pub(crate) struct StagingBuffer<'a, T, A: AllocStrategy> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
    start: usize,
    len: usize,
}

impl<'a, T, A: AllocStrategy> StagingBuffer<'a, T, A> {
    /// Acquires a buffer with room for exactly `cap` elements.
    pub(crate) fn new(alloc: &'a A, cap: usize) -> Result<Self, StageVecError> {
        let ptr = acquire_slots::<T, A>(alloc, cap)?;

        Ok(Self {
            alloc,
            ptr,
            cap,
            start: 0,
            len: 0,
        })
    }

    /// Reserves the first `n` slots for a later [`StagingBuffer::relocate_front`].
    pub(crate) fn skip(&mut self, n: usize) {
        debug_assert_eq!(self.len, 0, "skip() after construction");
        assert!(n <= self.cap, "staging skip past capacity");

        self.start = n;
    }

    #[inline]
    fn end(&self) -> usize {
        self.start + self.len
    }

    /// Constructs `value` right after the window.
    pub(crate) fn push(&mut self, value: T) {
        assert!(self.end() < self.cap, "staging buffer overflow");

        // SAFETY (PRECONDITIONS ARE MET): end() < cap, slot is unconstructed
        unsafe { self.alloc.construct(self.ptr.add(self.end()), value) };
        self.len += 1;
    }

    /// Constructs at most `n` elements pulled from `iter`.
    pub(crate) fn extend<I: Iterator<Item = T>>(&mut self, iter: I, n: usize) {
        for value in iter.take(n) {
            self.push(value);
        }
    }

    /// Constructs a clone of every element of `src`.
    pub(crate) fn extend_cloned(&mut self, src: &[T])
    where
        T: Clone,
    {
        for value in src {
            self.push(value.clone());
        }
    }

    /// Constructs `n` elements produced by `f`, stopping at the first error.
    pub(crate) fn try_fill_with<E, F>(&mut self, n: usize, mut f: F) -> Result<(), E>
    where
        F: FnMut() -> Result<T, E>,
    {
        for _ in 0..n {
            self.push(f()?);
        }

        Ok(())
    }

    /// Moves `count` elements from `src` into the slots reserved by [`StagingBuffer::skip`].
    ///
    /// # Safety
    ///
    /// `src` points to `count` live elements that the caller stops treating
    /// as live once this returns.
    pub(crate) unsafe fn relocate_front(&mut self, src: *const T, count: usize) {
        assert_eq!(self.start, count, "relocate_front() does not fill the gap");

        // SAFETY (PRECONDITIONS ARE MET): [0, count) is reserved and unconstructed
        unsafe { core::ptr::copy_nonoverlapping(src, self.ptr.as_ptr(), count) };
        self.start = 0;
        self.len += count;
    }

    /// Moves `count` elements from `src` right after the window.
    ///
    /// # Safety
    ///
    /// `src` points to `count` live elements that the caller stops treating
    /// as live once this returns.
    pub(crate) unsafe fn relocate_back(&mut self, src: *const T, count: usize) {
        assert!(self.end() + count <= self.cap, "staging buffer overflow");

        // SAFETY (PRECONDITIONS ARE MET): [end, end + count) is in bounds and unconstructed
        unsafe { core::ptr::copy_nonoverlapping(src, self.ptr.as_ptr().add(self.end()), count) };
        self.len += count;
    }

    /// Hands the staged storage over to its new owner.
    pub(crate) fn commit(self) -> RawParts<T> {
        debug_assert_eq!(self.start, 0, "commit() with a gap before the window");

        let this = ManuallyDrop::new(self);

        RawParts {
            ptr: this.ptr,
            len: this.len,
            cap: this.cap,
        }
    }

    #[cfg(test)]
    pub(crate) fn constructed(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl<T, A: AllocStrategy> Drop for StagingBuffer<'_, T, A> {
    fn drop(&mut self) {
        let window = self.start..self.end();

        // SAFETY (PRECONDITIONS ARE MET): storage came from acquire_slots(cap),
        // exactly the window is constructed
        unsafe { retire(self.alloc, self.ptr, self.cap, window) }
    }
}
