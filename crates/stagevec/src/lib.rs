// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator-aware dynamic array with staged, all-or-nothing reallocation.
//!
//! [`StageVec`] is a contiguous growable array whose storage comes from a
//! pluggable [`AllocStrategy`]. Whenever an operation needs new storage it
//! builds the next buffer in a private staging area and only swaps it in
//! once every fallible step (acquiring storage, constructing new elements)
//! has succeeded. A failure, or a panic in an element's `Clone`, leaves the
//! container exactly as it was and leaks nothing.
//!
//! ## Allocation Strategies
//!
//! The strategy decides where storage comes from and how it travels on
//! copy-assignment ([`StageVec::assign_from`]), move-assignment
//! ([`StageVec::move_assign_from`]) and [`StageVec::swap_with`]. Strategies
//! that are not interchangeable force element-wise transfer instead of
//! buffer adoption.
//!
//! ```rust
//! use stagevec::{DistinctHeap, StageVec};
//!
//! let src = StageVec::from_slice_in(&[1, 2, 3], DistinctHeap::new()).expect("Failed to build");
//! let mut dst = StageVec::new_in(DistinctHeap::new());
//!
//! dst.assign_from(&src).expect("Failed to assign");
//! assert_eq!(dst, src);
//! ```
//!
//! ## Cursors
//!
//! [`Cursor`] and [`CursorMut`] are pointer-like random-access positions
//! with C-style arithmetic; [`Reverse`] walks either one backwards. Cursors
//! borrow the container, so they cannot outlive a reallocating mutation.
//! Positional mutations (`insert*`, `erase*`) take and return plain indices.
//!
//! ## Logging
//!
//! Staged commits emit `trace` events under the `stagevec::staging` target;
//! refused acquires emit `debug` events under the same target. Element-wise
//! fallbacks between foreign strategies log under `stagevec::propagation`.
//!
//! ## License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod capacity;
mod construction;
mod cursor;
mod error;
mod mutation;
mod propagation;
mod reverse;
mod stage_vec;
mod staging;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, CursorMut, RandomAccess, RandomAccessMut};
pub use error::StageVecError;
pub use reverse::Reverse;
pub use stage_vec::StageVec;
pub use stagevec_alloc::{
    AllocError, AllocStrategy, DistinctHeap, Heap, PropagatingDistinctHeap, PropagatingHeap,
};

#[cfg(feature = "test-utils")]
pub use stagevec_alloc::{PropagatingTrackingHeap, TrackingBehaviour, TrackingHeap, TrackingStats};
