// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocation strategies for allocator-aware containers.
//!
//! An [`AllocStrategy`] hands out raw storage, takes it back, and declares how
//! it travels between containers on copy-assignment, move-assignment and
//! swap. Containers compare strategies with
//! [`AllocStrategy::interchangeable_with`] to decide whether a buffer acquired
//! by one instance may be adopted by a container holding another.
//!
//! # Stock Strategies
//!
//! | Strategy | Propagates | Interchangeable |
//! |---|---|---|
//! | [`Heap`] | no | always |
//! | [`PropagatingHeap`] | copy, move, swap | always |
//! | [`DistinctHeap`] | no | never |
//! | [`PropagatingDistinctHeap`] | copy, move, swap | never |
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to get [`TrackingHeap`], a strategy with
//! an identity, shared counters and failure injection:
//!
//! ```toml
//! [dev-dependencies]
//! stagevec-alloc = { version = "*", features = ["test-utils"] }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod heap;
mod strategy;

#[cfg(any(test, feature = "test-utils"))]
mod tracking;

#[cfg(test)]
mod tests;

pub use error::AllocError;
pub use heap::{DistinctHeap, Heap, PropagatingDistinctHeap, PropagatingHeap};
pub use strategy::AllocStrategy;

#[cfg(any(test, feature = "test-utils"))]
pub use tracking::{PropagatingTrackingHeap, TrackingBehaviour, TrackingHeap, TrackingStats};
