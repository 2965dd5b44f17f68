// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stagevec.
use core::convert::Infallible;

use stagevec_alloc::AllocError;
use thiserror::Error;

/// Errors that can occur when mutating or accessing a [`StageVec`](crate::StageVec).
///
/// `E` is the error type of user-supplied element constructors; it is
/// [`Infallible`] for every operation that does not take one.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum StageVecError<E = Infallible> {
    /// A position or index lies past the end of the container.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },

    /// The requested capacity does not fit in the address space.
    ///
    /// Practically unreachable: it requires an element count whose byte size
    /// exceeds `isize::MAX`.
    #[error("capacity overflow: {requested} elements do not fit in a single allocation")]
    CapacityOverflow {
        /// Element count that was requested.
        requested: usize,
    },

    /// The allocation strategy refused to hand out storage.
    #[error("AllocError: {0}")]
    AllocationFailure(#[from] AllocError),

    /// A user-supplied element constructor failed.
    #[error("element operation failed: {0:?}")]
    ElementOperation(E),
}

impl StageVecError {
    /// Widens an infallible-element error into one carrying element errors of type `E`.
    pub fn widen<E>(self) -> StageVecError<E> {
        match self {
            Self::OutOfRange { index, len } => StageVecError::OutOfRange { index, len },
            Self::CapacityOverflow { requested } => StageVecError::CapacityOverflow { requested },
            Self::AllocationFailure(e) => StageVecError::AllocationFailure(e),
            Self::ElementOperation(never) => match never {},
        }
    }
}
