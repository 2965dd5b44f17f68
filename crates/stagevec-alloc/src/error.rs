// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stagevec-alloc.

use core::alloc::Layout;

use thiserror::Error;

/// An allocation strategy could not satisfy an acquire request.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("allocation strategy could not acquire {} bytes (align {})", .layout.size(), .layout.align())]
pub struct AllocError {
    /// The layout that was requested.
    pub layout: Layout,
}

impl AllocError {
    /// Creates an `AllocError` for the given layout.
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }
}
