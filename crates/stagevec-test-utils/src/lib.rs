// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test fixtures for stagevec crates.
//!
//! - [`Tally`] / [`Tracked`]: elements that count their clones and drops and
//!   can be armed to panic in `Clone`, the way a throwing copy constructor
//!   would, or once in `Drop`.
//! - [`failing_after`]: a fallible element constructor that succeeds a fixed
//!   number of times.
//!
//! ## License
//!
//! GPL-3.0-only

mod fixture;

pub use fixture::{FixtureError, Tally, Tracked, failing_after};
