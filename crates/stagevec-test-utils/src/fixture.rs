// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Default)]
struct TallyState {
    created: Cell<usize>,
    dropped: Cell<usize>,
    clones_left: Cell<Option<usize>>,
    drops_left: Cell<Option<usize>>,
}

/// Shared counter behind a family of [`Tracked`] elements.
///
/// # Example
///
/// ```rust
/// use std::panic::{AssertUnwindSafe, catch_unwind};
///
/// use stagevec_test_utils::Tally;
///
/// let tally = Tally::new();
/// let a = tally.make(1);
///
/// tally.arm(1);
/// let b = a.clone();
/// assert!(catch_unwind(AssertUnwindSafe(|| a.clone())).is_err());
///
/// drop((a, b));
/// assert_eq!(tally.live(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tally {
    state: Rc<TallyState>,
}

impl Tally {
    /// Creates a tally with no elements and no armed fuse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element with the given value.
    pub fn make(&self, value: i32) -> Tracked {
        self.state.created.set(self.state.created.get() + 1);

        Tracked {
            value,
            state: Rc::clone(&self.state),
        }
    }

    /// Creates elements for each value, in order.
    pub fn make_all(&self, values: &[i32]) -> Vec<Tracked> {
        values.iter().map(|&v| self.make(v)).collect()
    }

    /// Lets `clones` more clones succeed; the next one panics.
    pub fn arm(&self, clones: usize) {
        self.state.clones_left.set(Some(clones));
    }

    /// Disarms the fuse set by [`Tally::arm`].
    pub fn disarm(&self) {
        self.state.clones_left.set(None);
    }

    /// Lets `drops` more drops pass quietly; the next one panics.
    ///
    /// The fuse blows once. Every later drop is quiet again, so the elements
    /// dropped while unwinding do not abort the process.
    pub fn arm_drop(&self, drops: usize) {
        self.state.drops_left.set(Some(drops));
    }

    /// Number of elements created so far, clones included.
    pub fn created(&self) -> usize {
        self.state.created.get()
    }

    /// Number of elements dropped so far.
    pub fn dropped(&self) -> usize {
        self.state.dropped.get()
    }

    /// Number of elements currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// Element whose clones and drops are counted by its [`Tally`].
pub struct Tracked {
    value: i32,
    state: Rc<TallyState>,
}

impl Tracked {
    /// The element's value.
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(left) = self.state.clones_left.get() {
            if left == 0 {
                panic!("Tracked::clone() fuse blown");
            }

            self.state.clones_left.set(Some(left - 1));
        }

        self.state.created.set(self.state.created.get() + 1);

        Self {
            value: self.value,
            state: Rc::clone(&self.state),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.state.dropped.set(self.state.dropped.get() + 1);

        match self.state.drops_left.get() {
            Some(0) => {
                self.state.drops_left.set(None);
                panic!("Tracked::drop() fuse blown");
            }
            Some(left) => self.state.drops_left.set(Some(left - 1)),
            None => {}
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// Error returned by [`failing_after`] constructors.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("fixture constructor failed after {produced} values")]
pub struct FixtureError {
    /// Values produced before the failure.
    pub produced: usize,
}

/// Returns a constructor yielding `0, 1, 2, ...` that fails on call `n + 1`.
///
/// ```rust
/// use stagevec_test_utils::{FixtureError, failing_after};
///
/// let mut next = failing_after(2);
/// assert_eq!(next(), Ok(0));
/// assert_eq!(next(), Ok(1));
/// assert_eq!(next(), Err(FixtureError { produced: 2 }));
/// ```
pub fn failing_after(n: usize) -> impl FnMut() -> Result<i32, FixtureError> {
    let mut produced = 0usize;

    move || {
        if produced == n {
            return Err(FixtureError { produced });
        }

        produced += 1;
        Ok((produced - 1) as i32)
    }
}
