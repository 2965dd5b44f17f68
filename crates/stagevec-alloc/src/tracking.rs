// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::rc::Rc;
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::heap::{heap_acquire, heap_release};
use crate::strategy::AllocStrategy;

/// Test behaviour for injecting failures into [`TrackingHeap`].
///
/// The behaviour is sticky - once set, it remains active until changed.
/// It is shared by every clone of the strategy it was set on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every `acquire()` call fails.
    FailAtAcquire,
    /// `acquire()` fails once `acquires` successful acquires have been counted.
    FailAfter {
        /// Number of acquires that still succeed, counted from creation.
        acquires: usize,
    },
}

/// Snapshot of the counters of a [`TrackingHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingStats {
    /// Successful acquires.
    pub acquires: usize,
    /// Releases.
    pub releases: usize,
    /// Bytes currently acquired and not yet released.
    pub live_bytes: usize,
    /// Elements constructed through the strategy.
    pub constructs: usize,
    /// Elements destroyed through the strategy.
    pub destroys: usize,
    /// Acquires refused by the injected behaviour.
    pub refused: usize,
}

#[derive(Debug, Default)]
struct Counters {
    acquires: Cell<usize>,
    releases: Cell<usize>,
    live_bytes: Cell<usize>,
    constructs: Cell<usize>,
    destroys: Cell<usize>,
    refused: Cell<usize>,
    behaviour: Cell<TrackingBehaviour>,
}

fn bump(cell: &Cell<usize>, by: usize) {
    cell.set(cell.get() + by);
}

/// Instrumented heap strategy with an identity and shared counters.
///
/// Two instances are interchangeable iff they carry the same `id`. Clones
/// share counters and behaviour, so a test can keep a handle on the strategy
/// it hands to a container and inspect it afterwards.
///
/// # Example
///
/// ```rust
/// use core::alloc::Layout;
/// use stagevec_alloc::{AllocStrategy, TrackingBehaviour, TrackingHeap};
///
/// let heap: TrackingHeap = TrackingHeap::with_id(7);
/// let layout = Layout::new::<u32>();
///
/// let ptr = heap.acquire(layout).expect("acquire failed");
/// unsafe { heap.release(ptr, layout) };
/// assert_eq!(heap.stats().acquires, 1);
/// assert_eq!(heap.stats().live_bytes, 0);
///
/// heap.change_behaviour(TrackingBehaviour::FailAtAcquire);
/// assert!(heap.acquire(layout).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TrackingHeap<const PROPAGATE: bool = false> {
    id: u32,
    counters: Rc<Counters>,
}

/// Tracking strategy that propagates on copy, move and swap.
pub type PropagatingTrackingHeap = TrackingHeap<true>;

impl<const PROPAGATE: bool> TrackingHeap<PROPAGATE> {
    /// Creates a tracking strategy with id `0`.
    pub fn new() -> Self {
        Self::with_id(0)
    }

    /// Creates a tracking strategy with the given identity.
    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            counters: Rc::new(Counters::default()),
        }
    }

    /// Returns the identity of this strategy.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Changes the injected behaviour for this strategy and all its clones.
    pub fn change_behaviour(&self, behaviour: TrackingBehaviour) {
        self.counters.behaviour.set(behaviour);
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> TrackingStats {
        let c = &self.counters;
        TrackingStats {
            acquires: c.acquires.get(),
            releases: c.releases.get(),
            live_bytes: c.live_bytes.get(),
            constructs: c.constructs.get(),
            destroys: c.destroys.get(),
            refused: c.refused.get(),
        }
    }

    /// Returns `true` if every acquire has been matched by a release.
    pub fn is_balanced(&self) -> bool {
        let stats = self.stats();
        stats.acquires == stats.releases && stats.live_bytes == 0
    }

    fn should_refuse(&self) -> bool {
        match self.counters.behaviour.get() {
            TrackingBehaviour::None => false,
            TrackingBehaviour::FailAtAcquire => true,
            TrackingBehaviour::FailAfter { acquires } => self.counters.acquires.get() >= acquires,
        }
    }
}

impl<const PROPAGATE: bool> Default for TrackingHeap<PROPAGATE> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<const PROPAGATE: bool> AllocStrategy for TrackingHeap<PROPAGATE> {
    const PROPAGATE_ON_COPY: bool = PROPAGATE;
    const PROPAGATE_ON_MOVE: bool = PROPAGATE;
    const PROPAGATE_ON_SWAP: bool = PROPAGATE;

    fn acquire(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if self.should_refuse() {
            bump(&self.counters.refused, 1);
            return Err(AllocError::new(layout));
        }

        let ptr = heap_acquire(layout)?;
        bump(&self.counters.acquires, 1);
        bump(&self.counters.live_bytes, layout.size());

        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        bump(&self.counters.releases, 1);
        let live = self.counters.live_bytes.get();
        self.counters.live_bytes.set(live.saturating_sub(layout.size()));

        // SAFETY: guaranteed by caller, acquire() routes to heap_acquire
        unsafe { heap_release(ptr, layout) }
    }

    fn interchangeable_with(&self, other: &Self) -> bool {
        self.id == other.id
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY: guaranteed by caller
        unsafe { slot.as_ptr().write(value) };
        bump(&self.counters.constructs, 1);
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        bump(&self.counters.destroys, 1);
        // SAFETY: guaranteed by caller
        unsafe { core::ptr::drop_in_place(slot.as_ptr()) }
    }
}
