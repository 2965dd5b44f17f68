// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use stagevec_alloc::{
    DistinctHeap, PropagatingDistinctHeap, PropagatingHeap, PropagatingTrackingHeap,
    TrackingBehaviour, TrackingHeap,
};
use stagevec_test_utils::Tally;

use crate::{StageVec, StageVecError};

// =============================================================================
// assign_from() / clone_from()
// =============================================================================

#[test]
fn test_assign_from_replaces_contents() {
    let src = StageVec::from_slice(&[1, 2, 3]).expect("Failed to from_slice");
    let mut dst = StageVec::from_slice(&[7, 7, 7, 7, 7]).expect("Failed to from_slice");

    dst.assign_from(&src).expect("Failed to assign_from");

    assert_eq!(dst, src);
    assert_eq!(dst.capacity(), 3);
    assert_eq!(src, [1, 2, 3]);
}

#[test]
fn test_assign_from_distinct_keeps_own_strategy() {
    let a: TrackingHeap = TrackingHeap::with_id(1);
    let b: TrackingHeap = TrackingHeap::with_id(2);

    let src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9], b.clone()).expect("Failed to from_slice_in");

    dst.assign_from(&src).expect("Failed to assign_from");

    assert_eq!(dst, [1, 2, 3]);
    assert_eq!(dst.allocator().id(), 2);
    assert_eq!(src.allocator().id(), 1);
    assert_eq!(a.stats().acquires, 1);
    assert_eq!(b.stats().acquires, 2);
}

#[test]
fn test_assign_from_distinct_heap() {
    let src = StageVec::from_slice_in(&["x", "y"], DistinctHeap::new()).expect("Failed to build src");
    let mut dst = StageVec::new_in(DistinctHeap::new());

    dst.assign_from(&src).expect("Failed to assign_from");

    assert_eq!(dst, src);
}

#[test]
fn test_assign_from_propagating_adopts_source_strategy() {
    let a: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(1);
    let b: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(2);

    let src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9, 9], b.clone()).expect("Failed to from_slice_in");

    dst.assign_from(&src).expect("Failed to assign_from");

    assert_eq!(dst, [1, 2, 3]);
    assert_eq!(dst.allocator().id(), 1);
    assert_eq!(a.stats().acquires, 2);
    assert!(b.is_balanced());
}

#[test]
fn test_assign_from_propagating_failure_leaves_destination_empty() {
    let a: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(1);
    let b: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(2);

    let src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9, 9], b.clone()).expect("Failed to from_slice_in");

    a.change_behaviour(TrackingBehaviour::FailAtAcquire);
    let result = dst.assign_from(&src);

    assert!(matches!(result, Err(StageVecError::AllocationFailure(_))));
    assert!(dst.is_empty());
    assert_eq!(dst.capacity(), 0);
    assert!(b.is_balanced());
}

#[test]
fn test_assign_from_failure_keeps_destination() {
    let a: TrackingHeap = TrackingHeap::with_id(1);
    let b: TrackingHeap = TrackingHeap::with_id(2);

    let src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9, 9], b.clone()).expect("Failed to from_slice_in");

    b.change_behaviour(TrackingBehaviour::FailAtAcquire);
    let result = dst.assign_from(&src);

    assert!(result.is_err());
    assert_eq!(dst, [9, 9]);
    assert_eq!(dst.capacity(), 2);
}

#[test]
fn test_clone_from() {
    let src = StageVec::from_slice_in(&[4, 5], PropagatingDistinctHeap::new()).expect("Failed to build src");
    let mut dst = StageVec::from_slice_in(&[1], PropagatingDistinctHeap::new()).expect("Failed to build dst");

    dst.clone_from(&src);

    assert_eq!(dst, [4, 5]);
}

// =============================================================================
// move_assign_from()
// =============================================================================

#[test]
fn test_move_assign_equal_is_constant_time() {
    let heap: TrackingHeap = TrackingHeap::with_id(1);
    let mut src = StageVec::from_slice_in(&[1, 2, 3], heap.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9], heap.clone()).expect("Failed to from_slice_in");
    let ptr = src.as_ptr();

    dst.move_assign_from(&mut src).expect("Failed to move_assign_from");

    assert_eq!(dst, [1, 2, 3]);
    assert_eq!(dst.as_ptr(), ptr);
    assert_eq!(src.len(), 0);
    assert_eq!(src.capacity(), 0);
    assert_eq!(heap.stats().acquires, 2);
    assert_eq!(heap.stats().releases, 1);
}

#[test]
fn test_move_assign_propagating_adopts_buffer_and_strategy() {
    let a: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(1);
    let b: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(2);

    let mut src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9], b.clone()).expect("Failed to from_slice_in");
    let ptr = src.as_ptr();

    dst.move_assign_from(&mut src).expect("Failed to move_assign_from");

    assert_eq!(dst.as_ptr(), ptr);
    assert_eq!(dst.allocator().id(), 1);
    assert_eq!(a.stats().acquires, 1);
    assert!(b.is_balanced());
    assert!(src.is_empty());
}

#[test]
fn test_move_assign_distinct_relocates() {
    let tally = Tally::new();
    let a: TrackingHeap = TrackingHeap::with_id(1);
    let b: TrackingHeap = TrackingHeap::with_id(2);

    let mut src =
        StageVec::from_iter_in(tally.make_all(&[1, 2, 3]), a.clone()).expect("Failed to from_iter_in");
    let mut dst = StageVec::from_iter_in(tally.make_all(&[9]), b.clone()).expect("Failed to from_iter_in");

    dst.move_assign_from(&mut src).expect("Failed to move_assign_from");

    assert_eq!(dst, [1, 2, 3]);
    assert_eq!(dst.allocator().id(), 2);
    assert_eq!(src.len(), 0);
    assert_eq!(src.capacity(), 0);
    assert!(a.is_balanced());
    assert_eq!(tally.live(), 3);
}

#[test]
fn test_move_assign_distinct_failure_keeps_both() {
    let a: TrackingHeap = TrackingHeap::with_id(1);
    let b: TrackingHeap = TrackingHeap::with_id(2);

    let mut src = StageVec::from_slice_in(&[1, 2, 3], a.clone()).expect("Failed to from_slice_in");
    let mut dst = StageVec::from_slice_in(&[9], b.clone()).expect("Failed to from_slice_in");

    b.change_behaviour(TrackingBehaviour::FailAtAcquire);
    let result = dst.move_assign_from(&mut src);

    assert!(matches!(result, Err(StageVecError::AllocationFailure(_))));
    assert_eq!(src, [1, 2, 3]);
    assert_eq!(dst, [9]);
}

#[test]
fn test_move_assign_distinct_heap() {
    let mut src = StageVec::from_slice_in(&[1, 2, 3], DistinctHeap::new()).expect("Failed to build src");
    let mut dst = StageVec::new_in(DistinctHeap::new());

    dst.move_assign_from(&mut src).expect("Failed to move_assign_from");

    assert_eq!(dst, [1, 2, 3]);
    assert_eq!(src.capacity(), 0);
}

// =============================================================================
// swap_with()
// =============================================================================

#[test]
fn test_swap_with_equal_strategies() {
    let mut a = StageVec::from_slice(&[1, 2, 3]).expect("Failed to from_slice");
    let mut b = StageVec::from_slice(&[4]).expect("Failed to from_slice");
    b.reserve(10).expect("Failed to reserve");

    a.swap_with(&mut b);

    assert_eq!(a, [4]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(b, [1, 2, 3]);
    assert_eq!(b.capacity(), 3);
}

#[test]
fn test_swap_with_propagating_exchanges_strategies() {
    let x: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(1);
    let y: PropagatingTrackingHeap = PropagatingTrackingHeap::with_id(2);

    let mut a = StageVec::from_slice_in(&[1], x.clone()).expect("Failed to from_slice_in");
    let mut b = StageVec::from_slice_in(&[2, 3], y.clone()).expect("Failed to from_slice_in");

    a.swap_with(&mut b);

    assert_eq!(a, [2, 3]);
    assert_eq!(a.allocator().id(), 2);
    assert_eq!(b.allocator().id(), 1);

    drop(a);
    assert!(y.is_balanced());
}

#[test]
fn test_swap_with_propagating_distinct_heap() {
    let mut a = StageVec::from_slice_in(&[1], PropagatingDistinctHeap::new()).expect("Failed to build a");
    let mut b = StageVec::from_slice_in(&[2], PropagatingDistinctHeap::new()).expect("Failed to build b");

    a.swap_with(&mut b);

    assert_eq!(a, [2]);
    assert_eq!(b, [1]);
}

#[test]
#[should_panic(expected = "neither interchangeable nor propagating")]
fn test_swap_with_foreign_strategies_panics() {
    let mut a = StageVec::from_slice_in(&[1], DistinctHeap::new()).expect("Failed to build a");
    let mut b = StageVec::from_slice_in(&[2], DistinctHeap::new()).expect("Failed to build b");

    a.swap_with(&mut b);
}

#[test]
fn test_propagating_heap_move_assign() {
    let mut src = StageVec::from_slice_in(&[5, 6], PropagatingHeap::new()).expect("Failed to build src");
    let mut dst: StageVec<i32, PropagatingHeap> = StageVec::new_in(PropagatingHeap::new());

    dst.move_assign_from(&mut src).expect("Failed to move_assign_from");

    assert_eq!(dst, [5, 6]);
    assert!(src.is_empty());
}
