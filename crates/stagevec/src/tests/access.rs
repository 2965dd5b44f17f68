// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use stagevec_alloc::{DistinctHeap, TrackingHeap};

use crate::{StageVec, StageVecError};

// =============================================================================
// at() / at_mut() / Index
// =============================================================================

#[test]
fn test_at_matches_index() {
    let v = StageVec::from_slice(&[5, 6, 7]).expect("Failed to from_slice");

    for i in 0..v.len() {
        assert_eq!(v.at(i), Ok(&v[i]));
    }
}

#[test]
fn test_at_out_of_range() {
    let v = StageVec::from_slice(&[5, 6, 7]).expect("Failed to from_slice");

    assert_eq!(v.at(3), Err(StageVecError::OutOfRange { index: 3, len: 3 }));
}

#[test]
fn test_at_negative_index_wraps_and_fails() {
    let v = StageVec::from_slice(&[5, 6, 7]).expect("Failed to from_slice");
    let index = -1isize as usize;

    assert_eq!(v.at(index), Err(StageVecError::OutOfRange { index, len: 3 }));
}

#[test]
fn test_at_mut() {
    let mut v = StageVec::from_slice(&[5, 6, 7]).expect("Failed to from_slice");

    *v.at_mut(1).expect("Failed to at_mut") = 60;

    assert_eq!(v, [5, 60, 7]);
    assert!(v.at_mut(3).is_err());
}

#[test]
fn test_index_mut_and_ranges() {
    let mut v = StageVec::from_slice(&[1, 2, 3, 4]).expect("Failed to from_slice");

    v[0] = 10;
    v[1..3].copy_from_slice(&[20, 30]);

    assert_eq!(&v[..], &[10, 20, 30, 4]);
}

#[test]
#[should_panic]
fn test_index_out_of_bounds_panics() {
    let v = StageVec::from_slice(&[1]).expect("Failed to from_slice");

    let _out_of_bounds = v[1];
}

// =============================================================================
// front() / back()
// =============================================================================

#[test]
fn test_front_back() {
    let mut v = StageVec::from_slice(&[1, 2, 3]).expect("Failed to from_slice");

    assert_eq!(v.front(), Some(&1));
    assert_eq!(v.back(), Some(&3));

    *v.front_mut().expect("Failed to front_mut") = 0;
    *v.back_mut().expect("Failed to back_mut") = 9;

    assert_eq!(v, [0, 2, 9]);
}

#[test]
fn test_front_back_empty() {
    let mut v: StageVec<i32> = StageVec::new();

    assert_eq!(v.front(), None);
    assert_eq!(v.back(), None);
    assert!(v.front_mut().is_none());
    assert!(v.back_mut().is_none());
}

// =============================================================================
// slices / iteration / traits
// =============================================================================

#[test]
fn test_as_ptr_points_at_first_element() {
    let mut v = StageVec::from_slice(&[4, 5]).expect("Failed to from_slice");

    assert_eq!(unsafe { *v.as_ptr() }, 4);

    unsafe { *v.as_mut_ptr().add(1) = 50 };
    assert_eq!(v.as_slice(), &[4, 50]);
}

#[test]
fn test_deref_to_slice() {
    let v = StageVec::from_slice(&[3, 1, 2]).expect("Failed to from_slice");

    assert_eq!(v.iter().sum::<i32>(), 6);
    assert!(v.contains(&1));
    assert_eq!(v.first(), Some(&3));
}

#[test]
fn test_into_iterator_by_reference() {
    let mut v = StageVec::from_slice(&[1, 2, 3]).expect("Failed to from_slice");

    for x in &mut v {
        *x *= 2;
    }

    let mut collected = Vec::new();
    for x in &v {
        collected.push(*x);
    }

    assert_eq!(collected, [2, 4, 6]);
    v.as_mut_slice().reverse();
    assert_eq!(v, [6, 4, 2]);
}

#[test]
fn test_debug_lists_elements() {
    let v = StageVec::from_slice(&[1, 2, 3]).expect("Failed to from_slice");

    assert_eq!(format!("{v:?}"), "[1, 2, 3]");
}

#[test]
fn test_eq_across_strategies() {
    let a = StageVec::from_slice(&[1, 2]).expect("Failed to from_slice");
    let b = StageVec::from_slice_in(&[1, 2], DistinctHeap::new()).expect("Failed to from_slice_in");
    let c = StageVec::from_slice_in(&[1, 3], TrackingHeap::<false>::new()).expect("Failed to from_slice_in");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, *[1, 2].as_slice());
}

#[test]
fn test_allocator() {
    let heap: TrackingHeap = TrackingHeap::with_id(11);
    let v: StageVec<u8, TrackingHeap> = StageVec::new_in(heap);

    assert_eq!(v.allocator().id(), 11);
}

#[test]
fn test_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<StageVec<String>>();
    assert_send_sync::<StageVec<u8, DistinctHeap>>();
}
