// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;
use stagevec_alloc::TrackingHeap;

use crate::StageVec;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    InsertN(usize, usize, i32),
    Erase(usize),
    EraseRange(usize, usize),
    Resize(usize, i32),
    Reserve(usize),
    ShrinkToFit,
    Truncate(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        2 => (any::<usize>(), any::<i32>()).prop_map(|(i, x)| Op::Insert(i, x)),
        1 => (any::<usize>(), 0..4usize, any::<i32>()).prop_map(|(i, n, x)| Op::InsertN(i, n, x)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::EraseRange(a, b)),
        1 => (0..24usize, any::<i32>()).prop_map(|(n, x)| Op::Resize(n, x)),
        1 => (0..32usize).prop_map(Op::Reserve),
        1 => Just(Op::ShrinkToFit),
        1 => (0..16usize).prop_map(Op::Truncate),
        1 => Just(Op::Clear),
    ]
}

// Positions are drawn unbounded and folded into [0, len] at apply time.
fn apply(v: &mut StageVec<i32, TrackingHeap>, model: &mut Vec<i32>, op: &Op) {
    let len = model.len();

    match *op {
        Op::Push(x) => {
            v.push(x).expect("Failed to push");
            model.push(x);
        }
        Op::Pop => {
            assert_eq!(v.pop(), model.pop());
        }
        Op::Insert(i, x) => {
            let i = i % (len + 1);
            assert_eq!(v.insert(i, x).expect("Failed to insert"), i);
            model.insert(i, x);
        }
        Op::InsertN(i, n, x) => {
            let i = i % (len + 1);
            assert_eq!(v.insert_n(i, n, &x).expect("Failed to insert_n"), i);
            for _ in 0..n {
                model.insert(i, x);
            }
        }
        Op::Erase(i) => {
            if len == 0 {
                assert!(v.erase(i).is_err());
            } else {
                let i = i % len;
                assert_eq!(v.erase(i).expect("Failed to erase"), i);
                model.remove(i);
            }
        }
        Op::EraseRange(a, b) => {
            let (a, b) = (a % (len + 1), b % (len + 1));
            let (first, last) = (a.min(b), a.max(b));
            assert_eq!(v.erase_range(first, last).expect("Failed to erase_range"), first);
            model.drain(first..last);
        }
        Op::Resize(n, x) => {
            v.resize(n, x).expect("Failed to resize");
            model.resize(n, x);
        }
        Op::Reserve(n) => {
            let cap = v.capacity();
            v.reserve(n).expect("Failed to reserve");
            assert_eq!(v.capacity(), cap.max(n));
        }
        Op::ShrinkToFit => {
            v.shrink_to_fit().expect("Failed to shrink_to_fit");
            assert_eq!(v.capacity(), v.len());
        }
        Op::Truncate(n) => {
            v.truncate(n);
            model.truncate(n);
        }
        Op::Clear => {
            let cap = v.capacity();
            v.clear();
            model.clear();
            assert_eq!(v.capacity(), cap);
        }
    }
}

proptest! {
    #[test]
    fn behaves_like_vec(ops in prop::collection::vec(op(), 0..64)) {
        let heap: TrackingHeap = TrackingHeap::new();
        let mut v = StageVec::new_in(heap.clone());
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut v, &mut model, op);

            prop_assert_eq!(v.as_slice(), model.as_slice());
            prop_assert!(v.len() <= v.capacity());
        }

        drop(v);
        prop_assert!(heap.is_balanced());
    }

    #[test]
    fn cursor_distance_matches_index(
        values in prop::collection::vec(any::<i32>(), 1..48),
        a in any::<usize>(),
        b in any::<usize>()
    ) {
        let v = StageVec::from_slice(&values).expect("Failed to from_slice");
        let len = values.len();
        let (a, b) = (a % (len + 1), b % (len + 1));

        let x = v.begin() + a as isize;
        let y = v.begin() + b as isize;

        prop_assert_eq!(y - x, b as isize - a as isize);
        prop_assert_eq!(x < y, a < b);
        prop_assert_eq!(x == y, a == b);
        prop_assert_eq!(v.end() - v.begin(), len as isize);

        if a < len {
            prop_assert_eq!(*x, values[a]);
            prop_assert_eq!(*(v.rbegin() + (len - 1 - a) as isize), values[a]);
        }
    }

    #[test]
    fn growth_never_shrinks_capacity(pushes in 0..200usize) {
        let mut v: StageVec<u16> = StageVec::new();
        let mut cap = 0;

        for x in 0..pushes {
            v.push(x as u16).expect("Failed to push");

            prop_assert!(v.capacity() >= cap);
            if v.capacity() != cap {
                prop_assert_eq!(v.capacity(), 2 * cap + 1);
            }
            cap = v.capacity();
        }
    }
}
