// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_alloc::{AllocationBalance, FaultInjectingAllocator};
use rampart_fault::{FaultInjectionDisable, faulty_run};

use super::{Fallible, FaultyVec, Snapshot, fallible_vec};
use crate::VecError;

/// Runs `op` on a fresh vector under `faulty_run`, checking the strong guarantee on
/// every injected failure. Returns the number of runs.
fn assert_strong<F>(len: u32, capacity: usize, mut op: F) -> usize
where
    F: FnMut(&mut FaultyVec<Fallible>) -> Result<(), VecError>,
{
    let report = faulty_run(|| {
        let _balance = AllocationBalance::new();
        let mut vec = fallible_vec(len, capacity);
        let before = Snapshot::of(&vec);

        if let Err(err) = op(&mut vec) {
            assert!(err.is_injected(), "unexpected error: {err}");
            assert_eq!(Snapshot::of(&vec), before);
            return Err(err);
        }

        Ok(())
    })
    .expect("Failed to run faulty_run");

    report.runs
}

// =============================================================================
// push(), push_copy(), push_from_within()
// =============================================================================

#[test]
fn test_push_without_growth_has_no_fault_point() {
    let runs = assert_strong(3, 4, |vec| vec.push(Fallible(3)));

    assert_eq!(runs, 1);
}

#[test]
fn test_push_with_growth_is_strong() {
    // allocation + 4 relocating copies
    let runs = assert_strong(4, 4, |vec| {
        vec.push(Fallible(4))?;
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 8);
        Ok(())
    });

    assert_eq!(runs, 6);
}

#[test]
fn test_push_copy_with_growth_is_strong() {
    // value copy + allocation + 4 relocating copies
    let runs = assert_strong(4, 4, |vec| vec.push_copy(&Fallible(9)));

    assert_eq!(runs, 7);
}

#[test]
fn test_push_from_within_with_growth_is_strong() {
    let runs = assert_strong(2, 2, |vec| {
        vec.push_from_within(0)?;
        assert_eq!(vec.as_slice(), [Fallible(0), Fallible(1), Fallible(0)]);
        Ok(())
    });

    assert_eq!(runs, 5);
}

#[test]
fn test_push_into_empty_is_strong() {
    let runs = assert_strong(0, 0, |vec| vec.push(Fallible(0)));

    assert_eq!(runs, 2);
}

#[test]
fn test_push_primitive_is_strong() {
    let report = faulty_run(|| {
        let _balance = AllocationBalance::new();
        let mut vec = FaultyVec::new_in(FaultInjectingAllocator::new());

        for i in 0..9u64 {
            let capacity = vec.capacity();
            if let Err(err) = vec.push(i) {
                assert_eq!(vec.len(), i as usize);
                assert_eq!(vec.capacity(), capacity);
                return Err(err);
            }
        }

        Ok::<(), VecError>(())
    })
    .expect("Failed to run faulty_run");

    // Growth to 1, 2, 4, 8 and 16 allocates.
    assert_eq!(report.runs, 6);
}

// =============================================================================
// insert(), insert_copy(), insert_from_within()
// =============================================================================

#[test]
fn test_insert_front_with_growth_is_strong() {
    let runs = assert_strong(4, 4, |vec| {
        vec.insert(0, Fallible(100))?;
        assert_eq!(vec[0], Fallible(100));
        assert_eq!(vec[4], Fallible(3));
        Ok(())
    });

    assert_eq!(runs, 6);
}

#[test]
fn test_insert_copy_without_growth_is_strong() {
    let runs = assert_strong(3, 4, |vec| vec.insert_copy(1, &Fallible(7)).map(|_| ()));

    assert_eq!(runs, 2);
}

#[test]
fn test_insert_from_within_with_growth_is_strong() {
    let runs = assert_strong(3, 3, |vec| {
        vec.insert_from_within(0, 2)?;
        assert_eq!(vec.iter().map(|item| item.0).collect::<Vec<_>>(), [2, 0, 1, 2]);
        Ok(())
    });

    // source copy + allocation + 3 relocating copies
    assert_eq!(runs, 6);
}

// =============================================================================
// reserve(), shrink_to_fit()
// =============================================================================

#[test]
fn test_reserve_is_strong() {
    let runs = assert_strong(4, 4, |vec| vec.reserve(10));

    assert_eq!(runs, 6);
}

#[test]
fn test_shrink_to_fit_is_strong() {
    let runs = assert_strong(4, 8, |vec| {
        vec.shrink_to_fit()?;
        assert_eq!(vec.capacity(), 4);
        Ok(())
    });

    assert_eq!(runs, 6);
}

#[test]
fn test_shrink_to_fit_empty_cannot_fail() {
    let runs = assert_strong(0, 8, |vec| vec.shrink_to_fit());

    assert_eq!(runs, 1);
}

// =============================================================================
// try_clone(), assign_from()
// =============================================================================

#[test]
fn test_try_clone_is_strong() {
    let report = faulty_run(|| {
        let _balance = AllocationBalance::new();
        let vec = fallible_vec(4, 4);
        let before = Snapshot::of(&vec);

        let copy = vec.try_clone();
        assert_eq!(Snapshot::of(&vec), before);

        let copy = copy?;
        assert_eq!(copy.capacity(), 4);
        assert_eq!(Snapshot::of(&copy).values, before.values);
        Ok::<(), VecError>(())
    })
    .expect("Failed to run faulty_run");

    assert_eq!(report.runs, 6);
}

#[test]
fn test_assign_from_is_strong() {
    let source = fallible_vec(3, 3);

    let runs = assert_strong(5, 8, |vec| {
        vec.assign_from(&source)?;
        assert_eq!(vec.len(), 3);
        assert_eq!(vec.capacity(), 3);
        Ok(())
    });

    // allocation + 3 copies
    assert_eq!(runs, 5);
}

// =============================================================================
// No-fail operations
// =============================================================================

#[test]
fn test_no_fail_operations_have_no_fault_points() {
    let report = faulty_run(|| {
        let _balance = AllocationBalance::new();
        let mut vec = fallible_vec(8, 8);
        let mut other = fallible_vec(2, 2);

        vec.erase(0);
        vec.erase_range(1..3);
        vec.pop();
        vec.truncate(2);
        vec.transfer_from(&mut other);
        let taken = core::mem::take(&mut vec);
        drop(taken);
        vec.clear();

        Ok::<(), VecError>(())
    })
    .expect("Failed to run faulty_run");

    assert_eq!(report.runs, 1);
}

#[test]
fn test_setup_under_disable_is_not_enumerated() {
    let report = faulty_run(|| {
        let _setup = FaultInjectionDisable::new();
        let mut vec = fallible_vec(16, 1);
        vec.push_copy(&Fallible(16))?;
        Ok::<(), VecError>(())
    })
    .expect("Failed to run faulty_run");

    assert_eq!(report.runs, 1);
}
