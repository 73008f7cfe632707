// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Per-thread count of blocks handed out by the interceptor.

use core::cell::Cell;
use core::marker::PhantomData;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

pub(crate) fn record_allocate() {
    let _ = LIVE.try_with(|live| live.set(live.get() + 1));
}

pub(crate) fn record_deallocate() {
    let _ = LIVE.try_with(|live| live.set(live.get() - 1));
}

/// Number of non-empty blocks allocated by a
/// [`FaultInjectingAllocator`](crate::FaultInjectingAllocator) on this thread and not
/// yet released.
///
/// Blocks released on another thread than the one that allocated them make the two
/// counters drift; the value is only meaningful for single-threaded scopes.
pub fn live_allocations() -> isize {
    LIVE.try_with(Cell::get).unwrap_or(0)
}

/// Checks that a scope releases every block it allocates.
///
/// Takes a snapshot of [`live_allocations()`] on creation.
///
/// # Panics
///
/// Dropping the guard panics if the count differs from the snapshot, unless the thread
/// is already panicking.
///
/// # Example
///
/// ```rust
/// use rampart_alloc::{AllocationBalance, FaultInjectingAllocator, RawAllocator};
/// use core::alloc::Layout;
///
/// let alloc = FaultInjectingAllocator::new();
/// let layout = Layout::new::<u64>();
///
/// let balance = AllocationBalance::new();
/// let block = alloc.allocate(layout).expect("allocate");
/// assert_eq!(balance.delta(), 1);
///
/// // SAFETY: `block` was returned by `alloc` for `layout`.
/// unsafe { alloc.deallocate(block, layout) };
/// assert_eq!(balance.delta(), 0);
/// ```
#[must_use = "the balance is checked when the guard is dropped"]
#[derive(Debug)]
pub struct AllocationBalance {
    baseline: isize,
    _not_send: PhantomData<*const ()>,
}

impl AllocationBalance {
    /// Snapshots the current count.
    pub fn new() -> Self {
        Self {
            baseline: live_allocations(),
            _not_send: PhantomData,
        }
    }

    /// Blocks allocated since the snapshot, minus blocks released.
    pub fn delta(&self) -> isize {
        live_allocations() - self.baseline
    }

    /// Returns `true` if the count is back at the snapshot.
    pub fn is_balanced(&self) -> bool {
        self.delta() == 0
    }
}

impl Default for AllocationBalance {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AllocationBalance {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }

        let delta = self.delta();
        assert!(delta == 0, "allocation balance off by {delta} block(s)");
    }
}
