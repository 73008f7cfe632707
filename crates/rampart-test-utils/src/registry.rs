// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Process-wide set of live instrumented instances, plus operation counters.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::RegistryViolation;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static LIVE: Mutex<BTreeSet<u64>> = Mutex::new(BTreeSet::new());
static COPIES: AtomicUsize = AtomicUsize::new(0);
static MOVES: AtomicUsize = AtomicUsize::new(0);

fn live() -> MutexGuard<'static, BTreeSet<u64>> {
    LIVE.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn register(id: u64) -> Result<(), RegistryViolation> {
    if !live().insert(id) {
        return Err(RegistryViolation::AlreadyRegistered { id });
    }

    Ok(())
}

pub(crate) fn deregister(id: u64) -> Result<(), RegistryViolation> {
    if !live().remove(&id) {
        return Err(RegistryViolation::NotRegistered { id });
    }

    Ok(())
}

pub(crate) fn check_live(id: u64) -> Result<(), RegistryViolation> {
    if !live().contains(&id) {
        return Err(RegistryViolation::Destroyed { id });
    }

    Ok(())
}

pub(crate) fn snapshot() -> BTreeSet<u64> {
    live().clone()
}

pub(crate) fn count_copy() {
    COPIES.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn count_move() {
    MOVES.fetch_add(1, Ordering::Relaxed);
}

/// Fails the current test on a violation.
///
/// Inside a destructor that runs during unwinding the violation is logged instead, so
/// the original panic is the one reported.
pub(crate) fn enforce(result: Result<(), RegistryViolation>) {
    let Err(violation) = result else {
        return;
    };

    if std::thread::panicking() {
        log::error!("{violation} (while unwinding)");
        return;
    }

    panic!("{violation}");
}

/// Number of live instrumented instances.
pub fn live_instances() -> usize {
    live().len()
}

/// Number of copies made since the last [`reset_counters()`].
pub fn copy_count() -> usize {
    COPIES.load(Ordering::Relaxed)
}

/// Number of ownership transfers made since the last [`reset_counters()`].
pub fn move_count() -> usize {
    MOVES.load(Ordering::Relaxed)
}

/// Resets the copy and transfer counters.
pub fn reset_counters() {
    COPIES.store(0, Ordering::Relaxed);
    MOVES.store(0, Ordering::Relaxed);
}

/// Asserts that the set of live instances is the same when the guard drops as when it
/// was created.
///
/// # Panics
///
/// [`assert_unchanged()`](Self::assert_unchanged) and `Drop` panic when instances were
/// leaked or destroyed; `Drop` stays silent while the thread is already panicking.
#[must_use = "the registry is compared when the guard is dropped"]
#[derive(Debug)]
pub struct NoNewInstancesGuard {
    baseline: BTreeSet<u64>,
}

impl NoNewInstancesGuard {
    /// Snapshots the registry.
    pub fn new() -> Self {
        Self {
            baseline: snapshot(),
        }
    }

    /// Returns `true` if the registry matches the snapshot.
    pub fn is_unchanged(&self) -> bool {
        snapshot() == self.baseline
    }

    /// Panics unless the registry matches the snapshot.
    pub fn assert_unchanged(&self) {
        let current = snapshot();
        let leaked: Vec<_> = current.difference(&self.baseline).collect();
        let destroyed: Vec<_> = self.baseline.difference(&current).collect();

        assert!(
            leaked.is_empty() && destroyed.is_empty(),
            "live instances changed: leaked {leaked:?}, destroyed {destroyed:?}"
        );
    }
}

impl Default for NoNewInstancesGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoNewInstancesGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }

        self.assert_unchanged();
    }
}
