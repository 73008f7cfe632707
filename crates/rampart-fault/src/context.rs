// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! FaultContext - the fault schedule of a single `faulty_run`.

/// Backtracking cursor over "how many non-failing calls to allow before failing".
///
/// `skip_ranges[d]` is the number of calls that must pass at depth `d` before the
/// call that fails. Depth grows only when an operation keeps running after an
/// injected fault and reaches a fault point again.
///
/// Invariants:
/// - `error_index <= skip_ranges.len()`
/// - while `error_index < skip_ranges.len()`: `skip_index <= skip_ranges[error_index]`
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct FaultContext {
    skip_ranges: Vec<usize>,
    error_index: usize,
    skip_index: usize,
    fault_registered: bool,
}

impl FaultContext {
    /// Creates an empty schedule. The first check of the first run fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether the current fault point fails, advancing the cursors.
    pub fn check(&mut self) -> bool {
        debug_assert!(self.error_index <= self.skip_ranges.len());

        if self.error_index == self.skip_ranges.len() {
            self.skip_ranges.push(0);
            self.error_index += 1;
            self.fault_registered = true;
            return true;
        }

        let target = self.skip_ranges[self.error_index];
        debug_assert!(self.skip_index <= target);

        if self.skip_index == target {
            self.error_index += 1;
            self.skip_index = 0;
            self.fault_registered = true;
            return true;
        }

        self.skip_index += 1;
        false
    }

    /// Moves the schedule to the next fault point after a failed run.
    ///
    /// Forgets every depth past the one that stopped the run and lets one more call
    /// pass at the deepest remaining depth.
    pub fn advance(&mut self) {
        self.skip_ranges.truncate(self.error_index);

        if let Some(last) = self.skip_ranges.last_mut() {
            *last += 1;
        }

        self.error_index = 0;
        self.skip_index = 0;
        self.fault_registered = false;
    }

    /// Returns `true` if a fault was injected since the last [`advance()`](Self::advance).
    pub fn fault_registered(&self) -> bool {
        self.fault_registered
    }

    /// Returns the per-depth skip counts.
    pub fn skip_ranges(&self) -> &[usize] {
        &self.skip_ranges
    }

    /// Returns the depth the next check is evaluated at.
    pub fn error_index(&self) -> usize {
        self.error_index
    }

    /// Returns how many calls have passed at the current depth.
    pub fn skip_index(&self) -> usize {
        self.skip_index
    }
}

