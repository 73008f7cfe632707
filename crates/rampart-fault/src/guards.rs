// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Scoped suppression of fault injection.

use core::cell::Cell;
use core::marker::PhantomData;

thread_local! {
    static DISABLED: Cell<bool> = const { Cell::new(false) };
    static MOVE_FAULTS_DISABLED: Cell<bool> = const { Cell::new(false) };
}

/// Returns `true` while a [`FaultInjectionDisable`] guard is alive on this thread.
pub fn is_fault_injection_disabled() -> bool {
    DISABLED.try_with(Cell::get).unwrap_or(true)
}

/// Returns `true` while a [`MoveFaultDisable`] guard is alive on this thread.
///
/// Ownership transfers that are declared infallible consult this flag so their
/// instrumentation never reports a failure the type promised not to produce.
pub fn move_faults_disabled() -> bool {
    MOVE_FAULTS_DISABLED.try_with(Cell::get).unwrap_or(true)
}

/// RAII guard that suppresses every fault point on the current thread.
///
/// Suppressed checks do not advance the schedule of the active `faulty_run`. The
/// previous state is restored when the guard drops, including during unwinding, so
/// guards nest.
///
/// # Example
///
/// ```rust
/// use rampart_fault::{FaultInjectionDisable, is_fault_injection_disabled};
///
/// assert!(!is_fault_injection_disabled());
/// {
///     let _outer = FaultInjectionDisable::new();
///     {
///         let inner = FaultInjectionDisable::new();
///         inner.reset(); // restores the outer state: still disabled
///         assert!(is_fault_injection_disabled());
///     }
///     assert!(is_fault_injection_disabled());
/// }
/// assert!(!is_fault_injection_disabled());
/// ```
#[must_use = "fault injection is re-enabled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FaultInjectionDisable {
    was_disabled: bool,
    // Thread-local state: the guard must be dropped on the thread that created it.
    _not_send: PhantomData<*const ()>,
}

impl FaultInjectionDisable {
    /// Disables fault injection until the guard drops or [`reset()`](Self::reset) is called.
    pub fn new() -> Self {
        let was_disabled = DISABLED.with(|flag| flag.replace(true));

        Self {
            was_disabled,
            _not_send: PhantomData,
        }
    }

    /// Restores the state observed when the guard was created.
    ///
    /// Calling it more than once, or dropping the guard afterwards, is harmless.
    pub fn reset(&self) {
        let _ = DISABLED.try_with(|flag| flag.set(self.was_disabled));
    }
}

impl Default for FaultInjectionDisable {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FaultInjectionDisable {
    fn drop(&mut self) {
        self.reset();
    }
}

/// RAII guard that suppresses faults inside ownership transfers only.
///
/// Narrower than [`FaultInjectionDisable`]: allocations and copies still fail on
/// schedule, only code that checks [`move_faults_disabled()`] is affected.
#[must_use = "transfer faults are re-enabled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct MoveFaultDisable {
    was_disabled: bool,
    _not_send: PhantomData<*const ()>,
}

impl MoveFaultDisable {
    /// Suppresses transfer faults until the guard drops or [`reset()`](Self::reset) is called.
    pub fn new() -> Self {
        let was_disabled = MOVE_FAULTS_DISABLED.with(|flag| flag.replace(true));

        Self {
            was_disabled,
            _not_send: PhantomData,
        }
    }

    /// Restores the state observed when the guard was created.
    pub fn reset(&self) {
        let _ = MOVE_FAULTS_DISABLED.try_with(|flag| flag.set(self.was_disabled));
    }
}

impl Default for MoveFaultDisable {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MoveFaultDisable {
    fn drop(&mut self) {
        self.reset();
    }
}
