// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::mem;

use rampart_fault::{InjectedFault, MoveFaultDisable, fault_point, move_faults_disabled};
use rampart_vec::{Relocate, VecError};

use crate::registry::{self, enforce};

/// An `i32` that hits a fault point in every operation and tracks its own lifecycle.
///
/// Each instance carries a unique id registered while it is live. Constructing,
/// copying, transferring, reading and comparing consult [`fault_point()`] first; copies
/// and transfers bump [`copy_count()`](crate::copy_count) and
/// [`move_count()`](crate::move_count). Registry violations (double destruction, use
/// after destruction) fail the test.
///
/// `NOTHROW_TRANSFER` selects the relocation strategy of containers: `false` makes
/// them copy elements when they grow, `true` lets them move elements bitwise.
pub struct Instrumented<const NOTHROW_TRANSFER: bool> {
    id: u64,
    value: i32,
}

/// Instrumented element whose transfer may fail.
pub type Element = Instrumented<false>;

/// Instrumented element whose transfer never fails.
pub type ElementWithNonFailingMove = Instrumented<true>;

impl<const NOTHROW_TRANSFER: bool> Instrumented<NOTHROW_TRANSFER> {
    /// Constructs an instance holding `value`.
    pub fn new(value: i32) -> Result<Self, InjectedFault> {
        fault_point()?;
        Ok(Self::register(value))
    }

    fn register(value: i32) -> Self {
        let id = registry::next_id();
        enforce(registry::register(id));

        Self { id, value }
    }

    fn assert_live(&self) {
        enforce(registry::check_live(self.id));
    }

    /// Suppresses transfer faults for the guard's lifetime when the transfer is infallible.
    fn nothrow_scope() -> Option<MoveFaultDisable> {
        NOTHROW_TRANSFER.then(MoveFaultDisable::new)
    }

    fn transfer_fault_point() -> Result<(), InjectedFault> {
        if move_faults_disabled() {
            return Ok(());
        }

        fault_point()
    }

    /// Registry id of this instance.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Reads the value without a fault point.
    pub fn get(&self) -> i32 {
        self.assert_live();
        self.value
    }

    /// Reads the value.
    pub fn try_value(&self) -> Result<i32, InjectedFault> {
        self.assert_live();
        fault_point()?;

        Ok(self.value)
    }

    /// Compares values.
    pub fn try_eq(&self, other: &Self) -> Result<bool, InjectedFault> {
        self.assert_live();
        other.assert_live();
        fault_point()?;

        Ok(self.value == other.value)
    }

    /// Moves the value into a new instance, leaving `-1` behind.
    ///
    /// Never fails when `NOTHROW_TRANSFER` is `true`.
    pub fn transfer(&mut self) -> Result<Self, InjectedFault> {
        let _nothrow = Self::nothrow_scope();
        self.assert_live();
        Self::transfer_fault_point()?;

        let value = mem::replace(&mut self.value, -1);
        registry::count_move();

        Ok(Self::register(value))
    }

    /// Copies `other`'s value into this instance.
    pub fn try_assign(&mut self, other: &Self) -> Result<(), InjectedFault> {
        self.assert_live();
        other.assert_live();
        fault_point()?;

        registry::count_copy();
        self.value = other.value;

        Ok(())
    }

    /// Moves `other`'s value into this instance, leaving `-1` behind.
    pub fn try_assign_transfer(&mut self, other: &mut Self) -> Result<(), InjectedFault> {
        let _nothrow = Self::nothrow_scope();
        self.assert_live();
        other.assert_live();
        Self::transfer_fault_point()?;

        registry::count_move();
        self.value = mem::replace(&mut other.value, -1);

        Ok(())
    }
}

impl<const NOTHROW_TRANSFER: bool> Relocate for Instrumented<NOTHROW_TRANSFER> {
    const TRANSFER_IS_INFALLIBLE: bool = NOTHROW_TRANSFER;

    fn try_copy(&self) -> Result<Self, VecError> {
        self.assert_live();
        fault_point()?;

        registry::count_copy();
        Ok(Self::register(self.value))
    }
}

impl<const NOTHROW_TRANSFER: bool> Drop for Instrumented<NOTHROW_TRANSFER> {
    fn drop(&mut self) {
        enforce(registry::deregister(self.id));
    }
}

impl<const NOTHROW_TRANSFER: bool> PartialEq for Instrumented<NOTHROW_TRANSFER> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<const NOTHROW_TRANSFER: bool> PartialEq<i32> for Instrumented<NOTHROW_TRANSFER> {
    fn eq(&self, other: &i32) -> bool {
        self.get() == *other
    }
}

impl<const NOTHROW_TRANSFER: bool> fmt::Debug for Instrumented<NOTHROW_TRANSFER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
