// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod relocate;
mod strong;

use core::cell::{Cell, RefCell};

use rampart_alloc::FaultInjectingAllocator;
use rampart_fault::{FaultInjectionDisable, fault_point};

use crate::{RampartVec, Relocate, VecError};

pub(crate) type FaultyVec<T> = RampartVec<T, FaultInjectingAllocator>;

thread_local! {
    static COPIES: Cell<usize> = const { Cell::new(0) };
    static DROPPED: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
}

/// Element whose transfer may fail: relocated by copy, every copy is a fault point.
#[derive(Debug, PartialEq)]
pub(crate) struct Fallible(pub u32);

impl Relocate for Fallible {
    const TRANSFER_IS_INFALLIBLE: bool = false;

    fn try_copy(&self) -> Result<Self, VecError> {
        fault_point()?;
        COPIES.with(|copies| copies.set(copies.get() + 1));
        Ok(Self(self.0))
    }
}

pub(crate) fn copies() -> usize {
    COPIES.with(Cell::get)
}

pub(crate) fn reset_copies() {
    COPIES.with(|copies| copies.set(0));
}

/// Transfer-only element recording its drop.
#[derive(Debug)]
pub(crate) struct DropRecorder(pub u32);

impl Relocate for DropRecorder {
    const TRANSFER_IS_INFALLIBLE: bool = true;
}

impl Drop for DropRecorder {
    fn drop(&mut self) {
        DROPPED.with(|dropped| dropped.borrow_mut().push(self.0));
    }
}

pub(crate) fn take_dropped() -> Vec<u32> {
    DROPPED.with(|dropped| core::mem::take(&mut *dropped.borrow_mut()))
}

/// Builds `[0, 1, .., len)` with capacity `capacity`, fault injection suppressed.
pub(crate) fn fallible_vec(len: u32, capacity: usize) -> FaultyVec<Fallible> {
    let _setup = FaultInjectionDisable::new();
    let mut vec = FaultyVec::new_in(FaultInjectingAllocator::new());

    vec.reserve(capacity).expect("Failed to reserve");
    for i in 0..len {
        vec.push(Fallible(i)).expect("Failed to push");
    }

    vec
}

/// Length, capacity, storage address and values of a vector.
#[derive(Debug, PartialEq)]
pub(crate) struct Snapshot {
    len: usize,
    capacity: usize,
    data: usize,
    values: Vec<u32>,
}

impl Snapshot {
    pub(crate) fn of(vec: &FaultyVec<Fallible>) -> Self {
        Self {
            len: vec.len(),
            capacity: vec.capacity(),
            data: vec.as_ptr() as usize,
            values: vec.iter().map(|item| item.0).collect(),
        }
    }
}
