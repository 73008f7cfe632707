// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt::Debug;

use rampart_alloc::RawAllocator;
use rampart_vec::RampartVec;

use crate::instrumented::Instrumented;
use crate::ordered::OrderedElement;

/// Reads an element's value without hitting a fault point.
pub trait Observe {
    /// The observed value.
    type Observed: PartialEq + Debug;

    /// Reads the value.
    fn observe(&self) -> Self::Observed;
}

impl<const NOTHROW_TRANSFER: bool> Observe for Instrumented<NOTHROW_TRANSFER> {
    type Observed = i32;

    fn observe(&self) -> i32 {
        self.get()
    }
}

impl Observe for OrderedElement {
    type Observed = usize;

    fn observe(&self) -> usize {
        self.value()
    }
}

/// Length, capacity, storage address and values of a container at one point in time.
///
/// Capture it before a strong operation; if the operation fails,
/// [`assert_unchanged()`](Self::assert_unchanged) proves nothing observable changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSnapshot<O> {
    len: usize,
    capacity: usize,
    data: usize,
    values: Vec<O>,
}

impl<O: PartialEq + Debug> ContainerSnapshot<O> {
    /// Records the state of `vec`.
    pub fn capture<T, A>(vec: &RampartVec<T, A>) -> Self
    where
        T: Observe<Observed = O>,
        A: RawAllocator,
    {
        Self {
            len: vec.len(),
            capacity: vec.capacity(),
            data: vec.as_ptr() as usize,
            values: vec.iter().map(Observe::observe).collect(),
        }
    }

    /// Returns the recorded values.
    pub fn values(&self) -> &[O] {
        &self.values
    }

    /// Panics unless `vec` is in the recorded state.
    pub fn assert_unchanged<T, A>(&self, vec: &RampartVec<T, A>)
    where
        T: Observe<Observed = O>,
        A: RawAllocator,
    {
        let current = Self::capture(vec);

        assert_eq!(current.len, self.len, "length changed");
        assert_eq!(current.capacity, self.capacity, "capacity changed");
        assert_eq!(current.data, self.data, "storage address changed");
        assert_eq!(current.values, self.values, "values changed");
    }
}
