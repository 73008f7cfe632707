// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Instrumented element types for testing rampart containers.
//!
//! - [`Element`] and [`ElementWithNonFailingMove`]: values that hit a fault point in
//!   every operation, count copies and transfers, and track their own liveness in a
//!   process-wide registry
//! - [`NoNewInstancesGuard`]: asserts a scope leaves the set of live instances unchanged
//! - [`OrderedElement`]: asserts destruction happens in reverse construction order
//! - [`ContainerSnapshot`]: records a container's observable state to check the strong
//!   guarantee after a failed operation
//!
//! The registry is shared by every thread of the process; tests that use instrumented
//! elements must not run concurrently (`#[serial]`).
//!
//! # Example
//!
//! ```rust
//! use rampart_fault::faulty_run;
//! use rampart_test_utils::{ContainerSnapshot, Element, NoNewInstancesGuard, filled_vec};
//! use rampart_vec::VecError;
//!
//! let _instances = NoNewInstancesGuard::new();
//!
//! faulty_run(|| {
//!     let mut vec = filled_vec::<false>(&[1, 2])?;
//!     let before = ContainerSnapshot::capture(&vec);
//!
//!     if let Err(err) = vec.push(Element::new(3)?) {
//!         before.assert_unchanged(&vec);
//!         return Err(err);
//!     }
//!
//!     Ok::<(), VecError>(())
//! })
//! .expect("enumeration failed");
//! ```

#![warn(missing_docs)]

mod error;
mod instrumented;
mod ordered;
mod registry;
mod snapshot;

#[cfg(test)]
mod tests;

use rampart_alloc::FaultInjectingAllocator;
use rampart_fault::FaultInjectionDisable;
use rampart_vec::{RampartVec, VecError};

pub use error::RegistryViolation;
pub use instrumented::{Element, ElementWithNonFailingMove, Instrumented};
pub use ordered::{OrderedElement, pending_ordered};
pub use registry::{NoNewInstancesGuard, copy_count, live_instances, move_count, reset_counters};
pub use snapshot::{ContainerSnapshot, Observe};

/// A vector drawing storage from the fault-injecting allocator.
pub type FaultyVec<T> = RampartVec<T, FaultInjectingAllocator>;

/// Builds a [`FaultyVec`] of instrumented elements with fault injection suppressed.
///
/// Capacity equals the number of values, so the next insertion reallocates.
pub fn filled_vec<const NOTHROW_TRANSFER: bool>(
    values: &[i32],
) -> Result<FaultyVec<Instrumented<NOTHROW_TRANSFER>>, VecError> {
    let _setup = FaultInjectionDisable::new();
    let mut vec = FaultyVec::new_in(FaultInjectingAllocator::new());

    vec.reserve(values.len())?;
    for value in values {
        vec.push(Instrumented::new(*value)?)?;
    }

    Ok(vec)
}
