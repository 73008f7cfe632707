// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable array with strong failure-safety guarantees.
//!
//! [`RampartVec`] is a contiguous, growable array in the spirit of `Vec<T>` whose
//! fallible operations (anything that allocates or copies elements) return a
//! [`VecError`] instead of aborting, and leave the vector exactly as it was when they
//! do.
//!
//! # Core Guarantees
//!
//! - **Strong**: `try_clone`, `assign_from`, `push*`, `insert*`, `reserve` and
//!   `shrink_to_fit` either complete or change nothing observable
//! - **No-fail**: transfers, `pop`, `truncate`, `clear`, `erase*` and `Drop` never fail
//! - **Ordered destruction**: elements are dropped highest index first
//!
//! Relocation during growth is chosen per element type through [`Relocate`]: types
//! whose transfer cannot fail are moved bitwise, all others are copied so the old
//! buffer survives a failed copy.
//!
//! # Example: Proving the Strong Guarantee
//!
//! ```rust
//! use rampart_alloc::FaultInjectingAllocator;
//! use rampart_fault::{FaultInjectionDisable, faulty_run};
//! use rampart_vec::{RampartVec, VecError};
//!
//! let report = faulty_run(|| {
//!     let mut vec = RampartVec::new_in(FaultInjectingAllocator::new());
//!     {
//!         let _setup = FaultInjectionDisable::new();
//!         vec.push(1u64)?;
//!     }
//!
//!     let before = vec.as_ptr();
//!     if let Err(err) = vec.push(2) {
//!         // The failed push did not touch the vector.
//!         assert_eq!(vec.as_slice(), [1]);
//!         assert_eq!(vec.capacity(), 1);
//!         assert_eq!(vec.as_ptr(), before);
//!         return Err(err);
//!     }
//!
//!     assert_eq!(vec.as_slice(), [1, 2]);
//!     Ok::<(), VecError>(())
//! })
//! .expect("enumeration failed");
//!
//! // One failing allocation, then the clean run.
//! assert_eq!(report.runs, 2);
//! ```

#![warn(missing_docs)]

mod error;
mod rampart_vec;
mod relocate;
mod staging;

#[cfg(test)]
mod tests;

pub use error::VecError;
pub use rampart_vec::RampartVec;
pub use relocate::Relocate;
