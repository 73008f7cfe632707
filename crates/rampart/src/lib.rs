// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Failure-safe containers and exhaustive fault injection for Rust.</em></p>
//!
//! ---
//!
//! Rampart is a growable array whose every operation states what it leaves behind when
//! it fails, together with the harness that proves it: a driver that makes each
//! fallible step of an operation fail, one at a time, until none is left.
//!
//! # Features
//!
//! - **Strong guarantee**: a failed `push`, `insert`, `reserve`, `shrink_to_fit`,
//!   `try_clone` or `assign_from` leaves the vector exactly as it was, storage address included
//! - **No-fail operations**: `pop`, `clear`, `truncate`, `erase`, `erase_range`,
//!   `transfer_from` and `mem::take` never fail and never allocate
//! - **Relocation by contract**: element types declare whether transfers can fail;
//!   infallible ones relocate bitwise, the rest are copied so the original survives
//! - **Exhaustive fault injection**: `faulty_run` enumerates every fault point of an
//!   operation, including fault points reached while recovering from a fault
//! - **Allocation accounting**: a fault-injecting allocator and a leak check per thread
//!
//! # Quick Start
//!
//! ```rust
//! use rampart::alloc::FaultInjectingAllocator;
//! use rampart::fault::faulty_run;
//! use rampart::vec::{RampartVec, VecError};
//!
//! let report = faulty_run(|| {
//!     let mut vec = RampartVec::new_in(FaultInjectingAllocator::new());
//!     vec.push(1u32)?;
//!     vec.push(2u32)?;
//!
//!     assert_eq!(vec, [1, 2]);
//!     Ok::<(), VecError>(())
//! })?;
//!
//! // Two allocations could fail, plus the clean run.
//! assert_eq!(report.runs, 3);
//! # Ok::<(), rampart::fault::FaultRunError<VecError>>(())
//! ```
//!
//! # Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`fault`] | `rampart-fault` | `faulty_run`, fault points, suppression guards |
//! | [`alloc`] | `rampart-alloc` | `RawAllocator`, system and fault-injecting allocators |
//! | [`vec`] | `rampart-vec` | `RampartVec`, `Relocate` |
//! | `support::test_utils` | `rampart-test-utils` | instrumented elements (feature `test-utils`) |
//!
//! # Testing
//!
//! With the `test-utils` feature, instrumented elements check that containers never
//! leak, double-drop or read a destroyed element:
//!
//! ```rust,ignore
//! use rampart::support::test_utils::{ContainerSnapshot, Element, NoNewInstancesGuard, filled_vec};
//!
//! let _instances = NoNewInstancesGuard::new();
//! faulty_run(|| {
//!     let mut vec = filled_vec::<false>(&[1, 2, 3])?;
//!     let before = ContainerSnapshot::capture(&vec);
//!     if let Err(err) = vec.push(Element::new(4)?) {
//!         before.assert_unchanged(&vec);
//!         return Err(err);
//!     }
//!     Ok(())
//! })?;
//! ```
//!
//! # License
//!
//! GPL-3.0-only

pub mod support;

pub use rampart_alloc as alloc;
pub use rampart_fault as fault;
pub use rampart_vec as vec;
