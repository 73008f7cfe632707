// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Exhaustive single-fault enumeration.
//!
//! Code under test marks the places where it may fail with [`fault_point()`] (or asks
//! [`should_inject_fault()`] directly, as the allocation interceptor does). A test then
//! drives an operation through [`faulty_run()`], which re-runs it once per reachable
//! fault point, injecting exactly one failure per run, until a run completes cleanly.
//!
//! # Core Guarantees
//!
//! - **Exhaustive**: every fault point reached by the operation fails exactly once
//! - **Terminating**: the last run is the one where no fault was injected
//! - **Thread-local**: the schedule and the suppression flags never leak between threads
//!
//! # Example
//!
//! ```rust
//! use rampart_fault::{InjectedFault, fault_point, faulty_run};
//!
//! fn two_step() -> Result<u32, InjectedFault> {
//!     fault_point()?;
//!     fault_point()?;
//!     Ok(42)
//! }
//!
//! let report = faulty_run(|| two_step().map(|_| ())).expect("enumeration failed");
//!
//! // One run per fault point, plus the clean run.
//! assert_eq!(report.runs, 3);
//! assert_eq!(report.faults_injected, 2);
//! ```
//!
//! # Suppression
//!
//! Setup code that must not fail holds a [`FaultInjectionDisable`] guard; the previous
//! state is restored when the guard drops, on every exit path.
//!
//! ```rust
//! use rampart_fault::{FaultInjectionDisable, fault_point, faulty_run};
//!
//! let report = faulty_run(|| {
//!     let setup = FaultInjectionDisable::new();
//!     fault_point()?; // never fails while `setup` is alive
//!     setup.reset();
//!
//!     fault_point()
//! })
//! .expect("enumeration failed");
//!
//! assert_eq!(report.runs, 2);
//! ```

#![warn(missing_docs)]

mod context;
mod engine;
mod error;
mod guards;

#[cfg(test)]
mod tests;

pub use context::FaultContext;
pub use engine::{
    FaultRunConfig, FaultRunReport, fault_point, faulty_run, faulty_run_with, is_run_active,
    should_inject_fault,
};
pub use error::{FaultRunError, InjectedFault};
pub use guards::{
    FaultInjectionDisable, MoveFaultDisable, is_fault_injection_disabled, move_faults_disabled,
};
