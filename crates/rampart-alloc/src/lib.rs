// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw storage allocation for rampart containers.
//!
//! Containers obtain their buffers through a [`RawAllocator`] type parameter instead of
//! calling the global allocator directly. [`SystemAllocator`] forwards to the global
//! allocator; [`FaultInjectingAllocator`] asks the fault schedule of the active
//! [`faulty_run()`](rampart_fault::faulty_run) before every request and fails on demand.
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//!
//! use rampart_alloc::{AllocError, FaultInjectingAllocator, RawAllocator};
//! use rampart_fault::faulty_run;
//!
//! let alloc = FaultInjectingAllocator::new();
//! let layout = Layout::array::<u64>(4).expect("layout");
//!
//! let report = faulty_run(|| {
//!     let block = alloc.allocate(layout)?;
//!     // SAFETY: `block` was returned by `alloc` for `layout`.
//!     unsafe { alloc.deallocate(block, layout) };
//!     Ok::<(), AllocError>(())
//! })
//! .expect("enumeration failed");
//!
//! assert_eq!(report.runs, 2);
//! ```
//!
//! # Accounting
//!
//! The interceptor counts the blocks it has handed out and not yet taken back, per
//! thread. [`live_allocations()`] reads the counter and [`AllocationBalance`] checks
//! that a scope releases everything it allocated.

#![warn(missing_docs)]

mod accounting;
mod error;
mod faulty;
mod system;
mod traits;

#[cfg(test)]
mod tests;

pub use accounting::{AllocationBalance, live_allocations};
pub use error::AllocError;
pub use faulty::FaultInjectingAllocator;
pub use system::SystemAllocator;
pub use traits::RawAllocator;
