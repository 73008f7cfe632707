// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-vec.

use rampart_alloc::AllocError;
use rampart_fault::InjectedFault;
use thiserror::Error;

/// Errors returned by fallible [`RampartVec`](crate::RampartVec) operations.
///
/// A strong operation that returns one of these left the container exactly as it was.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VecError {
    /// Storage could not be allocated.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),

    /// An element operation failed at a fault point.
    #[error("element operation failed: {0}")]
    Injected(#[from] InjectedFault),

    /// The requested capacity does not fit in memory.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The element type can neither be copied nor transferred infallibly.
    #[error("element type supports neither copying nor infallible transfer")]
    CopyUnsupported,
}

impl VecError {
    /// Returns `true` if the failure was produced by the fault schedule.
    pub fn is_injected(&self) -> bool {
        matches!(self, Self::Injected(_) | Self::Alloc(AllocError::Injected))
    }
}
