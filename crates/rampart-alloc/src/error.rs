// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-alloc.

use rampart_fault::InjectedFault;
use thiserror::Error;

/// Errors returned by a [`RawAllocator`](crate::RawAllocator).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The underlying allocator could not provide the block.
    #[error("allocation of {size} bytes (align {align}) failed")]
    Exhausted {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment in bytes.
        align: usize,
    },

    /// The fault schedule failed this request.
    #[error("injected allocation failure")]
    Injected,
}

impl AllocError {
    /// Returns `true` if the failure was produced by the fault schedule.
    pub fn is_injected(&self) -> bool {
        matches!(self, Self::Injected)
    }
}

impl From<InjectedFault> for AllocError {
    fn from(_: InjectedFault) -> Self {
        Self::Injected
    }
}
