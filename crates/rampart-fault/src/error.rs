// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-fault.

use thiserror::Error;

/// Failure produced by the harness at a fault point.
#[derive(Debug, Error, Clone, Copy, Default, Eq, PartialEq)]
#[error("injected fault")]
pub struct InjectedFault;

/// Errors reported by [`faulty_run()`](crate::faulty_run).
#[derive(Debug, Error)]
pub enum FaultRunError<E> {
    /// Another `faulty_run` is already driving this thread.
    #[error("a faulty_run is already active on this thread")]
    Nested,

    /// The operation failed although no fault had been injected.
    #[error("operation failed without an injected fault: {0:?}")]
    Unexpected(E),

    /// The operation completed although a fault was injected during the run.
    ///
    /// Some code between the fault point and the closure absorbed the failure.
    #[error("run {run} completed although an injected fault was swallowed")]
    FaultSwallowed {
        /// 1-based number of the offending run.
        run: usize,
    },

    /// The configured run limit was reached before a clean run.
    #[error("fault enumeration exceeded {limit} runs")]
    RunLimitExceeded {
        /// The limit that was hit.
        limit: usize,
    },
}
