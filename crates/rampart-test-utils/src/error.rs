// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-test-utils.

use thiserror::Error;

/// A lifecycle defect detected by the instance registry.
///
/// Violations are never returned to the code under test: they fail the test.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum RegistryViolation {
    /// An instance was constructed over one that is still live.
    #[error("instance {id} is already registered")]
    AlreadyRegistered {
        /// Instance id.
        id: u64,
    },

    /// An instance was destroyed twice, or was never constructed.
    #[error("destroying instance {id} that is not registered")]
    NotRegistered {
        /// Instance id.
        id: u64,
    },

    /// A destroyed instance was accessed.
    #[error("accessing destroyed instance {id}")]
    Destroyed {
        /// Instance id.
        id: u64,
    },
}
