// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use log::trace;
use rampart_fault::should_inject_fault;

use crate::accounting;
use crate::error::AllocError;
use crate::system::SystemAllocator;
use crate::traits::RawAllocator;

/// Allocator that fails on the schedule of the active `faulty_run`.
///
/// Every [`allocate()`](RawAllocator::allocate) call is a fault point, zero-sized
/// requests included. Outside of `faulty_run`, or while a
/// [`FaultInjectionDisable`](rampart_fault::FaultInjectionDisable) guard is alive,
/// requests go straight to the inner allocator. Blocks are counted in the per-thread
/// accounting read by [`live_allocations()`](crate::live_allocations).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct FaultInjectingAllocator<A = SystemAllocator> {
    inner: A,
}

impl FaultInjectingAllocator {
    /// Creates an interceptor over the global allocator.
    pub fn new() -> Self {
        Self {
            inner: SystemAllocator,
        }
    }
}

impl<A: RawAllocator> FaultInjectingAllocator<A> {
    /// Creates an interceptor over `inner`.
    pub fn with_inner(inner: A) -> Self {
        Self { inner }
    }

    /// Returns the wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: RawAllocator> RawAllocator for FaultInjectingAllocator<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if should_inject_fault() {
            trace!(
                "failing allocation of {} bytes (align {})",
                layout.size(),
                layout.align()
            );
            return Err(AllocError::Injected);
        }

        let ptr = self.inner.allocate(layout)?;
        if layout.size() != 0 {
            accounting::record_allocate();
        }

        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            accounting::record_deallocate();
        }

        // SAFETY: caller guarantees `ptr` came from `allocate` with this `layout`, and
        // `allocate` hands out blocks of the inner allocator unchanged.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
