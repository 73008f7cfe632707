// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::traits::RawAllocator;

/// Forwards to the global allocator.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct SystemAllocator;

impl RawAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let exhausted = AllocError::Exhausted {
            size: layout.size(),
            align: layout.align(),
        };

        if layout.size() == 0 {
            return NonNull::new(ptr::without_provenance_mut(layout.align())).ok_or(exhausted);
        }

        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { std::alloc::alloc(layout) };
        NonNull::new(raw).ok_or(exhausted)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: caller guarantees `ptr` came from `allocate` with this `layout`.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
