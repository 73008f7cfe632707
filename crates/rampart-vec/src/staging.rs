// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Buffer under construction, released on every early return.

use core::alloc::Layout;
use core::mem::{self, ManuallyDrop};
use core::ops::Range;
use core::ptr::{self, NonNull};

use rampart_alloc::RawAllocator;

use crate::error::VecError;
use crate::relocate::Relocate;

#[inline]
pub(crate) fn array_layout<T>(capacity: usize) -> Result<Layout, VecError> {
    Layout::array::<T>(capacity).map_err(|_| VecError::CapacityOverflow)
}

/// Drops `base[range]`, highest index first.
///
/// # Safety
///
/// Every slot in `range` must hold an initialized value that is not used afterwards.
#[inline]
pub(crate) unsafe fn drop_descending<T>(base: *mut T, range: Range<usize>) {
    if !mem::needs_drop::<T>() {
        return;
    }

    for index in range.rev() {
        // SAFETY: caller guarantees the slot is initialized and dead afterwards.
        unsafe { ptr::drop_in_place(base.add(index)) };
    }
}

/// Returns a block of `capacity` slots to `alloc`.
///
/// # Safety
///
/// `ptr` must come from `alloc` with `array_layout::<T>(capacity)` and hold no live
/// values.
#[inline]
pub(crate) unsafe fn release<T, A: RawAllocator>(alloc: &A, ptr: NonNull<T>, capacity: usize) {
    if let Ok(layout) = Layout::array::<T>(capacity) {
        // SAFETY: same block and layout as the allocation, per the caller.
        unsafe { alloc.deallocate(ptr.cast(), layout) };
    }
}

/// A freshly allocated buffer being filled front to back.
///
/// Dropping it drops what it holds in descending order and frees the block, so a failed
/// copy halfway through leaves nothing behind. [`into_raw()`](Self::into_raw) hands the
/// block over once it is complete.
pub(crate) struct Staging<'a, T, A: RawAllocator> {
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    alloc: &'a A,
    // Bitwise-relocated elements are still owned by the source buffer.
    shares_source: bool,
}

impl<'a, T, A: RawAllocator> Staging<'a, T, A> {
    pub(crate) fn allocate(capacity: usize, alloc: &'a A) -> Result<Self, VecError> {
        let layout = array_layout::<T>(capacity)?;
        let ptr = alloc.allocate(layout)?.cast::<T>();

        Ok(Self {
            ptr,
            len: 0,
            capacity,
            alloc,
            shares_source: false,
        })
    }

    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);

        // SAFETY: `len < capacity`, the slot is uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Appends a copy of every element of `src`.
    pub(crate) fn copy_from(&mut self, src: &[T]) -> Result<(), VecError>
    where
        T: Relocate,
    {
        debug_assert!(self.len + src.len() <= self.capacity);

        for item in src {
            let copy = item.try_copy()?;
            self.push(copy);
        }

        Ok(())
    }

    /// Appends the elements of `src` using the type's relocation strategy.
    ///
    /// With an infallible transfer the values are moved bitwise: the caller must treat
    /// `src` as moved-from once the staging buffer is installed.
    pub(crate) fn relocate_from(&mut self, src: &[T]) -> Result<(), VecError>
    where
        T: Relocate,
    {
        if !T::TRANSFER_IS_INFALLIBLE {
            return self.copy_from(src);
        }

        debug_assert!(self.len + src.len() <= self.capacity);

        // SAFETY: `src` and the free tail of the new block do not overlap, the tail has
        // room for `src.len()` values.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.ptr.as_ptr().add(self.len), src.len());
        }
        self.len += src.len();
        self.shares_source = true;

        Ok(())
    }

    /// Releases ownership of the block: `(ptr, len, capacity)`.
    pub(crate) fn into_raw(self) -> (NonNull<T>, usize, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.len, this.capacity)
    }
}

impl<T, A: RawAllocator> Drop for Staging<'_, T, A> {
    fn drop(&mut self) {
        if !self.shares_source {
            // SAFETY: slots `[0, len)` were written by `push` and are owned here.
            unsafe { drop_descending(self.ptr.as_ptr(), 0..self.len) };
        }

        // SAFETY: the block came from `self.alloc` with this capacity.
        unsafe { release(self.alloc, self.ptr, self.capacity) };
    }
}
