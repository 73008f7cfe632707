// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Deref, DerefMut, RangeBounds};
use core::ptr::{self, NonNull};

use rampart_alloc::{RawAllocator, SystemAllocator};

use crate::error::VecError;
use crate::relocate::Relocate;
use crate::staging::{Staging, drop_descending, release};

/// A growable contiguous array whose fallible operations leave it untouched on failure.
///
/// Storage comes from the allocator `A`. Every mutation that may fail (allocation or
/// element copy) builds its result aside and only commits once nothing can fail anymore.
///
/// | guarantee | operations |
/// |---|---|
/// | strong | `try_clone`, `assign_from`, `push*`, `insert*`, `reserve`, `shrink_to_fit`, `try_with_capacity*` |
/// | no-fail | `new*`, `transfer_from`, `pop`, `truncate`, `clear`, `erase*`, accessors, `Drop` |
///
/// Growth doubles to the next power of two above the current length, so `push` is
/// amortized O(1).
///
/// Growth and `reserve`/`shrink_to_fit` relocate the elements. Types whose
/// [`Relocate::TRANSFER_IS_INFALLIBLE`] is `true` move bitwise; the others are copied
/// with [`Relocate::try_copy`]. A type with a fallible transfer and no `try_copy`
/// therefore fails with [`VecError::CopyUnsupported`] on every relocation once it
/// holds an element: reserve its capacity up front.
///
/// # Example
///
/// ```rust
/// use rampart_vec::RampartVec;
///
/// let mut vec = RampartVec::new();
/// for i in 0..5u32 {
///     vec.push(i).expect("push");
/// }
///
/// assert_eq!(vec.as_slice(), [0, 1, 2, 3, 4]);
/// assert_eq!(vec.capacity(), 8);
///
/// let next = vec.erase_range(1..3);
/// assert_eq!(next, 1);
/// assert_eq!(vec.as_slice(), [0, 3, 4]);
/// ```
///
/// Copy-assigning a vector to itself is rejected by the borrow checker:
///
/// ```compile_fail
/// use rampart_vec::RampartVec;
///
/// let mut vec: RampartVec<u32> = RampartVec::new();
/// vec.assign_from(&vec).expect("assign");
/// ```
pub struct RampartVec<T, A: RawAllocator = SystemAllocator> {
    ptr: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned, like `Vec<T>`.
unsafe impl<T: Send, A: RawAllocator + Send> Send for RampartVec<T, A> {}

// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for RampartVec<T, A> {}

impl<T> RampartVec<T> {
    /// Creates an empty vector over the global allocator. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(SystemAllocator)
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, VecError> {
        Self::try_with_capacity_in(capacity, SystemAllocator)
    }
}

impl<T, A: RawAllocator> RampartVec<T, A> {
    /// Creates an empty vector drawing storage from `alloc`. Does not allocate.
    pub fn new_in(alloc: A) -> Self {
        Self {
            ptr: None,
            len: 0,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    ///
    /// A zero capacity does not allocate.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, VecError> {
        let mut vec = Self::new_in(alloc);
        if capacity == 0 {
            return Ok(vec);
        }

        let (ptr, _, cap) = Staging::<T, A>::allocate(capacity, &vec.alloc)?.into_raw();
        vec.ptr = Some(ptr);
        vec.cap = cap;

        Ok(vec)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a pointer to the first slot, or null when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.map_or(ptr::null(), |ptr| ptr.as_ptr().cast_const())
    }

    /// Returns a mutable pointer to the first slot, or null when nothing is allocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.ptr {
            // SAFETY: slots `[0, len)` are initialized.
            Some(ptr) => unsafe { core::slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.ptr {
            // SAFETY: slots `[0, len)` are initialized and uniquely borrowed.
            Some(ptr) => unsafe { core::slice::from_raw_parts_mut(ptr.as_ptr(), self.len) },
            None => &mut [],
        }
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably, or `None` if empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably, or `None` if empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Removes and returns the last element. Keeps the capacity.
    pub fn pop(&mut self) -> Option<T> {
        let base = self.ptr?;
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: the slot at the old `len - 1` was initialized and is now outside the
        // live range.
        Some(unsafe { base.as_ptr().add(self.len).read() })
    }

    /// Drops the elements at `new_len..`, highest index first. Keeps the capacity.
    ///
    /// Does nothing if `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let old_len = mem::replace(&mut self.len, new_len);

        // SAFETY: slots `[new_len, old_len)` were live and are now outside the live
        // range, so they are dropped exactly once.
        unsafe { drop_descending(self.as_mut_ptr(), new_len..old_len) };
    }

    /// Drops every element, highest index first. Keeps the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Removes the element at `index`, shifting the tail left.
    ///
    /// Returns the index of the element that followed the removed one, which equals
    /// `len()` when the last element was removed. Capacity and storage address are
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        assert!(
            index < self.len,
            "erase index (is {index}) should be < len (is {})",
            self.len
        );

        self.erase_range(index..=index)
    }

    /// Removes the elements in `range`, shifting the tail left.
    ///
    /// The removed elements are dropped highest index first; survivors keep their
    /// relative order. Returns the index of the element that followed the range, which
    /// equals `len()` when the range reached the end. Capacity and storage address are
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past `len()`.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };

        assert!(start <= end, "erase range starts at {start} but ends at {end}");
        assert!(
            end <= self.len,
            "erase range end (is {end}) should be <= len (is {})",
            self.len
        );

        if start == end {
            return start;
        }

        let old_len = mem::replace(&mut self.len, start);
        let base = self.as_mut_ptr();

        // SAFETY: `[start, end)` are live; the tail `[end, old_len)` moves into the hole
        // with an overlapping copy after the erased values are gone.
        unsafe {
            drop_descending(base, start..end);
            ptr::copy(base.add(end), base.add(start), old_len - end);
        }
        self.len = old_len - (end - start);

        start
    }

    /// Moves `other`'s buffer into `self`, dropping `self`'s previous elements.
    ///
    /// Performs no element operation. `other` is left empty with no storage.
    pub fn transfer_from(&mut self, other: &mut Self) {
        mem::swap(self, other);
        other.free();
    }

    /// Drops every element and releases the buffer.
    fn free(&mut self) {
        self.clear();

        if let Some(ptr) = self.ptr.take() {
            // SAFETY: the block came from `self.alloc` with `self.cap` slots and holds no
            // live value after `clear`.
            unsafe { release(&self.alloc, ptr, self.cap) };
        }
        self.cap = 0;
    }
}

impl<T: Relocate, A: RawAllocator> RampartVec<T, A> {
    /// Appends `value`.
    ///
    /// Amortized strong: when the vector is full, the reallocation and the append
    /// succeed or fail together. On failure `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), VecError> {
        self.place(self.len, value).map(|_| ())
    }

    /// Appends a copy of `value`.
    pub fn push_copy(&mut self, value: &T) -> Result<(), VecError> {
        let copy = value.try_copy()?;
        self.push(copy)
    }

    /// Appends a copy of the element at `index` of this vector.
    ///
    /// The copy is taken before any relocation, so the source is never read after it
    /// moved.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn push_from_within(&mut self, index: usize) -> Result<(), VecError> {
        let copy = self.as_slice()[index].try_copy()?;
        self.push(copy)
    }

    /// Inserts `value` at `index`, shifting the tail right.
    ///
    /// Strong. Returns a reference to the inserted element. On failure `value` is
    /// dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, VecError> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );

        self.place(index, value)
    }

    /// Inserts a copy of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_copy(&mut self, index: usize, value: &T) -> Result<&mut T, VecError> {
        let copy = value.try_copy()?;
        self.insert(index, copy)
    }

    /// Inserts a copy of the element at `src` of this vector at `index`.
    ///
    /// The copy is taken before the tail shifts, so `src` refers to the element as it
    /// was before the call.
    ///
    /// # Panics
    ///
    /// Panics if `src >= len()` or `index > len()`.
    pub fn insert_from_within(&mut self, index: usize, src: usize) -> Result<&mut T, VecError> {
        let copy = self.as_slice()[src].try_copy()?;
        self.insert(index, copy)
    }

    /// Ensures room for `capacity` elements in total, allocating exactly that many.
    ///
    /// Strong. Does nothing if `capacity <= capacity()`.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VecError> {
        if capacity <= self.cap {
            return Ok(());
        }

        self.reallocate(capacity)
    }

    /// Reduces the capacity to the length.
    ///
    /// Strong. An empty vector releases its buffer; a full one is left alone.
    pub fn shrink_to_fit(&mut self) -> Result<(), VecError> {
        if self.cap == self.len {
            return Ok(());
        }

        if self.len == 0 {
            self.free();
            return Ok(());
        }

        self.reallocate(self.len)
    }

    fn place(&mut self, index: usize, value: T) -> Result<&mut T, VecError> {
        debug_assert!(index <= self.len);

        if self.len == self.cap {
            self.grow_with(index, value)?;
        } else {
            let base = self.as_mut_ptr();

            // SAFETY: `len < cap`, so a buffer exists and has a free slot at `len`; the
            // tail shifts one slot right before `index` is overwritten.
            unsafe {
                let slot = base.add(index);
                ptr::copy(slot, slot.add(1), self.len - index);
                slot.write(value);
            }
            self.len += 1;
        }

        Ok(&mut self.as_mut_slice()[index])
    }

    /// Reallocates to the next power of two, placing `value` at `index`.
    #[cold]
    #[inline(never)]
    fn grow_with(&mut self, index: usize, value: T) -> Result<(), VecError> {
        let capacity = self
            .len
            .checked_add(1)
            .and_then(usize::checked_next_power_of_two)
            .ok_or(VecError::CapacityOverflow)?;

        let mut staging = Staging::allocate(capacity, &self.alloc)?;
        let old = self.as_slice();
        staging.relocate_from(&old[..index])?;
        staging.push(value);
        staging.relocate_from(&old[index..])?;

        let (ptr, len, cap) = staging.into_raw();
        self.install(ptr, len, cap);

        Ok(())
    }

    fn reallocate(&mut self, capacity: usize) -> Result<(), VecError> {
        debug_assert!(capacity >= self.len);

        let mut staging = Staging::allocate(capacity, &self.alloc)?;
        staging.relocate_from(self.as_slice())?;

        let (ptr, len, cap) = staging.into_raw();
        self.install(ptr, len, cap);

        Ok(())
    }

    /// Swaps in a complete buffer and disposes of the old one.
    fn install(&mut self, ptr: NonNull<T>, len: usize, cap: usize) {
        let old_len = mem::replace(&mut self.len, len);
        let old_cap = mem::replace(&mut self.cap, cap);

        if let Some(old) = self.ptr.replace(ptr) {
            if !T::TRANSFER_IS_INFALLIBLE {
                // SAFETY: the old elements were copied, the originals are still live.
                unsafe { drop_descending(old.as_ptr(), 0..old_len) };
            }

            // SAFETY: the old block came from `self.alloc` with `old_cap` slots; its
            // values were dropped or moved out bitwise.
            unsafe { release(&self.alloc, old, old_cap) };
        }
    }
}

impl<T: Relocate, A: RawAllocator + Clone> RampartVec<T, A> {
    /// Returns an independent copy with capacity equal to `len()`.
    ///
    /// Strong. If an element copy fails, the copies made so far are dropped and the new
    /// buffer released.
    pub fn try_clone(&self) -> Result<Self, VecError> {
        let mut copy = Self::new_in(self.alloc.clone());
        if self.len == 0 {
            return Ok(copy);
        }

        let mut staging = Staging::allocate(self.len, &copy.alloc)?;
        staging.copy_from(self.as_slice())?;

        let (ptr, len, cap) = staging.into_raw();
        copy.ptr = Some(ptr);
        copy.len = len;
        copy.cap = cap;

        Ok(copy)
    }

    /// Replaces the contents with a copy of `other`.
    ///
    /// Strong: the copy is complete before the old contents are dropped.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), VecError> {
        let mut copy = other.try_clone()?;
        mem::swap(self, &mut copy);

        Ok(())
    }
}

impl<T, A: RawAllocator> Drop for RampartVec<T, A> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<T, A: RawAllocator + Default> Default for RampartVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RawAllocator> Deref for RampartVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAllocator> DerefMut for RampartVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, A: RawAllocator> fmt::Debug for RampartVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U, A, B> PartialEq<RampartVec<U, B>> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: RawAllocator,
    B: RawAllocator,
{
    fn eq(&self, other: &RampartVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAllocator> Eq for RampartVec<T, A> {}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: RawAllocator,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a RampartVec<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a mut RampartVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
