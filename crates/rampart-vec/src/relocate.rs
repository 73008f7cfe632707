// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_alloc::RawAllocator;

use crate::error::VecError;
use crate::rampart_vec::RampartVec;

/// How elements move between buffers when a [`RampartVec`] reallocates.
///
/// A type either declares that transferring ownership can never fail, in which case
/// elements are moved bitwise, or it implements [`try_copy()`](Self::try_copy), in which
/// case elements are copied into the new buffer and the old buffer stays valid until
/// every copy succeeded.
///
/// # Example
///
/// ```rust
/// use rampart_vec::{Relocate, RampartVec, VecError};
///
/// struct Handle(u32);
///
/// impl Relocate for Handle {
///     const TRANSFER_IS_INFALLIBLE: bool = true;
/// }
///
/// let mut handles = RampartVec::new();
/// handles.push(Handle(7)).expect("push");
/// assert_eq!(handles[0].0, 7);
///
/// // Transfer-only types cannot be copied.
/// assert_eq!(handles[0].try_copy().err(), Some(VecError::CopyUnsupported));
/// ```
pub trait Relocate: Sized {
    /// `true` if moving a value can never fail.
    ///
    /// Decides the relocation strategy at compile time.
    const TRANSFER_IS_INFALLIBLE: bool;

    /// Produces an independent copy of `self`.
    ///
    /// Required when `TRANSFER_IS_INFALLIBLE` is `false`; also used by
    /// [`RampartVec::push_copy()`] and [`RampartVec::try_clone()`].
    fn try_copy(&self) -> Result<Self, VecError> {
        Err(VecError::CopyUnsupported)
    }
}

macro_rules! impl_relocate_for_copy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Relocate for $ty {
                const TRANSFER_IS_INFALLIBLE: bool = true;

                #[inline]
                fn try_copy(&self) -> Result<Self, VecError> {
                    Ok(*self)
                }
            }
        )*
    };
}

impl_relocate_for_copy!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
);

impl Relocate for String {
    const TRANSFER_IS_INFALLIBLE: bool = true;

    fn try_copy(&self) -> Result<Self, VecError> {
        Ok(self.clone())
    }
}

impl<T, A> Relocate for RampartVec<T, A>
where
    T: Relocate,
    A: RawAllocator + Clone,
{
    const TRANSFER_IS_INFALLIBLE: bool = true;

    fn try_copy(&self) -> Result<Self, VecError> {
        self.try_clone()
    }
}
