// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_alloc::AllocError;
use rampart_fault::InjectedFault;

use super::DropRecorder;
use crate::{RampartVec, Relocate, VecError};

// =============================================================================
// Relocate impls
// =============================================================================

#[test]
fn test_primitives_transfer_infallibly() {
    assert!(<u8 as Relocate>::TRANSFER_IS_INFALLIBLE);
    assert!(<i64 as Relocate>::TRANSFER_IS_INFALLIBLE);
    assert!(<f64 as Relocate>::TRANSFER_IS_INFALLIBLE);
    assert!(<char as Relocate>::TRANSFER_IS_INFALLIBLE);
    assert!(<String as Relocate>::TRANSFER_IS_INFALLIBLE);
    assert!(<RampartVec<u32> as Relocate>::TRANSFER_IS_INFALLIBLE);

    assert_eq!(42u16.try_copy(), Ok(42));
    assert_eq!('x'.try_copy(), Ok('x'));
    assert_eq!(true.try_copy(), Ok(true));
}

#[test]
fn test_string_copy_is_independent() {
    let original = String::from("rampart");

    let mut copy = original.try_copy().expect("Failed to try_copy");
    copy.push('!');

    assert_eq!(original, "rampart");
    assert_eq!(copy, "rampart!");
}

#[test]
fn test_nested_vec_copy_is_deep() {
    let mut inner = RampartVec::new();
    inner.push(1u8).expect("Failed to push");

    let copy = inner.try_copy().expect("Failed to try_copy");

    assert_eq!(copy, inner);
    assert_ne!(copy.as_ptr(), inner.as_ptr());
}

// =============================================================================
// Transfer-only types
// =============================================================================

#[test]
fn test_transfer_only_cannot_copy() {
    let item = DropRecorder(1);

    assert!(matches!(item.try_copy(), Err(VecError::CopyUnsupported)));
}

#[test]
fn test_push_copy_of_transfer_only_is_rejected() {
    let mut vec = RampartVec::new();
    vec.push(DropRecorder(1)).expect("Failed to push");

    let result = vec.push_copy(&DropRecorder(2));

    assert!(matches!(result, Err(VecError::CopyUnsupported)));
    assert_eq!(vec.len(), 1);
    assert!(vec.try_clone().is_err());
}

#[derive(Debug, PartialEq)]
struct FallibleTransferOnly(u32);

impl Relocate for FallibleTransferOnly {
    const TRANSFER_IS_INFALLIBLE: bool = false;
}

#[test]
fn test_growth_of_fallible_transfer_only_is_rejected() {
    let mut vec = RampartVec::new();
    vec.push(FallibleTransferOnly(1))
        .expect("Failed to push into empty vector");
    let data = vec.as_ptr();

    let result = vec.push(FallibleTransferOnly(2));

    assert!(matches!(result, Err(VecError::CopyUnsupported)));
    assert_eq!(vec, [FallibleTransferOnly(1)]);
    assert_eq!(vec.capacity(), 1);
    assert_eq!(vec.as_ptr(), data);

    // Room reserved up front avoids relocation.
    let mut vec = RampartVec::try_with_capacity(2).expect("Failed to allocate");
    vec.push(FallibleTransferOnly(1)).expect("Failed to push");
    vec.push(FallibleTransferOnly(2)).expect("Failed to push");
    assert_eq!(vec.len(), 2);
}

// =============================================================================
// VecError
// =============================================================================

#[test]
fn test_vec_error_is_injected() {
    assert!(VecError::from(InjectedFault).is_injected());
    assert!(VecError::from(AllocError::Injected).is_injected());
    assert!(!VecError::CapacityOverflow.is_injected());
    assert!(!VecError::CopyUnsupported.is_injected());
    assert!(
        !VecError::from(AllocError::Exhausted {
            size: 8,
            align: 8
        })
        .is_injected()
    );
}

#[test]
fn test_vec_error_display() {
    assert_eq!(VecError::CapacityOverflow.to_string(), "capacity overflow");
    assert_eq!(
        VecError::from(AllocError::Injected).to_string(),
        "AllocError: injected allocation failure"
    );
}
