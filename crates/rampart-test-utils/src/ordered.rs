// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::RefCell;

use rampart_vec::Relocate;

thread_local! {
    static CONSTRUCTED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Element that must be destroyed in reverse order of construction.
///
/// Construction records the value on a per-thread stack; dropping pops the stack and
/// fails the test if the value on top is not its own.
///
/// # Example
///
/// ```rust
/// use rampart_test_utils::{OrderedElement, pending_ordered};
///
/// let first = OrderedElement::new(1);
/// let second = OrderedElement::new(2);
/// assert_eq!(pending_ordered(), 2);
///
/// drop(second);
/// drop(first);
/// assert_eq!(pending_ordered(), 0);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct OrderedElement {
    value: usize,
}

impl OrderedElement {
    /// Constructs an element and pushes `value` onto the construction stack.
    pub fn new(value: usize) -> Self {
        CONSTRUCTED.with(|stack| stack.borrow_mut().push(value));
        Self { value }
    }

    /// Returns the construction value.
    pub fn value(&self) -> usize {
        self.value
    }
}

impl Relocate for OrderedElement {
    const TRANSFER_IS_INFALLIBLE: bool = true;
}

impl Drop for OrderedElement {
    fn drop(&mut self) {
        let top = CONSTRUCTED
            .try_with(|stack| stack.borrow_mut().pop())
            .ok()
            .flatten();

        if std::thread::panicking() {
            return;
        }

        assert_eq!(
            top,
            Some(self.value),
            "elements must be destroyed in reverse order of construction"
        );
    }
}

/// Number of ordered elements constructed on this thread and not yet dropped.
pub fn pending_ordered() -> usize {
    CONSTRUCTED.with(|stack| stack.borrow().len())
}
