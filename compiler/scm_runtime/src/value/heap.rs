//! Reference-counted storage for heap values.

// Rc is the implementation of Heap<T>; values never cross threads.
#![expect(clippy::disallowed_types, reason = "Rc is the implementation of Heap<T>")]

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared, immutable heap payload of a `Value`.
///
/// The constructor is private to the `value` module, so every allocation
/// goes through a `Value` factory method. Cloning shares the allocation;
/// `ptr_eq` is the identity used by `eqv?`.
#[repr(transparent)]
pub struct Heap<T>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// The payload, if this is the last handle to it.
    #[inline]
    pub(super) fn try_unwrap(this: Self) -> Result<T, Self> {
        Rc::try_unwrap(this.0).map_err(Heap)
    }

    /// True when both handles share one allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
