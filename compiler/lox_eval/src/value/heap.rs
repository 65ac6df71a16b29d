//! Shared handle for immutable runtime objects.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::NativeCallable;

/// Reference-counted handle to a runtime object that never changes after
/// construction: strings, functions, classes, modules, natives.
///
/// Equality of `Value`s holding a `Heap` is decided by the caller; `Heap`
/// itself only offers identity via [`Heap::ptr_eq`].
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl Heap<dyn NativeCallable> {
    /// Box a native for storage in a `Value`.
    pub fn native(native: impl NativeCallable + 'static) -> Self {
        Heap(Rc::new(native))
    }
}

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
