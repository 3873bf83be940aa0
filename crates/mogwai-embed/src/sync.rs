//! Synchronization primitives.
use std::{
    cell::RefCell,
    ops::{Deref, DerefMut},
    rc::Rc,
};

/// A "shared" value.
///
/// Equivalent to `Rc<RefCell<T>>`.
///
/// Bindings run on a single-threaded, cooperative executor. A guard returned
/// from [`Shared::get`] or [`Shared::get_mut`] must never be held across an
/// `.await`.
#[derive(Default)]
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Shared<T> {
    /// Create a new shared `T`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Get a reference to the inner `T`.
    pub fn get(&self) -> impl Deref<Target = T> + '_ {
        self.inner.borrow()
    }

    /// Get a mutable reference to the inner `T`.
    pub fn get_mut(&self) -> impl DerefMut<Target = T> + '_ {
        self.inner.borrow_mut()
    }

    /// Set the inner `T`.
    ///
    /// Returns the previous value.
    pub fn set(&self, value: T) -> T {
        let mut guard = self.inner.borrow_mut();
        std::mem::replace(guard.deref_mut(), value)
    }

    /// Returns whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clones_share_one_value() {
        let a = Shared::new(vec![0u32]);
        let b = a.clone();
        b.get_mut().push(1);
        assert_eq!(*a.get(), vec![0, 1]);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Shared::new(vec![0, 1])));

        let prev = a.set(vec![]);
        assert_eq!(prev, vec![0, 1]);
        assert!(b.get().is_empty());
    }
}
