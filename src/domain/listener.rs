//! Listener handles.
//!
//! A [`Listener`] wraps a caller-supplied callback behind an `Arc` so that the
//! registry can hold it, copy it into an emit snapshot cheaply, and compare
//! it by reference identity on removal.

use std::fmt;
use std::sync::Arc;

/// Callback signature for listeners receiving a payload of type `A`.
pub type ListenerFn<A> = dyn Fn(&A) + Send + Sync;

/// Cloneable handle to a listener callback.
///
/// Equality is reference identity: clones of one handle are equal, while
/// wrapping the same closure twice yields two distinct listeners.
pub struct Listener<A> {
    callback: Arc<ListenerFn<A>>,
}

impl<A> Listener<A> {
    /// Wraps `callback` in a new listener handle.
    #[must_use]
    pub fn new(callback: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invokes the callback with `args`.
    pub fn call(&self, args: &A) {
        (self.callback)(args);
    }

    /// Returns `true` if both handles refer to the same callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
