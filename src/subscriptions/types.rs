//! Subscription types shared by stores and selector subscriptions.

use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Listener invoked with `(next_state, prev_state)` for every committed
/// transition.
pub type Listener<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

/// Capability of an observable state container.
///
/// Implementors must call every registered listener synchronously for each
/// committed transition, in commit order, passing the full next and previous
/// state. The returned [`Unsubscribe`] must stop further calls and must be
/// safe to call more than once.
pub trait Subscribable {
    /// The full state value handed to listeners.
    type State;

    /// Register a listener for whole-state transitions.
    fn subscribe(&self, listener: Listener<Self::State>) -> Unsubscribe;
}

impl<T: Subscribable + ?Sized> Subscribable for Arc<T> {
    type State = T::State;

    fn subscribe(&self, listener: Listener<Self::State>) -> Unsubscribe {
        (**self).subscribe(listener)
    }
}

/// Unique identifier for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle that stops delivery to a listener when called.
///
/// The handle carries no state of its own; calling it twice does whatever
/// the store's removal does twice. Dropping the handle does *not*
/// unsubscribe.
#[derive(Clone)]
pub struct Unsubscribe {
    inner: Arc<dyn Fn() + Send + Sync>,
}

impl Unsubscribe {
    /// Wrap a store-specific removal function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Stop delivery for this registration.
    pub fn unsubscribe(&self) {
        (self.inner)()
    }

    /// Whether two handles are the same handle (clones share identity).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").finish_non_exhaustive()
    }
}

/// Return value of a subscription callback.
///
/// The callback may hand back a deferred unit of work. It is released here
/// and never waited on.
///
/// A callback whose body only diverges (`panic!`, `todo!`) has no return
/// type to infer, so spell it out: `|_, _, _| -> () { todo!() }`.
pub trait Detach {
    fn detach(self);
}

impl Detach for () {
    #[inline]
    fn detach(self) {}
}

/// Dropping a `JoinHandle` detaches the thread.
impl<T> Detach for JoinHandle<T> {
    #[inline]
    fn detach(self) {
        drop(self);
    }
}

impl<D: Detach> Detach for Option<D> {
    #[inline]
    fn detach(self) {
        if let Some(inner) = self {
            inner.detach();
        }
    }
}
