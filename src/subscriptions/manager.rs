//! Listener registry for broadcasting state transitions.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

use super::types::{Listener, ListenerId, Unsubscribe};

/// Internal listener state.
struct Entry<S> {
    listener: Listener<S>,
    /// Cleared on removal so an in-flight broadcast skips this entry.
    active: AtomicBool,
}

struct Inner<S> {
    /// Active listeners, ordered by registration.
    listeners: RwLock<BTreeMap<ListenerId, Arc<Entry<S>>>>,
    /// Counter for generating listener IDs.
    next_id: AtomicU64,
}

impl<S> Inner<S> {
    fn remove(&self, id: ListenerId) -> bool {
        match self.listeners.write().remove(&id) {
            Some(entry) => {
                entry.active.store(false, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }
}

/// Manages listeners and broadcasts `(next, prev)` transitions to them.
///
/// Listeners run in registration order. No lock is held while a listener
/// runs, so listeners may register, remove, or trigger further broadcasts.
pub struct ListenerRegistry<S> {
    inner: Arc<Inner<S>>,
}

impl<S: 'static> ListenerRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: RwLock::new(BTreeMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register a listener.
    ///
    /// The returned handle removes the listener; it holds only a weak
    /// reference, so it stays harmless after the registry is gone.
    pub fn register(&self, listener: Listener<S>) -> (ListenerId, Unsubscribe) {
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let entry = Arc::new(Entry {
            listener,
            active: AtomicBool::new(true),
        });

        self.inner.listeners.write().insert(id, entry);
        trace!(listener = %id, "listener registered");

        let weak: Weak<Inner<S>> = Arc::downgrade(&self.inner);
        let handle = Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                if inner.remove(id) {
                    trace!(listener = %id, "listener removed");
                }
            }
        });

        (id, handle)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.inner.remove(id)
    }

    /// Whether a listener is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.listeners.read().contains_key(&id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every active listener with `(next, prev)`.
    ///
    /// Listeners registered during the pass are first called on the next
    /// broadcast. A panicking listener aborts the rest of the pass.
    pub fn broadcast(&self, next: &S, prev: &S) {
        let snapshot: Vec<(ListenerId, Arc<Entry<S>>)> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(id, entry)| (*id, Arc::clone(entry)))
            .collect();

        for (id, entry) in snapshot {
            if !entry.active.load(Ordering::SeqCst) {
                trace!(listener = %id, "skipping listener removed mid-broadcast");
                continue;
            }
            (entry.listener)(next, prev);
        }
    }
}

impl<S: 'static> Default for ListenerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
