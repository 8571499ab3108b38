//! In-memory observable state container.

use crate::error::Result;
use crate::subscriptions::{Listener, ListenerRegistry, Subscribable, Unsubscribe};
use parking_lot::{ReentrantMutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Name used in log fields.
    pub name: String,

    /// Treat an update that returns the current `Arc` as a no-op: nothing is
    /// committed and no listener runs.
    /// Default: true
    pub skip_identical: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            skip_identical: true,
        }
    }
}

/// A single current state value plus the listeners watching it.
///
/// Each transition replaces the state wholesale with a new `Arc<S>`. Unchanged
/// parts can be shared between versions by keeping them behind their own
/// `Arc`, which is what lets selector subscriptions tell them apart by
/// identity.
///
/// Commits are serialized: the new state is stored first, then listeners are
/// called synchronously with `(next, prev)` before the commit returns. A
/// listener may commit again from the same thread; that nested transition is
/// delivered in full before the outer pass continues.
pub struct Store<S> {
    /// Store configuration.
    config: StoreConfig,

    /// Current state.
    state: RwLock<Arc<S>>,

    /// State the store was created with.
    initial: Arc<S>,

    /// Whole-state listeners.
    listeners: ListenerRegistry<Arc<S>>,

    /// Held across commit and delivery so transitions reach listeners in
    /// commit order. Reentrant for nested commits from listeners.
    commit_lock: ReentrantMutex<()>,
}

impl<S: Send + Sync + 'static> Store<S> {
    /// Create a store with default configuration.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    /// Create a store with custom configuration.
    pub fn with_config(initial: S, config: StoreConfig) -> Self {
        let initial = Arc::new(initial);
        debug!(store = %config.name, "store created");

        Self {
            config,
            state: RwLock::new(Arc::clone(&initial)),
            initial,
            listeners: ListenerRegistry::new(),
            commit_lock: ReentrantMutex::new(()),
        }
    }

    /// Current state.
    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&self.state.read())
    }

    /// The state this store was created with.
    pub fn get_initial_state(&self) -> Arc<S> {
        Arc::clone(&self.initial)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Transitions ---

    /// Replace the state with `next`.
    pub fn set_state(&self, next: S) {
        self.replace(move |_| Arc::new(next));
    }

    /// Derive the next state from the current one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.replace(move |prev| Arc::new(f(prev)));
    }

    /// Derive the next state as an `Arc`.
    ///
    /// Returning the current `Arc` is not a transition unless
    /// [`StoreConfig::skip_identical`] is off.
    pub fn replace<F>(&self, f: F)
    where
        F: FnOnce(&Arc<S>) -> Arc<S>,
    {
        let _guard = self.commit_lock.lock();
        let prev = self.get_state();
        let next = f(&prev);
        self.commit(next, prev);
    }

    /// Derive the next state, or leave the state untouched if `f` fails.
    pub fn try_update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&S) -> Result<S>,
    {
        let _guard = self.commit_lock.lock();
        let prev = self.get_state();

        let next = match f(&prev) {
            Ok(next) => next,
            Err(e) => {
                debug!(store = %self.config.name, error = %e, "update rejected");
                return Err(e);
            }
        };

        self.commit(Arc::new(next), prev);
        Ok(())
    }

    /// Store `next` and deliver the transition. Caller holds `commit_lock`.
    fn commit(&self, next: Arc<S>, prev: Arc<S>) {
        if self.config.skip_identical && Arc::ptr_eq(&next, &prev) {
            trace!(store = %self.config.name, "identical state, nothing to commit");
            return;
        }

        *self.state.write() = Arc::clone(&next);

        trace!(
            store = %self.config.name,
            listeners = self.listeners.len(),
            "state committed"
        );
        self.listeners.broadcast(&next, &prev);
    }
}

impl<S: Send + Sync + 'static> Subscribable for Store<S> {
    type State = Arc<S>;

    fn subscribe(&self, listener: Listener<Arc<S>>) -> Unsubscribe {
        let (id, handle) = self.listeners.register(listener);
        debug!(store = %self.config.name, listener = %id, "subscribed");
        handle
    }
}

impl<S: Default + Send + Sync + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
