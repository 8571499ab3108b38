//! Selector subscriptions: listen to one slice of the state.

use std::sync::Arc;
use tracing::trace;

use super::types::{Detach, Subscribable, Unsubscribe};
use crate::identity::Identity;

/// Subscribe to a slice of `store`.
///
/// On every transition the store delivers, `selector` is applied to the
/// previous and then the next state. `subscription` is called with
/// `(next_slice, next_state, prev_state)` only when the two slices are not
/// the [same](Identity) value. Nothing is called at registration.
///
/// Whatever `subscription` returns is [detached](Detach), never awaited.
/// Panics from either closure are not caught and unwind through the store's
/// delivery.
///
/// The store's own [`Unsubscribe`] handle is returned as is.
///
/// # Example
///
/// ```
/// use slice_watch::{subscribe_with_selector, Store};
///
/// #[derive(Clone)]
/// struct Book {
///     title: String,
///     pages: u32,
/// }
///
/// let store = Store::new(Book { title: "Default".into(), pages: 10 });
///
/// let unsubscribe = subscribe_with_selector(
///     &store,
///     |book| book.title.clone(),
///     |title, _next, _prev| println!("title is now {title}"),
/// );
///
/// store.update(|book| Book { pages: 12, ..book.clone() }); // silent
/// store.update(|book| Book { title: "First".into(), ..book.clone() }); // prints
/// unsubscribe.unsubscribe();
/// ```
pub fn subscribe_with_selector<St, Sel, Slice, Sub, R>(
    store: &St,
    selector: Sel,
    subscription: Sub,
) -> Unsubscribe
where
    St: Subscribable + ?Sized,
    St::State: 'static,
    Sel: Fn(&St::State) -> Slice + Send + Sync + 'static,
    Slice: Identity + 'static,
    Sub: Fn(Slice, &St::State, &St::State) -> R + Send + Sync + 'static,
    R: Detach + 'static,
{
    store.subscribe(Arc::new(move |next: &St::State, prev: &St::State| {
        let prev_slice = selector(prev);
        let next_slice = selector(next);

        if prev_slice.same(&next_slice) {
            trace!(changed = false, "selected slice");
            return;
        }

        trace!(changed = true, "selected slice");
        subscription(next_slice, next, prev).detach();
    }))
}

/// Method form of [`subscribe_with_selector`] for any [`Subscribable`].
pub trait SelectorExt: Subscribable {
    fn subscribe_with_selector<Sel, Slice, Sub, R>(
        &self,
        selector: Sel,
        subscription: Sub,
    ) -> Unsubscribe
    where
        Self::State: 'static,
        Sel: Fn(&Self::State) -> Slice + Send + Sync + 'static,
        Slice: Identity + 'static,
        Sub: Fn(Slice, &Self::State, &Self::State) -> R + Send + Sync + 'static,
        R: Detach + 'static,
    {
        subscribe_with_selector(self, selector, subscription)
    }
}

impl<T: Subscribable + ?Sized> SelectorExt for T {}
