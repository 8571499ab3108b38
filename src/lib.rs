//! # Slice Watch
//!
//! Selector subscriptions over an observable state container: watch one
//! derived slice of the state and get called back only when that slice
//! changes.
//!
//! ## Core Concepts
//!
//! - **Store**: Holds one current state and broadcasts `(next, prev)` on
//!   every transition ([`Subscribable`], bundled [`Store`])
//! - **Selector**: Pure function from full state to a slice
//! - **Identity**: Slices compare by value for scalars and by pointer for
//!   shared references ([`Identity`]), never structurally
//! - **Unsubscribe**: The store's own handle, returned untouched
//!
//! ## Example
//!
//! ```
//! use slice_watch::{Store, SelectorExt};
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Author {
//!     first_name: String,
//! }
//!
//! #[derive(Clone)]
//! struct Book {
//!     title: String,
//!     author: Arc<Author>,
//! }
//!
//! let store = Store::new(Book {
//!     title: "Default".into(),
//!     author: Arc::new(Author { first_name: "John".into() }),
//! });
//!
//! let unsubscribe = store.subscribe_with_selector(
//!     |book| book.author.first_name.clone(),
//!     |first_name, _next, _prev| assert_eq!(first_name, "Jane"),
//! );
//!
//! // Title changes are ignored.
//! store.update(|book| Book { title: "First".into(), ..book.clone() });
//!
//! store.update(|book| Book {
//!     author: Arc::new(Author { first_name: "Jane".into() }),
//!     ..book.clone()
//! });
//!
//! unsubscribe.unsubscribe();
//! ```

pub mod error;
pub mod identity;
pub mod store;
pub mod subscriptions;

// Re-exports
pub use error::{Result, StoreError};
pub use identity::Identity;
pub use store::{Store, StoreConfig};
pub use subscriptions::{
    subscribe_with_selector, Detach, Listener, ListenerId, ListenerRegistry, SelectorExt,
    Subscribable, Unsubscribe,
};
