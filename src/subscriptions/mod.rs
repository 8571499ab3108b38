//! Subscription system for state transitions.
//!
//! This module provides:
//! - The [`Subscribable`] capability every observable store implements
//! - A [`ListenerRegistry`] stores can use to broadcast `(next, prev)`
//! - [`subscribe_with_selector`], which narrows a whole-state subscription
//!   down to one slice and only reports when that slice changes
//!
//! # Example
//!
//! ```ignore
//! let unsubscribe = store.subscribe_with_selector(
//!     |book| Arc::clone(&book.author),
//!     |author, next, prev| println!("author changed: {}", author.first_name),
//! );
//!
//! // Later
//! unsubscribe.unsubscribe();
//! ```

mod manager;
mod selector;
mod types;

pub use manager::ListenerRegistry;
pub use selector::{subscribe_with_selector, SelectorExt};
pub use types::{Detach, Listener, ListenerId, Subscribable, Unsubscribe};
