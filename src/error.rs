//! Error types for the state store.

use thiserror::Error;

/// Main error type for store operations.
///
/// Selector subscriptions never produce errors of their own. A panic in a
/// selector or callback unwinds through the committing call instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Update rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Shorthand for rejecting an update from inside `try_update`.
    pub fn rejected(reason: impl Into<String>) -> Self {
        StoreError::Rejected(reason.into())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
