//! Error type for store operations.

use thiserror::Error;

/// Errors returned by `Store` operations that address a single item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item with this ID is held by the store.
    #[error("todo {0} not found")]
    NotFound(i64),
}
