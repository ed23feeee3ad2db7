//! In-memory todo store.
//!
//! # Overview
//! Owns the collection of todo items and exposes list/get/create/update/delete
//! with safe concurrent access. The HTTP layer lives in `todo-server`; this
//! crate has no I/O and no async runtime dependency.
//!
//! # Design
//! - `Store` is a trait so the server can hold any implementation behind
//!   `Arc<dyn Store>`; `MemoryStore` is the one shipped here.
//! - Every read hands back an owned clone. No caller ever holds a reference
//!   into the store's map.
//! - The only failure is `StoreError::NotFound`.

pub mod error;
pub mod item;
pub mod store;

pub use error::StoreError;
pub use item::Item;
pub use store::{MemoryStore, Store};
