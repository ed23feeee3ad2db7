//! Concurrency-safe item storage.
//!
//! # Design
//! `MemoryStore` keeps the item map and the next-ID counter behind a single
//! `RwLock`. Reads share the lock; writes take it exclusively, so ID
//! allocation and insertion happen as one step and two creates can never see
//! the same counter value.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::item::Item;

/// CRUD access to a collection of todo items keyed by ID.
///
/// All methods take `&self` and are safe to call from many threads at once.
/// Returned items are independent copies of the stored state.
pub trait Store: Send + Sync {
    /// Snapshot of every item currently held, in no particular order.
    fn list(&self) -> Vec<Item>;

    fn get(&self, id: i64) -> Result<Item, StoreError>;

    /// Stores a new item under the next sequential ID. The caller is
    /// responsible for rejecting empty titles.
    fn create(&self, title: String) -> Item;

    /// Applies only the fields that are `Some`; `None` leaves the field as is.
    fn update(&self, id: i64, title: Option<String>, done: Option<bool>)
        -> Result<Item, StoreError>;

    fn delete(&self, id: i64) -> Result<(), StoreError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Inner {
    items: HashMap<i64, Item>,
    next_id: i64,
}

/// In-process `Store` backed by a `HashMap`. Data lives as long as the value.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    // Every mutation is a single insert, remove or field assignment, so a
    // poisoned lock never guards torn state.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn list(&self) -> Vec<Item> {
        self.read().items.values().cloned().collect()
    }

    fn get(&self, id: i64) -> Result<Item, StoreError> {
        self.read()
            .items
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, title: String) -> Item {
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let item = Item::new(id, title);
        inner.items.insert(id, item.clone());
        item
    }

    fn update(
        &self,
        id: i64,
        title: Option<String>,
        done: Option<bool>,
    ) -> Result<Item, StoreError> {
        let mut inner = self.write();
        let item = inner.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = title {
            item.title = title;
        }
        if let Some(done) = done {
            item.done = done;
        }
        Ok(item.clone())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.write()
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn len(&self) -> usize {
        self.read().items.len()
    }
}
