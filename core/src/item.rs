//! The todo item entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record.
///
/// `id` and `created_at` are fixed when the store creates the item; only
/// `title` and `done` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub(crate) fn new(id: i64, title: String) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at: Utc::now(),
        }
    }
}
