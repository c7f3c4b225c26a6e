//! In-memory item storage.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::items::model::Item;

/// Append-only, insertion-ordered collection of items.
///
/// Cloning is cheap and every clone sees the same items. State lives only
/// as long as the process; separate processes each hold their own store.
#[derive(Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Vec<Item>>>,
}

impl ItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.read().clone()
    }

    /// Add one validated item to the end of the collection.
    pub fn append(&self, item: Item) {
        self.write().push(item);
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-written
    // (push either happens or not), so poisoned guards are safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
