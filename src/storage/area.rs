use anyhow::Result;
use std::sync::Arc;

/// Object-safe key/value storage area (DOM's Storage).
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Sets the value for the given key, overwriting any existing value.
    ///
    /// May fail, for instance when the area is over its quota or disabled.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the item with the given key.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Clears all items in the storage area.
    fn clear(&self) -> Result<()>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> usize;

    /// Returns a vector of all keys in the storage area.
    fn keys(&self) -> Vec<String>;

    /// Returns `true` when the area holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A shared handle to a storage area.
pub type StorageAreaHandle = Arc<dyn StorageArea>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryLocalStore, InMemorySessionStore};

    fn set(area: &StorageAreaHandle, k: &str, v: &str) {
        area.set_item(k, v).unwrap();
    }

    fn check_contract(area: StorageAreaHandle) {
        // starts empty
        assert_eq!(area.len(), 0);
        assert!(area.is_empty());
        assert!(area.get_item("missing").is_none());

        // set + get
        set(&area, "a", "1");
        set(&area, "b", "2");
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").as_deref(), Some("1"));
        assert_eq!(area.get_item("b").as_deref(), Some("2"));

        // overwrite keeps len()
        set(&area, "a", "ONE");
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("a").as_deref(), Some("ONE"));

        // remove, also of a key that is not there
        area.remove_item("b").unwrap();
        area.remove_item("never-set").unwrap();
        assert_eq!(area.len(), 1);
        assert!(area.get_item("b").is_none());

        // clear
        area.clear().unwrap();
        assert_eq!(area.len(), 0);
        assert!(area.keys().is_empty());
    }

    #[test]
    fn local_store_honours_contract() {
        check_contract(Arc::new(InMemoryLocalStore::new()));
    }

    #[test]
    fn session_store_honours_contract() {
        check_contract(Arc::new(InMemorySessionStore::new()));
    }
}
