use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use anyhow::Result;

use crate::storage::area::StorageArea;

// In memory storage. Clones share the same data, the way every script in one browsing session
// sees the same sessionStorage.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every item, as happens when the browsing session ends.
    pub fn end_session(&self) {
        self.data.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl StorageArea for InMemorySessionStore {
    fn get_item(&self, k: &str) -> Option<String> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
            .get(k)
            .cloned()
    }

    fn set_item(&self, k: &str, v: &str) -> Result<()> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
            .insert(k.to_string(), v.to_string());
        Ok(())
    }

    fn remove_item(&self, k: &str) -> Result<()> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
            .remove(k);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn keys(&self) -> Vec<String> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
