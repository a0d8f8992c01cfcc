use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use anyhow::Result;
use crate::errors::StorageError;
use crate::storage::area::StorageArea;

/// In‑memory local storage (no persistence).
///
/// An optional quota limits the total size of keys plus values, counted in UTF‑16 code units the
/// way browsers account for `localStorage`. Writes that would go over the quota fail with
/// [`StorageError::QuotaExceeded`] and leave the area untouched.
#[derive(Debug, Default)]
pub struct InMemoryLocalStore {
    map: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses writes once keys plus values would exceed `quota` units.
    ///
    /// A quota of zero behaves like storage that exists but is disabled.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            map: Mutex::default(),
            quota: Some(quota),
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn units(s: &str) -> usize {
    s.encode_utf16().count()
}

impl StorageArea for InMemoryLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.map();

        if let Some(quota) = self.quota {
            let used: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| units(k) + units(v))
                .sum();
            let needed = used + units(key) + units(value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota }.into());
            }
        }

        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.map().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.map().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.map().len()
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = self.map().keys().cloned().collect();
        v.sort_unstable();
        v
    }
}
