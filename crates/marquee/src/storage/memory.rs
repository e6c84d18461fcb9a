//! In-process key-value storage
//!
//! Nothing survives the process. Used for ephemeral sessions and tests.

use super::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Synchronous peek at a raw value
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key).filter(|v| !v.trim().is_empty()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set("themeMode", "true").await.unwrap();
        assert_eq!(store.get("themeMode").await.unwrap(), Some("true".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("likedMovies").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryStore::with_entries([("likedMovies", r#"["A"]"#)]);
        store.set("likedMovies", r#"["A","B"]"#).await.unwrap();
        assert_eq!(store.raw("likedMovies").as_deref(), Some(r#"["A","B"]"#));
    }

    #[tokio::test]
    async fn test_blank_value_reads_as_missing() {
        let store = MemoryStore::with_entries([("themeMode", "  \n")]);
        assert_eq!(store.get("themeMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryStore::with_entries([("themeMode", "false")]);
        store.remove("themeMode").await.unwrap();
        store.remove("themeMode").await.unwrap();
        assert!(store.is_empty());
    }
}
