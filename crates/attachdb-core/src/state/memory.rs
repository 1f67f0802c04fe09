//! In-memory state store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{StateResult, StateStore};

/// In-memory state store for testing
///
/// Share one instance (behind an `Arc`) between two registries to simulate
/// a restart: the second registry sees what the first persisted.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create a new empty state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state store seeded with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.values.write().insert(key.into(), value.into());
        store
    }

    /// Read a value synchronously (useful in assertions)
    pub fn get_sync(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    /// Clear all values
    pub fn clear(&self) {
        self.values.write().clear();
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.get_sync(key))
    }

    async fn update(&self, key: &str, value: &str) -> StateResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StateResult<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_state_store() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.update("k", "[]").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("[]".to_string()));

        store.update("k", r#"["a"]"#).await.unwrap();
        assert_eq!(store.get_sync("k"), Some(r#"["a"]"#.to_string()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[test]
    fn test_with_value() {
        let store = MemoryStateStore::with_value("k", "v");
        assert_eq!(store.get_sync("k"), Some("v".to_string()));
        store.clear();
        assert_eq!(store.get_sync("k"), None);
    }
}
