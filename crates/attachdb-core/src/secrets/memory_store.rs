//! In-memory secret store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{SecretStore, SecretStoreResult};

/// In-memory secret store for testing and ephemeral use
///
/// Fully read-write. Secrets are lost when the store is dropped, so a
/// registry backed by this store forgets connection strings on restart
/// even though descriptors may survive in persisted state.
///
/// # Example
///
/// ```
/// use attachdb_core::secrets::MemorySecretStore;
///
/// let store = MemorySecretStore::new();
/// store.store_sync("acct.example", "AccountEndpoint=https://acct.example/;AccountKey=k");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial values
    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    /// Clear all secrets from the store
    pub fn clear(&self) {
        self.secrets.write().clear();
    }

    /// Get the number of secrets in the store
    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a secret synchronously (useful for seeding)
    pub fn store_sync(&self, key: &str, value: &str) {
        self.secrets.write().insert(key.to_string(), value.to_string());
    }

    /// Get a secret synchronously
    pub fn get_sync(&self, key: &str) -> Option<String> {
        self.secrets.read().get(key).cloned()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> SecretStoreResult<Option<String>> {
        Ok(self.get_sync(key))
    }

    async fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        self.store_sync(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> SecretStoreResult<()> {
        self.secrets.write().remove(key);
        Ok(())
    }
}

impl Clone for MemorySecretStore {
    fn clone(&self) -> Self {
        Self {
            secrets: RwLock::new(self.secrets.read().clone()),
        }
    }
}
