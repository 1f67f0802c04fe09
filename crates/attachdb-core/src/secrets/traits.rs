//! Core trait and errors for secret storage

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during secret store operations
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Store not available: {0}")]
    NotAvailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Other(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for secret storage implementations
///
/// A store is bound to a single service name at construction; `key` is the
/// account id within that service.
///
/// Implementations can be:
/// - The OS keychain (`KeychainSecretStore`)
/// - In-memory for testing (`MemorySecretStore`)
/// - Host-provided stores (e.g. an editor's secret storage behind a binding)
///
/// # Example
///
/// ```rust,ignore
/// use attachdb_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::new();
/// store.store("acct.example", "AccountEndpoint=...").await?;
/// assert!(store.has("acct.example").await?);
/// ```
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Check if this store is available
    ///
    /// A keychain store is not available on a headless machine without a
    /// keychain daemon. Callers treat an unavailable store like no store.
    fn is_available(&self) -> bool {
        true
    }

    /// Retrieve a secret by key. A missing entry is `Ok(None)`.
    async fn get(&self, key: &str) -> SecretStoreResult<Option<String>>;

    /// Store a secret, replacing any existing value
    async fn store(&self, key: &str, value: &str) -> SecretStoreResult<()>;

    /// Delete a secret. Deleting a missing entry succeeds.
    async fn delete(&self, key: &str) -> SecretStoreResult<()>;

    /// Check if a secret exists
    async fn has(&self, key: &str) -> SecretStoreResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
