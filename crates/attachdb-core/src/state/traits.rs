//! State store trait

use async_trait::async_trait;

/// Persisted key-value storage for string blobs
///
/// Implementations:
/// - `MemoryStateStore`: In-memory for testing
/// - `FileStateStore`: JSON file on disk
/// - Host adapters: an editor's global state exposed through a binding
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> StateResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn update(&self, key: &str, value: &str) -> StateResult<()>;

    /// Remove `key` entirely
    async fn remove(&self, key: &str) -> StateResult<()>;
}

/// Errors that can occur while reading or writing persisted state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("State error: {0}")]
    Other(String),
}

pub type StateResult<T> = Result<T, StateError>;
