//! File-based state store (JSON)
//!
//! Default location: `<data_dir>/attachdb/state.json`
//! (`~/.local/share` on Linux, `~/Library/Application Support` on macOS).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{StateResult, StateStore};

type StateMap = BTreeMap<String, String>;

/// State store persisted as a single JSON object of string values
///
/// # Example
///
/// ```no_run
/// use attachdb_core::state::FileStateStore;
///
/// let state = FileStateStore::user();
/// println!("state file: {}", state.path().display());
/// ```
pub struct FileStateStore {
    path: PathBuf,
    cache: RwLock<Option<StateMap>>,
}

impl FileStateStore {
    /// Create a state store for a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create the user-level state store
    pub fn user() -> Self {
        Self::new(Self::default_path())
    }

    /// Default user-level state file path
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".local").join("share"));
        data_dir.join("attachdb").join("state.json")
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the state file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> StateResult<StateMap> {
        if !self.path.exists() {
            return Ok(StateMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StateMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, values: &StateMap) -> StateResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(values.clone());
        Ok(())
    }

    fn values(&self) -> StateResult<StateMap> {
        if let Some(values) = self.cache.read().as_ref() {
            return Ok(values.clone());
        }

        let values = self.load()?;
        *self.cache.write() = Some(values.clone());
        Ok(values)
    }

    /// Drop the cache and re-read the file
    pub fn reload(&self) -> StateResult<()> {
        let values = self.load()?;
        *self.cache.write() = Some(values);
        Ok(())
    }
}

impl std::fmt::Debug for FileStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStateStore")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    async fn update(&self, key: &str, value: &str) -> StateResult<()> {
        let mut values = self.values()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    async fn remove(&self, key: &str) -> StateResult<()> {
        let mut values = self.values()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_state_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = FileStateStore::new(&path);

        assert!(!store.exists());
        assert_eq!(store.get("accounts").await.unwrap(), None);

        store.update("accounts", r#"["a"]"#).await.unwrap();
        assert!(store.exists());

        // A fresh instance reads what the first wrote
        let reopened = FileStateStore::new(&path);
        assert_eq!(reopened.get("accounts").await.unwrap(), Some(r#"["a"]"#.to_string()));

        reopened.remove("accounts").await.unwrap();
        store.reload().unwrap();
        assert_eq!(store.get("accounts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_state_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"other":"kept"}"#).unwrap();

        let store = FileStateStore::new(&path);
        store.update("accounts", "[]").await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("kept"));
        assert!(content.contains("accounts"));
    }

    #[tokio::test]
    async fn test_file_state_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStateStore::new(&path);
        assert!(store.get("accounts").await.is_err());
    }
}
