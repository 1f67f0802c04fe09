//! File-based settings provider (YAML)
//!
//! User-level settings live at `~/.config/attachdb/settings.yaml`.
//! A missing file means default settings.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::settings::Settings;
use super::traits::{ConfigResult, SettingsProvider};

/// File-based settings provider
///
/// Reads and writes settings from a YAML file, caching the parsed value.
///
/// # Example
///
/// ```no_run
/// use attachdb_core::config::FileSettingsProvider;
///
/// let settings = FileSettingsProvider::user();
/// println!("settings file: {}", settings.path().display());
/// ```
pub struct FileSettingsProvider {
    path: PathBuf,
    cache: RwLock<Option<Settings>>,
}

impl FileSettingsProvider {
    /// Create a settings provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Create the user-level settings provider (~/.config/attachdb/settings.yaml)
    pub fn user() -> Self {
        Self::new(Self::default_path())
    }

    /// Default user-level settings path
    pub fn default_path() -> PathBuf {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("attachdb").join("settings.yaml")
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the settings file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, settings: &Settings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(settings.clone());
        Ok(())
    }

    fn cached(&self) -> ConfigResult<Settings> {
        if let Some(settings) = self.cache.read().as_ref() {
            return Ok(settings.clone());
        }

        let settings = self.load()?;
        *self.cache.write() = Some(settings.clone());
        Ok(settings)
    }

    /// Reload settings from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<Settings> {
        let settings = self.load()?;
        *self.cache.write() = Some(settings.clone());
        Ok(settings)
    }
}

impl std::fmt::Debug for FileSettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSettingsProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl SettingsProvider for FileSettingsProvider {
    async fn settings(&self) -> ConfigResult<Settings> {
        self.cached()
    }

    async fn update(&self, settings: Settings) -> ConfigResult<()> {
        self.save(&settings)
    }
}
