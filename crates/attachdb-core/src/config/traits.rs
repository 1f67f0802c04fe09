//! Settings provider trait

use async_trait::async_trait;

use super::settings::Settings;

/// Settings provider abstraction
///
/// Implementations:
/// - `MemorySettingsProvider`: In-memory for testing
/// - `FileSettingsProvider`: Reads from YAML file (~/.config/attachdb/settings.yaml)
/// - Host adapters: an editor's workspace configuration exposed through a binding
///
/// Settings are read at the moment they are needed, so edits take effect on
/// the next operation without rebuilding the registry.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings
    async fn settings(&self) -> ConfigResult<Settings>;

    /// Replace the settings
    async fn update(&self, settings: Settings) -> ConfigResult<()>;
}

/// Errors that can occur during settings operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
