//! In-memory settings provider

use async_trait::async_trait;
use parking_lot::RwLock;

use super::settings::Settings;
use super::traits::{ConfigResult, SettingsProvider};

/// In-memory settings provider for testing
#[derive(Debug, Default)]
pub struct MemorySettingsProvider {
    settings: RwLock<Settings>,
}

impl MemorySettingsProvider {
    /// Create a provider with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with specific settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Edit the settings in place
    pub fn modify(&self, f: impl FnOnce(&mut Settings)) {
        f(&mut *self.settings.write());
    }
}

#[async_trait]
impl SettingsProvider for MemorySettingsProvider {
    async fn settings(&self) -> ConfigResult<Settings> {
        Ok(self.settings.read().clone())
    }

    async fn update(&self, settings: Settings) -> ConfigResult<()> {
        *self.settings.write() = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_settings_provider() {
        let provider = MemorySettingsProvider::new();
        assert_eq!(provider.settings().await.unwrap(), Settings::default());

        provider.modify(|s| s.emulator.port = None);
        assert_eq!(provider.settings().await.unwrap().emulator.port, None);

        let mut replaced = Settings::default();
        replaced.secret_store = "memory".to_string();
        provider.update(replaced).await.unwrap();
        assert_eq!(provider.settings().await.unwrap().secret_store, "memory");
    }
}
