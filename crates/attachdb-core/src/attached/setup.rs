//! Registry wiring from files and named stores

use std::path::PathBuf;
use std::sync::Arc;

use super::registry::AttachedAccountRegistry;
use super::SERVICE_NAME;
use crate::config::FileSettingsProvider;
use crate::error::AttachResult;
use crate::logging::file_logger as log;
use crate::logging::{ConsoleLogger, SharedLogger};
use crate::secrets::create_secret_store;
use crate::state::FileStateStore;

const MODULE: &str = "RegistrySetup";

/// How to build a file-backed registry
///
/// Unset paths fall back to the user-level defaults. An unset secret store
/// uses the `secret_store` setting.
#[derive(Clone, Default)]
pub struct RegistryOptions {
    pub settings_path: Option<PathBuf>,
    pub state_path: Option<PathBuf>,
    pub secret_store: Option<String>,
    pub logger: Option<SharedLogger>,
}

impl std::fmt::Debug for RegistryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryOptions")
            .field("settings_path", &self.settings_path)
            .field("state_path", &self.state_path)
            .field("secret_store", &self.secret_store)
            .finish_non_exhaustive()
    }
}

/// Build a registry backed by the settings file, the state file and a named secret store
///
/// Only the secret store choice is read here; the rest of the settings are
/// read by each operation.
pub fn open_registry(options: RegistryOptions) -> AttachResult<AttachedAccountRegistry> {
    let settings = match options.settings_path {
        Some(path) => FileSettingsProvider::new(path),
        None => FileSettingsProvider::user(),
    };
    let state = match options.state_path {
        Some(path) => FileStateStore::new(path),
        None => FileStateStore::user(),
    };

    let store_name = match options.secret_store {
        Some(name) => name,
        None => settings.reload()?.secret_store,
    };
    let secrets = create_secret_store(&store_name, SERVICE_NAME);
    match &secrets {
        Some(store) => log::info(
            MODULE,
            &format!("Using secret store '{}' (available: {})", store.name(), store.is_available()),
        ),
        None => log::warn(MODULE, &format!("No secret store for '{store_name}'; attaching is session-only")),
    }

    let logger = options.logger.unwrap_or_else(|| Arc::new(ConsoleLogger::new()));
    Ok(AttachedAccountRegistry::new(Arc::new(state), secrets, logger).with_settings(Arc::new(settings)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attached::AttachOutcome;
    use crate::logging::NoOpLogger;
    use crate::types::ApiKind;
    use tempfile::tempdir;

    fn options(dir: &std::path::Path, store: Option<&str>) -> RegistryOptions {
        RegistryOptions {
            settings_path: Some(dir.join("settings.yaml")),
            state_path: Some(dir.join("state.json")),
            secret_store: store.map(str::to_string),
            logger: Some(Arc::new(NoOpLogger::new())),
        }
    }

    #[tokio::test]
    async fn test_open_with_memory_store_persists_descriptors() {
        let dir = tempdir().unwrap();
        let registry = open_registry(options(dir.path(), Some("memory"))).unwrap();

        let outcome = registry
            .attach_new(ApiKind::Table, "AccountEndpoint=https://tbl.example/;AccountKey=k")
            .await
            .unwrap();
        assert_eq!(outcome, AttachOutcome::Attached);

        let content = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
        assert!(content.contains("tbl.example"));
        assert!(!content.contains("AccountKey"));
    }

    #[tokio::test]
    async fn test_secret_store_from_settings() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.yaml"), "secret_store: none\n").unwrap();

        let registry = open_registry(options(dir.path(), None)).unwrap();
        let outcome = registry
            .attach_new(ApiKind::DocumentDb, "AccountEndpoint=https://doc.example/;AccountKey=k")
            .await
            .unwrap();
        assert_eq!(outcome, AttachOutcome::SessionOnly);
        assert!(!dir.path().join("state.json").exists());
    }

    #[tokio::test]
    async fn test_emulator_port_from_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.yaml"), "emulator:\n  port: null\n").unwrap();

        let registry = open_registry(options(dir.path(), Some("memory"))).unwrap();
        assert_eq!(registry.attach_emulator(ApiKind::Graph).await.unwrap(), AttachOutcome::Skipped);
    }
}
