//! System keychain secret store
//!
//! Uses the OS keychain for connection strings:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use async_trait::async_trait;
use keyring::Entry;
use once_cell::sync::OnceCell;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};
use crate::attached::SERVICE_NAME;
use crate::logging::file_logger as log;

const MODULE: &str = "KeychainSecretStore";

const AVAILABILITY_KEY: &str = "__attachdb_availability_check__";

/// Secret store backed by the system keychain
///
/// Entries are addressed by `(service, account id)`. keyring calls block,
/// so each operation runs on the blocking thread pool.
///
/// # Example
///
/// ```no_run
/// use attachdb_core::secrets::KeychainSecretStore;
///
/// // Namespaced under the attached-accounts service name
/// let store = KeychainSecretStore::new();
/// assert_eq!(store.service_name(), attachdb_core::SERVICE_NAME);
/// ```
#[derive(Debug, Clone)]
pub struct KeychainSecretStore {
    service_name: String,
    available: OnceCell<bool>,
}

impl KeychainSecretStore {
    /// Create a keychain store for the attached-accounts service
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Create a keychain store with a custom service name
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service_name: service.into(),
            available: OnceCell::new(),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(service: &str, key: &str) -> SecretStoreResult<Entry> {
        Entry::new(service, key).map_err(map_keyring_error)
    }

    async fn blocking<T, F>(&self, key: &str, op: F) -> SecretStoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&str, &str) -> SecretStoreResult<T> + Send + 'static,
    {
        let service = self.service_name.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || op(&service, &key))
            .await
            .map_err(|e| SecretStoreError::Other(format!("Keychain task failed: {}", e)))?
    }
}

impl Default for KeychainSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

fn map_keyring_error(err: keyring::Error) -> SecretStoreError {
    match err {
        keyring::Error::NoStorageAccess(e) => SecretStoreError::NotAvailable(e.to_string()),
        keyring::Error::NoEntry => SecretStoreError::NotFound("keychain entry".to_string()),
        other => SecretStoreError::Other(other.to_string()),
    }
}

/// Missing entry means the keychain is reachable; only access failures mean it is not
fn availability_from(result: keyring::Result<String>) -> bool {
    match result {
        Ok(_) | Err(keyring::Error::NoEntry) => true,
        Err(e) => {
            log::warn(MODULE, &format!("is_available() = false, error: {:?}", e));
            false
        }
    }
}

fn probe_availability(service: &str) -> bool {
    match Entry::new(service, AVAILABILITY_KEY) {
        Ok(entry) => availability_from(entry.get_password()),
        Err(e) => availability_from(Err(e)),
    }
}

#[async_trait]
impl SecretStore for KeychainSecretStore {
    fn name(&self) -> &str {
        "keychain"
    }

    /// Whether the keychain answers a read
    ///
    /// Creating an entry never talks to the keychain daemon, so a lookup of a
    /// sentinel key is made instead. The answer is cached for the life of the store.
    fn is_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| probe_availability(&self.service_name))
    }

    async fn get(&self, key: &str) -> SecretStoreResult<Option<String>> {
        self.blocking(key, |service, key| {
            log::debug(MODULE, &format!("get() key='{}', service='{}'", key, service));
            match Self::entry(service, key)?.get_password() {
                Ok(secret) => Ok(Some(secret)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => {
                    log::warn(MODULE, &format!("get() error: {:?}", e));
                    Err(map_keyring_error(e))
                }
            }
        })
        .await
    }

    async fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        let value = value.to_string();
        self.blocking(key, move |service, key| {
            log::info(MODULE, &format!("store() key='{}', service='{}'", key, service));
            Self::entry(service, key)?.set_password(&value).map_err(|e| {
                log::error(MODULE, &format!("set_password failed: {:?}", e));
                map_keyring_error(e)
            })?;

            // Read back through a fresh entry; some backends acknowledge writes they drop
            match Self::entry(service, key)?.get_password() {
                Ok(stored) if stored == value => Ok(()),
                Ok(_) => Err(SecretStoreError::Other(
                    "Keychain verification failed: value mismatch".to_string(),
                )),
                Err(e) => Err(SecretStoreError::Other(format!(
                    "Keychain verification failed: could not read back: {}",
                    e
                ))),
            }
        })
        .await
    }

    async fn delete(&self, key: &str) -> SecretStoreResult<()> {
        self.blocking(key, |service, key| {
            log::info(MODULE, &format!("delete() key='{}', service='{}'", key, service));
            match Self::entry(service, key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(map_keyring_error(e)),
            }
        })
        .await
    }
}
