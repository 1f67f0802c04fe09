//! Secret store registry for creating stores by name
//!
//! Settings name the backend (`secret_store: keychain`); the registry maps
//! that name to a factory bound to a service name.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::keychain_store::KeychainSecretStore;
use super::memory_store::MemorySecretStore;
use super::traits::SecretStore;

/// Store name meaning "run without a secret store"
pub const NO_SECRET_STORE: &str = "none";

/// Factory function type for creating secret stores for a service
pub type StoreFactory = Box<dyn Fn(&str) -> Arc<dyn SecretStore> + Send + Sync>;

/// Definition of a registered secret store
pub struct StoreDefinition {
    /// Unique name for this store
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StoreFactory,
}

impl std::fmt::Debug for StoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

static REGISTRY: Lazy<RwLock<HashMap<String, StoreDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "keychain".to_string(),
        StoreDefinition {
            name: "keychain".to_string(),
            description: "System keychain (macOS Keychain, Windows Credential Manager, Linux Secret Service)".to_string(),
            factory: Box::new(|service| Arc::new(KeychainSecretStore::with_service(service))),
        },
    );

    map.insert(
        "memory".to_string(),
        StoreDefinition {
            name: "memory".to_string(),
            description: "In-memory storage, forgotten on exit".to_string(),
            factory: Box::new(|_| Arc::new(MemorySecretStore::new())),
        },
    );

    RwLock::new(map)
});

/// Register a new secret store type, replacing any store of the same name
pub fn register_secret_store(name: &str, description: &str, factory: StoreFactory) {
    REGISTRY.write().insert(
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a secret store by name for the given service
///
/// Returns `None` for [`NO_SECRET_STORE`] and for unregistered names.
///
/// # Example
///
/// ```
/// use attachdb_core::secrets::create_secret_store;
///
/// let store = create_secret_store("memory", "attachdb.test").expect("memory store should exist");
/// assert_eq!(store.name(), "memory");
/// assert!(create_secret_store("none", "attachdb.test").is_none());
/// ```
pub fn create_secret_store(name: &str, service: &str) -> Option<Arc<dyn SecretStore>> {
    if name == NO_SECRET_STORE {
        return None;
    }
    REGISTRY.read().get(name).map(|def| (def.factory)(service))
}

/// List all registered secret stores as `(name, description)` pairs
pub fn list_secret_stores() -> Vec<(String, String)> {
    let mut stores: Vec<_> = REGISTRY
        .read()
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    stores.sort();
    stores
}

/// Check if a store is registered
pub fn has_secret_store(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Unregister a secret store (mainly for testing)
pub fn unregister_secret_store(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stores_registered() {
        assert!(has_secret_store("keychain"));
        assert!(has_secret_store("memory"));
        assert!(!has_secret_store(NO_SECRET_STORE));
    }

    #[test]
    fn test_create_memory_store() {
        let store = create_secret_store("memory", "svc").unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[test]
    fn test_create_none_and_unknown() {
        assert!(create_secret_store(NO_SECRET_STORE, "svc").is_none());
        assert!(create_secret_store("nonexistent_xyz", "svc").is_none());
    }

    #[test]
    fn test_list_stores_sorted() {
        let names: Vec<_> = list_secret_stores().into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&"keychain".to_string()));
        assert!(names.contains(&"memory".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_register_custom_store() {
        register_secret_store(
            "test_custom_store",
            "A test store",
            Box::new(|_| Arc::new(MemorySecretStore::new())),
        );

        assert!(has_secret_store("test_custom_store"));
        let store = create_secret_store("test_custom_store", "svc").unwrap();
        assert_eq!(store.name(), "memory");

        assert!(unregister_secret_store("test_custom_store"));
        assert!(!has_secret_store("test_custom_store"));
    }
}
