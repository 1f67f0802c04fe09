//! Secret storage for account connection strings
//!
//! This module provides a pluggable secret storage system with:
//! - `SecretStore` trait for implementing custom stores
//! - Built-in implementations: `KeychainSecretStore`, `MemorySecretStore`
//! - A registry for creating stores by name (selected from settings)
//!
//! Every store is bound to one service name; accounts are keyed by id within it.

mod traits;
mod memory_store;
mod keychain_store;
mod registry;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use memory_store::MemorySecretStore;
pub use keychain_store::KeychainSecretStore;
pub use registry::{
    register_secret_store, create_secret_store, list_secret_stores, has_secret_store,
    unregister_secret_store, StoreDefinition, StoreFactory, NO_SECRET_STORE,
};
