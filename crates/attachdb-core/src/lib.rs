//! AttachDB Core
//!
//! Manages database accounts that were attached directly by connection string
//! rather than discovered through a cloud subscription.
//! This crate is runtime-agnostic and can be driven from any host
//! (Node.js via napi-rs, a native CLI, tests, etc.)
//!
//! ## Moving parts
//!
//! - Persisted descriptors (`codec`): a JSON list of `{id, defaultExperience, isEmulator}`
//!   kept in a key-value `StateStore`, with a legacy bare-string form accepted on read
//! - Secrets (`secrets`): connection strings kept in a `SecretStore`, keyed by account id
//! - Account nodes (`accounts`): typed, API-specific accounts rebuilt from descriptor + secret
//! - The registry (`attached`): hydrates once, then attaches and detaches accounts
//!
//! ```rust,ignore
//! use attachdb_core::{AttachedAccountRegistry, ApiKind};
//!
//! let registry = AttachedAccountRegistry::new(state, Some(secrets), logger);
//! registry.attach_new(ApiKind::DocumentDb, "AccountEndpoint=https://acct.example/;AccountKey=...").await?;
//!
//! for account in registry.list().await? {
//!     println!("{} ({})", account.label(), account.api());
//! }
//! ```

pub mod error;
pub mod types;
pub mod codec;
pub mod secrets;
pub mod state;
pub mod logging;
pub mod config;
pub mod accounts;
pub mod ui;
pub mod attached;

// Re-export commonly used types
pub use error::{AttachError, AttachResult};

pub use types::{AccountDescriptor, ApiKind, Experience};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    MemorySecretStore, KeychainSecretStore,
    register_secret_store, create_secret_store, list_secret_stores,
};

pub use state::{StateStore, StateError, MemoryStateStore, FileStateStore};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, MemoryLogger, SharedLogger};

pub use config::{SettingsProvider, MemorySettingsProvider, FileSettingsProvider, Settings};

pub use accounts::{
    AccountFactory, AccountNode, AccountKind, KeyedEndpoint, ConnectionStringError,
    MongoConnector, TcpMongoConnector, MongoServerAddress, SrvResolver, DnsSrvResolver,
    validate_connection_string,
};

pub use ui::{AccountPrompter, ConnectionStringPrompt, Notifier, LoggerNotifier};

pub use attached::{
    AttachedAccountRegistry, AttachOutcome, AttachedTreeItem,
    RegistryOptions, open_registry, SERVICE_NAME,
};
