//! Attached database accounts
//!
//! The registry keeps the list of accounts attached by connection string.
//! Descriptors live in a [`StateStore`](crate::state::StateStore) under
//! [`SERVICE_NAME`]; each account's connection string lives in a
//! [`SecretStore`](crate::secrets::SecretStore) keyed by account id.

mod emulator;
mod registry;
mod setup;

pub use emulator::{emulator_connection_string, emulator_label, EMULATOR_HOST, EMULATOR_PASSWORD};
pub use registry::{
    AttachOutcome, AttachedAccountRegistry, AttachedTreeItem, ATTACH_COMMAND, ATTACH_PLACEHOLDER_LABEL,
};
pub use setup::{open_registry, RegistryOptions};

/// Secret-store service name and persisted-state key
pub const SERVICE_NAME: &str = "attachdb.connectionStrings";
