//! Error taxonomy for attached account operations

use thiserror::Error;

use crate::accounts::ConnectionStringError;
use crate::config::ConfigError;
use crate::secrets::SecretStoreError;
use crate::state::StateError;

/// Message shown when the first load of persisted accounts fails
pub const HYDRATION_FAILED_MESSAGE: &str =
    "Failed to load persisted Database Accounts. Reattach the accounts manually.";

/// Errors that can occur while listing, attaching or detaching accounts
#[derive(Error, Debug)]
pub enum AttachError {
    /// An interactive prompt was dismissed. Not a failure; callers abort quietly.
    #[error("Operation cancelled")]
    Cancelled,

    /// Malformed connection string
    #[error("{0}")]
    Validation(#[from] ConnectionStringError),

    /// The one-time load of persisted accounts failed.
    /// The registry continues with an empty list for the session.
    #[error("Failed to load persisted Database Accounts. Reattach the accounts manually.")]
    HydrationFailed { reason: String },

    /// A persisted descriptor has no secret behind it
    #[error("No stored connection string for account '{0}'")]
    MissingSecret(String),

    /// Network failure while reaching a database server
    #[error("Could not connect to {target}: {message}")]
    Connectivity { target: String, message: String },

    /// An API name outside the supported set
    #[error("Unexpected defaultExperience \"{0}\".")]
    UnexpectedApi(String),

    #[error("Secret store error: {0}")]
    SecretStore(#[from] SecretStoreError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("Descriptor codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl AttachError {
    /// Create a connectivity error
    pub fn connectivity(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connectivity {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a hydration failure carrying the underlying reason
    pub fn hydration_failed(reason: impl Into<String>) -> Self {
        Self::HydrationFailed {
            reason: reason.into(),
        }
    }

    /// Whether this is a user cancellation rather than a genuine error
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type AttachResult<T> = Result<T, AttachError>;
