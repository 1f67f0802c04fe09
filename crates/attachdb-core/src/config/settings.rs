//! Settings structure

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::ApiKind;

/// Default Mongo emulator port
pub const DEFAULT_MONGO_EMULATOR_PORT: u16 = 10255;

/// Default emulator port for the DocumentDB-family APIs
pub const DEFAULT_EMULATOR_PORT: u16 = 8081;

/// Well-known URI of a local Mongo server
pub const DEFAULT_LOCAL_MONGO_URI: &str = "mongodb://127.0.0.1:27017";

const DEFAULT_LOCAL_MONGO_TIMEOUT_MS: u64 = 1000;

/// Attached account settings
///
/// ```yaml
/// emulator:
///   mongo_port: 10255
///   port: 8081
/// local_mongo:
///   uri: mongodb://127.0.0.1:27017
///   timeout_ms: 1000
/// secret_store: keychain
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub emulator: EmulatorSettings,

    #[serde(default)]
    pub local_mongo: LocalMongoSettings,

    /// Secret store backend name (`keychain`, `memory`, `none`)
    #[serde(default = "default_secret_store")]
    pub secret_store: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            emulator: EmulatorSettings::default(),
            local_mongo: LocalMongoSettings::default(),
            secret_store: default_secret_store(),
        }
    }
}

fn default_secret_store() -> String {
    "keychain".to_string()
}

/// Emulator ports. `null` disables emulator attach for that API family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorSettings {
    #[serde(default = "default_mongo_port")]
    pub mongo_port: Option<u16>,

    /// Shared by DocumentDB, Graph and Table
    #[serde(default = "default_port")]
    pub port: Option<u16>,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            mongo_port: default_mongo_port(),
            port: default_port(),
        }
    }
}

impl EmulatorSettings {
    /// Configured emulator port for an API
    pub fn port_for(&self, api: ApiKind) -> Option<u16> {
        if api.is_mongo() {
            self.mongo_port
        } else {
            self.port
        }
    }
}

fn default_mongo_port() -> Option<u16> {
    Some(DEFAULT_MONGO_EMULATOR_PORT)
}

fn default_port() -> Option<u16> {
    Some(DEFAULT_EMULATOR_PORT)
}

/// Local Mongo probe used to pre-fill the connection string prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMongoSettings {
    #[serde(default = "default_local_mongo_uri")]
    pub uri: String,

    #[serde(default = "default_local_mongo_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LocalMongoSettings {
    fn default() -> Self {
        Self {
            uri: default_local_mongo_uri(),
            timeout_ms: default_local_mongo_timeout_ms(),
        }
    }
}

impl LocalMongoSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_local_mongo_uri() -> String {
    DEFAULT_LOCAL_MONGO_URI.to_string()
}

fn default_local_mongo_timeout_ms() -> u64 {
    DEFAULT_LOCAL_MONGO_TIMEOUT_MS
}
