//! Settings for attached accounts
//!
//! Supports multiple settings sources:
//! - `MemorySettingsProvider`: In-memory for testing
//! - `FileSettingsProvider`: YAML file-based (user level)

mod traits;
mod settings;
mod memory;
mod file;

pub use traits::{SettingsProvider, ConfigError, ConfigResult};
pub use settings::{
    Settings, EmulatorSettings, LocalMongoSettings,
    DEFAULT_EMULATOR_PORT, DEFAULT_MONGO_EMULATOR_PORT, DEFAULT_LOCAL_MONGO_URI,
};
pub use memory::MemorySettingsProvider;
pub use file::FileSettingsProvider;
