//! Logging abstractions
//!
//! Two layers:
//! - [`Logger`]: injected into the registry so a host (editor output channel,
//!   console, tests) decides where user-relevant messages go.
//! - [`file_logger`]: process-wide debug trace, off unless `ATTACHDB_DEBUG` is set.

mod traits;
mod noop;
mod console;
mod memory;
pub mod file_logger;

pub use traits::{Logger, LoggerExt, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{LogRecord, MemoryLogger};

pub use file_logger::{
    log, trace, debug, info, warn, error,
    log_file_path, clear_log, LogLevel,
};
