//! Host UI capabilities
//!
//! The registry never talks to a UI toolkit directly. Hosts implement
//! [`AccountPrompter`] for interactive flows and [`Notifier`] for
//! non-fatal warnings.

mod traits;
#[cfg(test)]
pub(crate) mod scripted;

pub use traits::{AccountPrompter, ConnectionStringPrompt, LoggerNotifier, Notifier};
