//! Prompt and notification traits

use async_trait::async_trait;

use crate::accounts::validate_connection_string;
use crate::error::AttachResult;
use crate::logging::SharedLogger;
use crate::types::ApiKind;

/// Shows non-fatal messages to the user
pub trait Notifier: Send + Sync {
    fn show_warning(&self, message: &str);
}

/// Notifier that routes warnings into a logger
///
/// Used when the host has no UI surface of its own.
#[derive(Clone)]
pub struct LoggerNotifier {
    logger: SharedLogger,
}

impl LoggerNotifier {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }
}

impl Notifier for LoggerNotifier {
    fn show_warning(&self, message: &str) {
        self.logger.warn(message);
    }
}

/// Request for a connection string input box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStringPrompt {
    pub api: ApiKind,
    pub prompt: String,
    pub placeholder: String,
    /// Pre-filled value
    pub value: Option<String>,
}

impl ConnectionStringPrompt {
    /// Inline validation: the error message for `input`, or `None` when valid
    pub fn validate(&self, input: &str) -> Option<String> {
        validate_connection_string(self.api, input.trim())
            .err()
            .map(|e| e.to_string())
    }
}

/// Interactive prompts used by the attach flows
///
/// Dismissing a prompt must return `AttachError::Cancelled`.
#[async_trait]
pub trait AccountPrompter: Send + Sync {
    /// Let the user pick one of `choices`
    async fn pick_api(&self, choices: &[ApiKind], placeholder: &str) -> AttachResult<ApiKind>;

    /// Ask for a connection string. Implementations should run
    /// [`ConnectionStringPrompt::validate`] on each edit.
    async fn input_connection_string(&self, prompt: ConnectionStringPrompt) -> AttachResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use std::sync::Arc;

    #[test]
    fn test_prompt_validation() {
        let prompt = ConnectionStringPrompt {
            api: ApiKind::MongoDb,
            prompt: "Enter".to_string(),
            placeholder: "mongodb://host:port".to_string(),
            value: None,
        };
        assert_eq!(prompt.validate("  mongodb://h:1  "), None);
        assert_eq!(
            prompt.validate("http://h").as_deref(),
            Some("Connection string must start with \"mongodb://\" or \"mongodb+srv://\"")
        );
    }

    #[test]
    fn test_logger_notifier() {
        let logger = Arc::new(MemoryLogger::new());
        LoggerNotifier::new(logger.clone()).show_warning("careful");
        assert_eq!(logger.messages(), vec!["careful"]);
    }
}
