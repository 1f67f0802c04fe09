//! Scripted UI used by registry tests

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{AccountPrompter, ConnectionStringPrompt, Notifier};
use crate::error::{AttachError, AttachResult};
use crate::types::ApiKind;

/// Answers prompts from a queue; an exhausted queue behaves like a dismissed prompt
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    picks: Mutex<VecDeque<ApiKind>>,
    inputs: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<ConnectionStringPrompt>>,
    pick_choices: Mutex<Vec<Vec<ApiKind>>>,
    warnings: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pick(self, api: ApiKind) -> Self {
        self.picks.lock().push_back(api);
        self
    }

    pub(crate) fn input(self, value: impl Into<String>) -> Self {
        self.inputs.lock().push_back(value.into());
        self
    }

    pub(crate) fn prompts(&self) -> Vec<ConnectionStringPrompt> {
        self.prompts.lock().clone()
    }

    pub(crate) fn pick_choices(&self) -> Vec<Vec<ApiKind>> {
        self.pick_choices.lock().clone()
    }

    pub(crate) fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }
}

#[async_trait]
impl AccountPrompter for ScriptedPrompter {
    async fn pick_api(&self, choices: &[ApiKind], _placeholder: &str) -> AttachResult<ApiKind> {
        self.pick_choices.lock().push(choices.to_vec());
        self.picks.lock().pop_front().ok_or(AttachError::Cancelled)
    }

    async fn input_connection_string(&self, prompt: ConnectionStringPrompt) -> AttachResult<String> {
        self.prompts.lock().push(prompt);
        self.inputs.lock().pop_front().ok_or(AttachError::Cancelled)
    }
}

impl Notifier for ScriptedPrompter {
    fn show_warning(&self, message: &str) {
        self.warnings.lock().push(message.to_string());
    }
}
