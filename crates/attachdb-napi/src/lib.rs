//! Node.js bindings for AttachDB via napi-rs

#![deny(clippy::all)]

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Arc;

use attachdb_core::accounts::validate_connection_string as core_validate_connection_string;
use attachdb_core::attached::{
    open_registry, AttachOutcome, AttachedAccountRegistry as CoreRegistry,
    AttachedTreeItem as CoreTreeItem, RegistryOptions,
};
use attachdb_core::secrets::list_secret_stores as core_list_secret_stores;
use attachdb_core::{AccountNode, ApiKind, AttachError};

fn to_napi_error(e: AttachError) -> Error {
    Error::from_reason(e.to_string())
}

fn parse_api(api: &str) -> Result<ApiKind> {
    api.parse::<ApiKind>().map_err(to_napi_error)
}

fn outcome_string(outcome: AttachOutcome) -> String {
    outcome.as_str().to_string()
}

// ============================================================================
// Types
// ============================================================================

#[napi(object)]
pub struct AttachedAccountsOptions {
    /// YAML settings file, defaults to the user-level file
    pub settings_path: Option<String>,
    /// JSON state file, defaults to the user-level file
    pub state_path: Option<String>,
    /// `keychain`, `memory` or `none`; defaults to the `secret_store` setting
    pub secret_store: Option<String>,
}

#[napi(object)]
pub struct AccountInfo {
    pub id: String,
    pub label: String,
    pub api: String,
    pub endpoint: Option<String>,
    pub database: Option<String>,
    pub is_emulator: bool,
    pub context_value: String,
}

impl From<&AccountNode> for AccountInfo {
    fn from(node: &AccountNode) -> Self {
        Self {
            id: node.id().to_string(),
            label: node.label().to_string(),
            api: node.api().to_string(),
            endpoint: node.endpoint().map(str::to_string),
            database: node.database().map(str::to_string),
            is_emulator: node.is_emulator(),
            context_value: node.context_value().to_string(),
        }
    }
}

#[napi(string_enum)]
pub enum TreeItemKind {
    Account,
    AttachPlaceholder,
}

#[napi(object)]
pub struct TreeItem {
    pub kind: TreeItemKind,
    pub label: String,
    pub account: Option<AccountInfo>,
    pub command: Option<String>,
}

impl From<CoreTreeItem> for TreeItem {
    fn from(item: CoreTreeItem) -> Self {
        match item {
            CoreTreeItem::Account(node) => Self {
                kind: TreeItemKind::Account,
                label: node.label().to_string(),
                account: Some((&node).into()),
                command: None,
            },
            CoreTreeItem::AttachPlaceholder { label, command } => Self {
                kind: TreeItemKind::AttachPlaceholder,
                label,
                account: None,
                command: Some(command),
            },
        }
    }
}

#[napi(object)]
pub struct ApiInfo {
    pub api: String,
    pub long_name: String,
    pub short_name: String,
}

#[napi(object)]
pub struct StoreInfo {
    pub name: String,
    pub description: String,
}

// ============================================================================
// AttachedAccounts
// ============================================================================

/// Accounts attached by connection string
#[napi]
pub struct AttachedAccounts {
    inner: Arc<CoreRegistry>,
}

#[napi]
impl AttachedAccounts {
    #[napi(constructor)]
    pub fn new(options: Option<AttachedAccountsOptions>) -> Result<Self> {
        let options = options
            .map(|o| RegistryOptions {
                settings_path: o.settings_path.map(Into::into),
                state_path: o.state_path.map(Into::into),
                secret_store: o.secret_store,
                logger: None,
            })
            .unwrap_or_default();
        let registry = open_registry(options).map_err(to_napi_error)?;
        Ok(Self { inner: Arc::new(registry) })
    }

    #[napi]
    pub async fn list(&self) -> Result<Vec<AccountInfo>> {
        let nodes = self.inner.list().await.map_err(to_napi_error)?;
        Ok(nodes.iter().map(AccountInfo::from).collect())
    }

    #[napi]
    pub async fn tree_children(&self) -> Result<Vec<TreeItem>> {
        let items = self.inner.tree_children().await.map_err(to_napi_error)?;
        Ok(items.into_iter().map(TreeItem::from).collect())
    }

    /// Returns `attached`, `alreadyAttached` or `sessionOnly`
    #[napi]
    pub async fn attach_new(&self, api: String, connection_string: String) -> Result<String> {
        let api = parse_api(&api)?;
        self.inner
            .attach_new(api, &connection_string)
            .await
            .map(outcome_string)
            .map_err(to_napi_error)
    }

    /// Returns `attached`, `alreadyAttached`, `sessionOnly` or `skipped`
    #[napi]
    pub async fn attach_emulator(&self, api: String) -> Result<String> {
        let api = parse_api(&api)?;
        self.inner
            .attach_emulator(api)
            .await
            .map(outcome_string)
            .map_err(to_napi_error)
    }

    #[napi]
    pub async fn detach(&self, id: String) -> Result<bool> {
        self.inner.detach(&id).await.map_err(to_napi_error)
    }

    #[napi]
    pub async fn can_connect_to_local_mongo(&self) -> bool {
        self.inner.can_connect_to_local_mongo().await
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Validation message for `value`, or null when it is valid for `api`
#[napi]
pub fn validate_connection_string(api: String, value: String) -> Result<Option<String>> {
    let api = parse_api(&api)?;
    Ok(core_validate_connection_string(api, value.trim()).err().map(|e| e.to_string()))
}

#[napi]
pub fn supported_apis() -> Vec<ApiInfo> {
    ApiKind::ALL
        .iter()
        .map(|api| {
            let experience = api.experience();
            ApiInfo {
                api: api.to_string(),
                long_name: experience.long_name,
                short_name: experience.short_name,
            }
        })
        .collect()
}

#[napi]
pub fn list_secret_stores() -> Vec<StoreInfo> {
    core_list_secret_stores()
        .into_iter()
        .map(|(name, description)| StoreInfo { name, description })
        .collect()
}
