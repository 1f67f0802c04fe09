//! Attached account registry
//!
//! Hydration runs at most once per registry. The first `list()` starts it and
//! every concurrent caller awaits the same shared future. A failed hydration
//! is reported to those callers once; afterwards the list is empty for the
//! rest of the session.

use std::fmt;
use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use super::emulator::{emulator_connection_string, emulator_label};
use super::SERVICE_NAME;
use crate::accounts::{validate_connection_string, AccountFactory, AccountNode, MongoConnector};
use crate::codec;
use crate::config::{MemorySettingsProvider, SettingsProvider};
use crate::error::{AttachError, AttachResult};
use crate::logging::file_logger as log;
use crate::logging::SharedLogger;
use crate::secrets::SecretStore;
use crate::state::StateStore;
use crate::types::{AccountDescriptor, ApiKind};
use crate::ui::{AccountPrompter, ConnectionStringPrompt, LoggerNotifier, Notifier};

const MODULE: &str = "AttachedAccounts";

/// Label of the tree item shown when nothing is attached
pub const ATTACH_PLACEHOLDER_LABEL: &str = "Attach Database Account...";

/// Command the placeholder item invokes
pub const ATTACH_COMMAND: &str = "attachdb.attachDatabaseAccount";

const PICK_API_PLACEHOLDER: &str = "Select a Database type...";
const PICK_EMULATOR_PLACEHOLDER: &str = "Select a Database Account API...";
const CONNECTION_STRING_PROMPT: &str = "Enter the connection string for your database account";
const MONGO_PLACEHOLDER: &str = "mongodb://host:port";
const DOCDB_PLACEHOLDER: &str = "AccountEndpoint=...;AccountKey=...";

const EMULATOR_APIS: [ApiKind; 2] = [ApiKind::MongoDb, ApiKind::DocumentDb];

type HydrationResult = Result<Vec<AccountNode>, Arc<AttachError>>;
type HydrationFuture = Shared<BoxFuture<'static, HydrationResult>>;

enum HydrationState {
    Unhydrated,
    Hydrating(HydrationFuture),
    Hydrated(Vec<AccountNode>),
}

/// What `attach` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Added, secret stored and descriptors persisted
    Attached,
    /// An account with the same id was already attached; nothing changed
    AlreadyAttached,
    /// No secret store: added for this session only
    SessionOnly,
    /// No emulator port configured for the API
    Skipped,
}

impl AttachOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachOutcome::Attached => "attached",
            AttachOutcome::AlreadyAttached => "alreadyAttached",
            AttachOutcome::SessionOnly => "sessionOnly",
            AttachOutcome::Skipped => "skipped",
        }
    }
}

impl fmt::Display for AttachOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child of the attached-accounts tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachedTreeItem {
    Account(AccountNode),
    AttachPlaceholder { label: String, command: String },
}

impl AttachedTreeItem {
    pub fn label(&self) -> &str {
        match self {
            AttachedTreeItem::Account(node) => node.label(),
            AttachedTreeItem::AttachPlaceholder { label, .. } => label,
        }
    }
}

/// Registry of accounts attached by connection string
pub struct AttachedAccountRegistry {
    state: Arc<dyn StateStore>,
    secrets: Option<Arc<dyn SecretStore>>,
    settings: Arc<dyn SettingsProvider>,
    factory: AccountFactory,
    notifier: Arc<dyn Notifier>,
    logger: SharedLogger,
    accounts: Mutex<HydrationState>,
}

impl fmt::Debug for AttachedAccountRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.accounts.lock() {
            HydrationState::Unhydrated => "unhydrated".to_string(),
            HydrationState::Hydrating(_) => "hydrating".to_string(),
            HydrationState::Hydrated(nodes) => format!("{} accounts", nodes.len()),
        };
        f.debug_struct("AttachedAccountRegistry")
            .field("secret_store", &self.secrets.as_ref().map(|s| s.name().to_string()))
            .field("accounts", &state)
            .finish()
    }
}

impl AttachedAccountRegistry {
    /// Create a registry
    ///
    /// `secrets` of `None` (or an unavailable store) puts the registry in
    /// session-only mode: nothing is hydrated or persisted.
    pub fn new(state: Arc<dyn StateStore>, secrets: Option<Arc<dyn SecretStore>>, logger: SharedLogger) -> Self {
        Self {
            state,
            secrets,
            settings: Arc::new(MemorySettingsProvider::new()),
            factory: AccountFactory::default(),
            notifier: Arc::new(LoggerNotifier::new(logger.clone())),
            logger,
            accounts: Mutex::new(HydrationState::Unhydrated),
        }
    }

    pub fn with_settings(mut self, settings: Arc<dyn SettingsProvider>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_mongo_connector(mut self, connector: Arc<dyn MongoConnector>) -> Self {
        self.factory = AccountFactory::new(connector);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn available_secrets(&self) -> Option<Arc<dyn SecretStore>> {
        self.secrets.as_ref().filter(|s| s.is_available()).cloned()
    }

    /// Attached accounts, hydrating on first call
    pub async fn list(&self) -> AttachResult<Vec<AccountNode>> {
        let hydration = {
            let mut accounts = self.accounts.lock();
            match &*accounts {
                HydrationState::Hydrated(nodes) => return Ok(nodes.clone()),
                HydrationState::Hydrating(future) => future.clone(),
                HydrationState::Unhydrated => {
                    let future = hydrate(
                        self.state.clone(),
                        self.available_secrets(),
                        self.factory.clone(),
                    )
                    .boxed()
                    .shared();
                    *accounts = HydrationState::Hydrating(future.clone());
                    future
                }
            }
        };

        let result = hydration.await;

        let mut accounts = self.accounts.lock();
        match result {
            Ok(nodes) => {
                if matches!(*accounts, HydrationState::Hydrating(_)) {
                    *accounts = HydrationState::Hydrated(nodes);
                }
                match &*accounts {
                    HydrationState::Hydrated(nodes) => Ok(nodes.clone()),
                    _ => Ok(Vec::new()),
                }
            }
            Err(e) => {
                if matches!(*accounts, HydrationState::Hydrating(_)) {
                    self.logger.error(&format!("Failed to load attached accounts: {e}"));
                    log::error(MODULE, &format!("Hydration failed: {e}"));
                    *accounts = HydrationState::Hydrated(Vec::new());
                }
                Err(AttachError::hydration_failed(e.to_string()))
            }
        }
    }

    /// Accounts as tree children, or a single attach placeholder when empty
    pub async fn tree_children(&self) -> AttachResult<Vec<AttachedTreeItem>> {
        let nodes = self.list().await?;
        if nodes.is_empty() {
            return Ok(vec![AttachedTreeItem::AttachPlaceholder {
                label: ATTACH_PLACEHOLDER_LABEL.to_string(),
                command: ATTACH_COMMAND.to_string(),
            }]);
        }
        Ok(nodes.into_iter().map(AttachedTreeItem::Account).collect())
    }

    /// Run `f` on the hydrated list
    fn with_nodes<R>(&self, f: impl FnOnce(&mut Vec<AccountNode>) -> R) -> R {
        let mut accounts = self.accounts.lock();
        if let HydrationState::Hydrated(nodes) = &mut *accounts {
            return f(nodes);
        }
        let mut nodes = Vec::new();
        let result = f(&mut nodes);
        *accounts = HydrationState::Hydrated(nodes);
        result
    }

    async fn persist_current(&self) -> AttachResult<()> {
        let descriptors: Vec<_> = self.with_nodes(|nodes| nodes.iter().map(AccountNode::descriptor).collect());
        let encoded = codec::encode(&descriptors)?;
        self.state.update(SERVICE_NAME, &encoded).await?;
        Ok(())
    }

    /// Attach a node whose connection string is `secret`
    ///
    /// The node is visible in the list before the secret is written; a failed
    /// write leaves it listed but unpersisted until the next session.
    pub async fn attach(&self, node: AccountNode, secret: &str) -> AttachResult<AttachOutcome> {
        self.list().await?;

        let id = node.id().to_string();
        let added = self.with_nodes(|nodes| {
            if nodes.iter().any(|n| n.id() == id) {
                false
            } else {
                nodes.push(node);
                true
            }
        });

        if !added {
            self.notifier
                .show_warning(&format!("Database Account '{id}' is already attached."));
            return Ok(AttachOutcome::AlreadyAttached);
        }

        match self.available_secrets() {
            Some(secrets) => {
                secrets.store(&id, secret).await?;
                self.persist_current().await?;
                self.logger.info(&format!("Attached '{id}'"));
                Ok(AttachOutcome::Attached)
            }
            None => {
                self.logger
                    .warn(&format!("No secret store available; '{id}' is attached for this session only"));
                Ok(AttachOutcome::SessionOnly)
            }
        }
    }

    /// Detach the account with `id`. Returns whether it was attached.
    pub async fn detach(&self, id: &str) -> AttachResult<bool> {
        self.list().await?;

        let removed = self.with_nodes(|nodes| {
            let before = nodes.len();
            nodes.retain(|n| n.id() != id);
            nodes.len() != before
        });
        if !removed {
            return Ok(false);
        }

        if let Some(secrets) = self.available_secrets() {
            secrets.delete(id).await?;
            self.persist_current().await?;
        }
        self.logger.info(&format!("Detached '{id}'"));
        Ok(true)
    }

    /// Validate, build and attach an account from a connection string
    pub async fn attach_new(&self, api: ApiKind, connection_string: &str) -> AttachResult<AttachOutcome> {
        let connection_string = connection_string.trim();
        validate_connection_string(api, connection_string)?;

        let node = self
            .factory
            .create_account_node(connection_string, api, None, None, false)
            .await?;
        self.attach(node, connection_string).await
    }

    /// Attach the local emulator for `api` on its configured port
    pub async fn attach_emulator(&self, api: ApiKind) -> AttachResult<AttachOutcome> {
        let settings = self.settings.settings().await?;
        let Some(port) = settings.emulator.port_for(api) else {
            log::info(MODULE, &format!("No emulator port configured for {api}"));
            return Ok(AttachOutcome::Skipped);
        };

        let connection_string = emulator_connection_string(api, port);
        let node = self
            .factory
            .create_account_node(&connection_string, api, Some(emulator_label(api)), None, true)
            .await?;
        self.attach(node, &connection_string).await
    }

    /// Whether the configured local Mongo server answers within the timeout
    pub async fn can_connect_to_local_mongo(&self) -> bool {
        let settings = match self.settings.settings().await {
            Ok(settings) => settings,
            Err(e) => {
                log::debug(MODULE, &format!("Settings unavailable for local Mongo probe: {e}"));
                return false;
            }
        };

        let probe = self.factory.connector().connect(&settings.local_mongo.uri);
        match tokio::time::timeout(settings.local_mongo.timeout(), probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                log::debug(MODULE, &format!("Local Mongo unreachable: {e}"));
                false
            }
            Err(_) => {
                log::debug(MODULE, "Local Mongo probe timed out");
                false
            }
        }
    }

    /// Interactive attach: pick an API, enter a connection string
    pub async fn attach_new_account(&self, prompter: &dyn AccountPrompter) -> AttachResult<AttachOutcome> {
        let api = prompter.pick_api(&ApiKind::ALL, PICK_API_PLACEHOLDER).await?;

        let (placeholder, value) = if api.is_mongo() {
            let value = if self.can_connect_to_local_mongo().await {
                Some(self.settings.settings().await?.local_mongo.uri)
            } else {
                None
            };
            (MONGO_PLACEHOLDER, value)
        } else {
            (DOCDB_PLACEHOLDER, None)
        };

        let connection_string = prompter
            .input_connection_string(ConnectionStringPrompt {
                api,
                prompt: CONNECTION_STRING_PROMPT.to_string(),
                placeholder: placeholder.to_string(),
                value,
            })
            .await?;

        self.attach_new(api, &connection_string).await
    }

    /// Interactive emulator attach
    pub async fn attach_emulator_account(&self, prompter: &dyn AccountPrompter) -> AttachResult<AttachOutcome> {
        let api = prompter.pick_api(&EMULATOR_APIS, PICK_EMULATOR_PLACEHOLDER).await?;
        self.attach_emulator(api).await
    }
}

async fn hydrate(
    state: Arc<dyn StateStore>,
    secrets: Option<Arc<dyn SecretStore>>,
    factory: AccountFactory,
) -> HydrationResult {
    let Some(secrets) = secrets else {
        log::info(MODULE, "No secret store available; skipping hydration");
        return Ok(Vec::new());
    };

    load_nodes(state.as_ref(), secrets.as_ref(), &factory)
        .await
        .map_err(Arc::new)
}

/// Rebuild nodes from persisted descriptors and their secrets
///
/// Any entry that cannot be rebuilt fails the whole pass.
async fn load_nodes(
    state: &dyn StateStore,
    secrets: &dyn SecretStore,
    factory: &AccountFactory,
) -> AttachResult<Vec<AccountNode>> {
    let raw = state.get(SERVICE_NAME).await?;
    let descriptors = codec::decode(raw.as_deref())?;
    log::debug(MODULE, &format!("Hydrating {} descriptors", descriptors.len()));

    try_join_all(descriptors.iter().map(|d| rebuild_node(d, secrets, factory))).await
}

async fn rebuild_node(
    descriptor: &AccountDescriptor,
    secrets: &dyn SecretStore,
    factory: &AccountFactory,
) -> AttachResult<AccountNode> {
    let secret = secrets
        .get(&descriptor.id)
        .await?
        .ok_or_else(|| AttachError::MissingSecret(descriptor.id.clone()))?;

    let api = descriptor.api();
    let label = descriptor.is_emulator.then(|| emulator_label(api));
    factory
        .create_account_node(&secret, api, label, Some(descriptor.id.clone()), descriptor.is_emulator)
        .await
}
