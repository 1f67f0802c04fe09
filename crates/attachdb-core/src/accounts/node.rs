//! In-memory account nodes
//!
//! Nodes are rebuilt each session from a descriptor plus its secret and are
//! never persisted directly.

use std::fmt;

use crate::types::{AccountDescriptor, ApiKind};

/// Suffix appended to a node's context value to mark it as attached by
/// connection string rather than discovered through a subscription
pub const ATTACHED_SUFFIX: &str = "Attached";

/// Endpoint and key of a DocumentDB-family account
#[derive(Clone, PartialEq, Eq)]
pub struct KeyedEndpoint {
    pub endpoint: String,
    pub master_key: String,
    pub database: Option<String>,
}

impl fmt::Debug for KeyedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedEndpoint")
            .field("endpoint", &self.endpoint)
            .field("master_key", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// API-specific connection data of a node
#[derive(Clone, PartialEq, Eq)]
pub enum AccountKind {
    Mongo {
        connection_string: String,
        database: Option<String>,
    },
    DocumentDb(KeyedEndpoint),
    Graph(KeyedEndpoint),
    Table(KeyedEndpoint),
}

impl AccountKind {
    pub fn api(&self) -> ApiKind {
        match self {
            AccountKind::Mongo { .. } => ApiKind::MongoDb,
            AccountKind::DocumentDb(_) => ApiKind::DocumentDb,
            AccountKind::Graph(_) => ApiKind::Graph,
            AccountKind::Table(_) => ApiKind::Table,
        }
    }

    fn base_context_value(&self) -> &'static str {
        match self {
            AccountKind::Mongo { .. } => "mongoAccount",
            AccountKind::DocumentDb(_) => "documentAccount",
            AccountKind::Graph(_) => "graphAccount",
            AccountKind::Table(_) => "tableAccount",
        }
    }

    fn keyed(&self) -> Option<&KeyedEndpoint> {
        match self {
            AccountKind::Mongo { .. } => None,
            AccountKind::DocumentDb(keyed) | AccountKind::Graph(keyed) | AccountKind::Table(keyed) => Some(keyed),
        }
    }
}

impl fmt::Debug for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Mongo { database, .. } => f
                .debug_struct("Mongo")
                .field("connection_string", &"<redacted>")
                .field("database", database)
                .finish(),
            AccountKind::DocumentDb(keyed) => f.debug_tuple("DocumentDb").field(keyed).finish(),
            AccountKind::Graph(keyed) => f.debug_tuple("Graph").field(keyed).finish(),
            AccountKind::Table(keyed) => f.debug_tuple("Table").field(keyed).finish(),
        }
    }
}

/// A database account in the registry's list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNode {
    id: String,
    label: String,
    is_emulator: bool,
    context_value: String,
    kind: AccountKind,
}

impl AccountNode {
    fn with_kind(id: impl Into<String>, label: impl Into<String>, kind: AccountKind, is_emulator: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_emulator,
            context_value: kind.base_context_value().to_string(),
            kind,
        }
    }

    pub fn mongo(
        id: impl Into<String>,
        label: impl Into<String>,
        connection_string: impl Into<String>,
        database: Option<String>,
        is_emulator: bool,
    ) -> Self {
        let kind = AccountKind::Mongo {
            connection_string: connection_string.into(),
            database,
        };
        Self::with_kind(id, label, kind, is_emulator)
    }

    pub fn document_db(id: impl Into<String>, label: impl Into<String>, endpoint: KeyedEndpoint, is_emulator: bool) -> Self {
        Self::with_kind(id, label, AccountKind::DocumentDb(endpoint), is_emulator)
    }

    pub fn graph(id: impl Into<String>, label: impl Into<String>, endpoint: KeyedEndpoint, is_emulator: bool) -> Self {
        Self::with_kind(id, label, AccountKind::Graph(endpoint), is_emulator)
    }

    pub fn table(id: impl Into<String>, label: impl Into<String>, endpoint: KeyedEndpoint, is_emulator: bool) -> Self {
        Self::with_kind(id, label, AccountKind::Table(endpoint), is_emulator)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn api(&self) -> ApiKind {
        self.kind.api()
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn is_emulator(&self) -> bool {
        self.is_emulator
    }

    pub fn set_emulator(&mut self, is_emulator: bool) {
        self.is_emulator = is_emulator;
    }

    /// Account endpoint URL. Mongo accounts have none beyond their id.
    pub fn endpoint(&self) -> Option<&str> {
        self.kind.keyed().map(|k| k.endpoint.as_str())
    }

    /// Database the connection string is scoped to, if any
    pub fn database(&self) -> Option<&str> {
        match &self.kind {
            AccountKind::Mongo { database, .. } => database.as_deref(),
            other => other.keyed().and_then(|k| k.database.as_deref()),
        }
    }

    pub fn context_value(&self) -> &str {
        &self.context_value
    }

    /// Tag the node as attached. Idempotent.
    pub fn mark_attached(&mut self) {
        if !self.is_attached() {
            self.context_value.push_str(ATTACHED_SUFFIX);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.context_value.ends_with(ATTACHED_SUFFIX)
    }

    /// Persisted form of this node
    pub fn descriptor(&self) -> AccountDescriptor {
        AccountDescriptor::new(self.id.clone(), self.api()).with_emulator(self.is_emulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> KeyedEndpoint {
        KeyedEndpoint {
            endpoint: "https://acct.example/".to_string(),
            master_key: "s3cret".to_string(),
            database: None,
        }
    }

    #[test]
    fn test_mark_attached() {
        let mut node = AccountNode::table("acct.example", "acct.example (Table)", keyed(), false);
        assert_eq!(node.context_value(), "tableAccount");
        assert!(!node.is_attached());

        node.mark_attached();
        node.mark_attached();
        assert_eq!(node.context_value(), "tableAccountAttached");
        assert!(node.is_attached());
    }

    #[test]
    fn test_descriptor() {
        let mut node = AccountNode::graph("g.example", "g", keyed(), false);
        node.set_emulator(true);
        let descriptor = node.descriptor();
        assert_eq!(descriptor.id, "g.example");
        assert_eq!(descriptor.default_experience, ApiKind::Graph);
        assert!(descriptor.is_emulator);
    }

    #[test]
    fn test_accessors() {
        let mongo = AccountNode::mongo("h:1/db", "h:1/db (MongoDB)", "mongodb://h:1/db", Some("db".into()), false);
        assert_eq!(mongo.api(), ApiKind::MongoDb);
        assert_eq!(mongo.endpoint(), None);
        assert_eq!(mongo.database(), Some("db"));

        let docdb = AccountNode::document_db("acct.example", "acct", keyed(), false);
        assert_eq!(docdb.endpoint(), Some("https://acct.example/"));
        assert_eq!(docdb.api(), ApiKind::DocumentDb);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mongo = AccountNode::mongo("h:1", "h", "mongodb://user:hunter2@h:1", None, false);
        let docdb = AccountNode::document_db("acct.example", "acct", keyed(), false);
        assert!(!format!("{mongo:?}").contains("hunter2"));
        assert!(!format!("{docdb:?}").contains("s3cret"));
    }
}
