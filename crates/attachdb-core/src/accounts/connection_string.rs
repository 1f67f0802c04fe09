//! Connection string grammars
//!
//! Two families:
//! - Mongo: a `mongodb://` or `mongodb+srv://` URI
//! - DocumentDB, Graph and Table: `AccountEndpoint=<url>;AccountKey=<key>[;Database=<name>]`

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::types::ApiKind;

const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Validation failures with user-facing messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionStringError {
    #[error("Connection string must start with \"mongodb://\" or \"mongodb+srv://\"")]
    MongoPrefix,

    #[error("Connection string must be of the form \"AccountEndpoint=...;AccountKey=...\"")]
    DocDbFormat,

    #[error("AccountEndpoint is invalid url")]
    InvalidEndpoint,

    #[error("Invalid host in connection string: \"{0}\"")]
    InvalidMongoHost(String),
}

fn property_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)(?:^|;)\s*{name}=([^;]+)")).expect("connection string property regex should compile")
}

static ACCOUNT_ENDPOINT_RE: Lazy<Regex> = Lazy::new(|| property_regex("AccountEndpoint"));
static ACCOUNT_KEY_RE: Lazy<Regex> = Lazy::new(|| property_regex("AccountKey"));
static DATABASE_RE: Lazy<Regex> = Lazy::new(|| property_regex("Database"));

fn property(re: &Regex, connection_string: &str) -> Option<String> {
    re.captures(connection_string)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parsed `AccountEndpoint=...;AccountKey=...` connection string
#[derive(Clone, PartialEq, Eq)]
pub struct DocDbConnectionString {
    pub endpoint: String,
    pub master_key: String,
    pub database: Option<String>,
    /// Host authority of the endpoint (`host` or `host:port`)
    pub account_id: String,
}

impl std::fmt::Debug for DocDbConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocDbConnectionString")
            .field("endpoint", &self.endpoint)
            .field("master_key", &"<redacted>")
            .field("database", &self.database)
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Parse a DocumentDB-family connection string
///
/// Properties are matched case-insensitively in any order. The account id is
/// the endpoint's host, with the port appended only when it is explicit and
/// not the scheme default.
pub fn parse_docdb_connection_string(connection_string: &str) -> Result<DocDbConnectionString, ConnectionStringError> {
    let endpoint = property(&ACCOUNT_ENDPOINT_RE, connection_string).ok_or(ConnectionStringError::DocDbFormat)?;
    let master_key = property(&ACCOUNT_KEY_RE, connection_string).ok_or(ConnectionStringError::DocDbFormat)?;

    let url = Url::parse(&endpoint).map_err(|_| ConnectionStringError::InvalidEndpoint)?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(ConnectionStringError::InvalidEndpoint)?;
    let account_id = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Ok(DocDbConnectionString {
        endpoint,
        master_key,
        database: property(&DATABASE_RE, connection_string),
        account_id,
    })
}

pub fn validate_mongo_connection_string(connection_string: &str) -> Result<(), ConnectionStringError> {
    if MONGO_SCHEMES.iter().any(|scheme| connection_string.starts_with(scheme)) {
        Ok(())
    } else {
        Err(ConnectionStringError::MongoPrefix)
    }
}

pub fn validate_docdb_connection_string(connection_string: &str) -> Result<(), ConnectionStringError> {
    parse_docdb_connection_string(connection_string).map(|_| ())
}

/// Validate a connection string against the grammar of `api`
pub fn validate_connection_string(api: ApiKind, connection_string: &str) -> Result<(), ConnectionStringError> {
    if api.is_mongo() {
        validate_mongo_connection_string(connection_string)
    } else {
        validate_docdb_connection_string(connection_string)
    }
}
