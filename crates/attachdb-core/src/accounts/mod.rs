//! Attached account nodes and how they are built
//!
//! - `connection_string`: grammar validation and DocumentDB-family parsing
//! - `mongo`: Mongo URI helpers and the connector used to derive Mongo ids
//! - `node`: the typed account node
//! - `factory`: connection string + API kind to node

mod connection_string;
mod factory;
pub mod mongo;
mod node;

pub use connection_string::{
    parse_docdb_connection_string, validate_connection_string, validate_docdb_connection_string,
    validate_mongo_connection_string, ConnectionStringError, DocDbConnectionString,
};
pub use factory::AccountFactory;
pub use mongo::{
    database_name, is_srv_connection_string, seed_hosts, DnsSrvResolver, MongoConnector, MongoServerAddress, SrvResolver,
    TcpMongoConnector, DEFAULT_MONGO_PORT,
};
pub use node::{AccountKind, AccountNode, KeyedEndpoint, ATTACHED_SUFFIX};
