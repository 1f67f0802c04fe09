//! Database API kinds and their experience metadata

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttachError;

/// The database API an attached account speaks
///
/// Determines which account node variant is constructed and which
/// connection-string grammar is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiKind {
    #[serde(rename = "MongoDB")]
    MongoDb,
    #[serde(rename = "DocumentDB", alias = "Core", alias = "SQL")]
    DocumentDb,
    #[serde(rename = "Graph")]
    Graph,
    #[serde(rename = "Table")]
    Table,
}

impl ApiKind {
    /// Every supported API, in picker order
    pub const ALL: [ApiKind; 4] = [
        ApiKind::MongoDb,
        ApiKind::DocumentDb,
        ApiKind::Graph,
        ApiKind::Table,
    ];

    /// Persisted name of the API
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::MongoDb => "MongoDB",
            ApiKind::DocumentDb => "DocumentDB",
            ApiKind::Graph => "Graph",
            ApiKind::Table => "Table",
        }
    }

    /// Short display name (used in labels, e.g. "SQL Emulator")
    pub fn short_name(&self) -> &'static str {
        match self {
            ApiKind::MongoDb => "MongoDB",
            ApiKind::DocumentDb => "SQL",
            ApiKind::Graph => "Gremlin",
            ApiKind::Table => "Table",
        }
    }

    /// Whether accounts of this kind use a Mongo URI rather than
    /// the `AccountEndpoint=...;AccountKey=...` form
    pub fn is_mongo(&self) -> bool {
        matches!(self, ApiKind::MongoDb)
    }

    /// Full experience record for this API
    pub fn experience(&self) -> Experience {
        match self {
            ApiKind::MongoDb => Experience {
                api: *self,
                long_name: "Azure Cosmos DB for MongoDB API".to_string(),
                short_name: self.short_name().to_string(),
                description: None,
                kind: Some("MongoDB".to_string()),
                capability: None,
                tag: Some("Azure Cosmos DB for MongoDB API".to_string()),
            },
            ApiKind::DocumentDb => Experience {
                api: *self,
                long_name: "Core".to_string(),
                short_name: self.short_name().to_string(),
                description: Some("(SQL)".to_string()),
                kind: Some("GlobalDocumentDB".to_string()),
                capability: None,
                tag: Some("Core (SQL)".to_string()),
            },
            ApiKind::Graph => Experience {
                api: *self,
                long_name: "Gremlin".to_string(),
                short_name: self.short_name().to_string(),
                description: Some("(graph)".to_string()),
                kind: Some("GlobalDocumentDB".to_string()),
                capability: Some("EnableGremlin".to_string()),
                tag: Some("Gremlin (graph)".to_string()),
            },
            ApiKind::Table => Experience {
                api: *self,
                long_name: "Azure Table".to_string(),
                short_name: self.short_name().to_string(),
                description: None,
                kind: Some("GlobalDocumentDB".to_string()),
                capability: Some("EnableTable".to_string()),
                tag: Some("Azure Table".to_string()),
            },
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiKind {
    type Err = AttachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(ApiKind::MongoDb),
            "documentdb" | "core" | "sql" => Ok(ApiKind::DocumentDb),
            "graph" | "gremlin" => Ok(ApiKind::Graph),
            "table" => Ok(ApiKind::Table),
            _ => Err(AttachError::UnexpectedApi(s.to_string())),
        }
    }
}

/// Display and provisioning metadata attached to an API kind
///
/// This is the shape stored as `defaultExperience` in persisted descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub api: ApiKind,
    pub long_name: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("MongoDB".parse::<ApiKind>().unwrap(), ApiKind::MongoDb);
        assert_eq!("core".parse::<ApiKind>().unwrap(), ApiKind::DocumentDb);
        assert_eq!("SQL".parse::<ApiKind>().unwrap(), ApiKind::DocumentDb);
        assert_eq!("gremlin".parse::<ApiKind>().unwrap(), ApiKind::Graph);
        assert_eq!(" Table ".parse::<ApiKind>().unwrap(), ApiKind::Table);
    }

    #[test]
    fn test_from_str_unknown_is_unexpected_api() {
        let err = "Cassandra".parse::<ApiKind>().unwrap_err();
        assert!(matches!(err, AttachError::UnexpectedApi(ref name) if name == "Cassandra"));
        assert_eq!(err.to_string(), "Unexpected defaultExperience \"Cassandra\".");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ApiKind::MongoDb).unwrap(), "\"MongoDB\"");
        assert_eq!(serde_json::to_string(&ApiKind::DocumentDb).unwrap(), "\"DocumentDB\"");
        let core: ApiKind = serde_json::from_str("\"Core\"").unwrap();
        assert_eq!(core, ApiKind::DocumentDb);
    }

    #[test]
    fn test_experience_shape() {
        let json = serde_json::to_value(ApiKind::Graph.experience()).unwrap();
        assert_eq!(json["api"], "Graph");
        assert_eq!(json["shortName"], "Gremlin");
        assert_eq!(json["capability"], "EnableGremlin");

        let mongo = serde_json::to_value(ApiKind::MongoDb.experience()).unwrap();
        assert!(mongo.get("capability").is_none());
    }

    #[test]
    fn test_all_is_in_picker_order() {
        assert_eq!(ApiKind::ALL[0], ApiKind::MongoDb);
        assert!(ApiKind::ALL.iter().filter(|a| a.is_mongo()).count() == 1);
    }
}
