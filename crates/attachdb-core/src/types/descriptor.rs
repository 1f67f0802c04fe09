//! Persisted account descriptor

use super::api::ApiKind;

/// The small persisted record identifying an attached account
///
/// The connection string is never part of a descriptor; it lives in the
/// secret store under the same `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDescriptor {
    /// Account id, unique within the persisted list
    pub id: String,
    /// API the account speaks
    pub default_experience: ApiKind,
    /// Whether the account points at a local emulator
    pub is_emulator: bool,
}

impl AccountDescriptor {
    /// Create a descriptor for a non-emulator account
    pub fn new(id: impl Into<String>, api: ApiKind) -> Self {
        Self {
            id: id.into(),
            default_experience: api,
            is_emulator: false,
        }
    }

    /// Descriptor for a legacy bare-string entry.
    /// Mongo was the only attachable API when that format was written.
    pub fn legacy(id: impl Into<String>) -> Self {
        Self::new(id, ApiKind::MongoDb)
    }

    /// Mark the descriptor as an emulator account
    pub fn with_emulator(mut self, is_emulator: bool) -> Self {
        self.is_emulator = is_emulator;
        self
    }

    pub fn api(&self) -> ApiKind {
        self.default_experience
    }
}
