//! Descriptor codec
//!
//! Converts the persisted account list to and from a single JSON string.
//!
//! Two element shapes are accepted on read:
//! - Legacy: a bare string id, from when only Mongo accounts could be attached
//! - Canonical: `{ "id", "defaultExperience": { "api", ... }, "isEmulator" }`
//!
//! Writes always use the canonical shape, so a legacy list is migrated the
//! first time it is re-persisted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AttachResult;
use crate::types::{AccountDescriptor, ApiKind, Experience};

#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedEntry {
    Legacy(String),
    Account(PersistedAccount),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedAccount {
    id: String,
    default_experience: PersistedExperience,
    #[serde(default)]
    is_emulator: bool,
}

/// `defaultExperience` is normally a full experience object; only its
/// `api` is needed. A bare API name is tolerated as well.
///
/// The name is kept as text so an unknown API surfaces as
/// `AttachError::UnexpectedApi` rather than a JSON error.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedExperience {
    Full { api: String },
    Api(String),
}

impl PersistedExperience {
    fn api(&self) -> AttachResult<ApiKind> {
        match self {
            PersistedExperience::Full { api } | PersistedExperience::Api(api) => api.parse(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalAccount<'a> {
    id: &'a str,
    default_experience: Experience,
    is_emulator: bool,
}

impl TryFrom<PersistedEntry> for AccountDescriptor {
    type Error = crate::error::AttachError;

    fn try_from(entry: PersistedEntry) -> AttachResult<Self> {
        Ok(match entry {
            PersistedEntry::Legacy(id) => AccountDescriptor::legacy(id),
            PersistedEntry::Account(account) => {
                AccountDescriptor::new(account.id, account.default_experience.api()?)
                    .with_emulator(account.is_emulator)
            }
        })
    }
}

/// Decode the persisted list
///
/// Absent or blank input yields an empty list. Later entries repeating an
/// earlier id are dropped. Malformed JSON is `AttachError::Codec`; an API
/// name outside the supported set is `AttachError::UnexpectedApi`.
pub fn decode(raw: Option<&str>) -> AttachResult<Vec<AccountDescriptor>> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    let entries: Vec<PersistedEntry> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
        let descriptor = AccountDescriptor::try_from(entry)?;
        if seen.insert(descriptor.id.clone()) {
            descriptors.push(descriptor);
        }
    }
    Ok(descriptors)
}

/// Encode descriptors in canonical object form
pub fn encode(descriptors: &[AccountDescriptor]) -> serde_json::Result<String> {
    let accounts: Vec<CanonicalAccount<'_>> = descriptors
        .iter()
        .map(|d| CanonicalAccount {
            id: &d.id,
            default_experience: d.default_experience.experience(),
            is_emulator: d.is_emulator,
        })
        .collect();
    serde_json::to_string(&accounts)
}
