/// ID-or-name resolution for users and projects.
///
/// A token made only of decimal digits is an ID and is used as-is, with no
/// existence check. Anything else is a name: the whole collection is listed
/// once and scanned for the first case-exact match.
use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::errors::HarborError;
use crate::api::{ApiError, Record, RegistryApi};

/// Collections that accept an ID or a name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Project,
}

impl ResourceKind {
    /// Field holding the numeric ID.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::User => "user_id",
            Self::Project => "project_id",
        }
    }

    /// Field matched against named tokens.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::User => "username",
            Self::Project => "name",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Project => "project",
        })
    }
}

/// A classified user token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u64),
    Named(String),
}

impl Identifier {
    /// Classify a token. Digit strings too large for a `u64` stay names.
    #[must_use]
    pub fn classify(token: &str) -> Self {
        if is_numeric(token) {
            if let Ok(id) = token.parse() {
                return Self::Numeric(id);
            }
        }
        Self::Named(token.to_owned())
    }
}

/// True iff `token` is non-empty and every character is an ASCII digit.
#[must_use]
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Read the numeric ID of a `kind` record.
///
/// # Errors
///
/// `HarborError::InvalidRecord` if the ID field is missing or not an integer.
pub fn record_id(kind: ResourceKind, record: &Record) -> Result<u64, HarborError> {
    record
        .get(kind.id_field())
        .and_then(Value::as_u64)
        .ok_or(HarborError::InvalidRecord {
            kind,
            field: kind.id_field(),
        })
}

/// Resolve `token` to an ID, calling `lister` only for named tokens.
///
/// # Errors
///
/// - `HarborError::NotFound` — no entry's name equals `token`
/// - `HarborError::Api` — `lister` failed
pub fn resolve<F>(kind: ResourceKind, token: &str, lister: F) -> Result<u64, HarborError>
where
    F: FnOnce() -> Result<Vec<Record>, ApiError>,
{
    let name = match Identifier::classify(token) {
        Identifier::Numeric(id) => return Ok(id),
        Identifier::Named(name) => name,
    };

    let entries = lister()?;
    debug!(%kind, token, entries = entries.len(), "resolving name");

    let found = entries
        .iter()
        .find(|e| e.get(kind.name_field()).and_then(Value::as_str) == Some(name.as_str()));

    match found {
        Some(entry) => record_id(kind, entry),
        None => Err(HarborError::NotFound { kind, token: name }),
    }
}

/// Resolve a user ID or username.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_user(api: &dyn RegistryApi, token: &str) -> Result<u64, HarborError> {
    resolve(ResourceKind::User, token, || api.list_users())
}

/// Resolve a project ID or project name.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_project(api: &dyn RegistryApi, token: &str) -> Result<u64, HarborError> {
    resolve(ResourceKind::Project, token, || api.list_projects())
}
