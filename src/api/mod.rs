/// Harbor REST API layer: the capability trait the domain layer depends on,
/// the decoded record types, and the HTTP implementation.
pub mod client;
pub mod errors;
#[cfg(test)]
pub mod fake;

pub use client::HarborClient;
pub use errors::ApiError;

use serde::{Deserialize, Serialize};

/// A decoded API record: field name to JSON value, in the order the
/// registry sent them.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One layer of an image manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Layer {
    /// Compressed layer size in bytes.
    pub size: u64,
}

/// The manifest of one (repository, tag) pair. Only the layer list is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Manifest {
    /// Sum of all layer sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.layers.iter().map(|l| l.size).sum()
    }
}

/// Result of `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub project: Vec<Record>,
    #[serde(default)]
    pub repository: Vec<Record>,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Everything the commands need from a Harbor registry.
///
/// Calls are blocking and issued strictly one after another; any
/// non-success response comes back as an [`ApiError`].
pub trait RegistryApi {
    /// Authenticate and return the session id, if the registry issued one.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` when the credentials are rejected.
    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn list_users(&self) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure, including 404 for an unknown ID.
    fn get_user(&self, id: u64) -> Result<Record, ApiError>;

    /// # Errors
    ///
    /// Any transport failure, including 409 for a duplicate username.
    fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn delete_user(&self, id: u64) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn list_projects(&self) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn delete_project(&self, id: u64) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn list_repositories(&self, project_id: u64) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn list_tags(&self, repository: &str) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn get_manifest(&self, repository: &str, tag: &str) -> Result<Manifest, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn get_top_accessed(&self, count: u32) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn search(&self, query: &str) -> Result<SearchResults, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn list_logs(&self) -> Result<Vec<Record>, ApiError>;

    /// # Errors
    ///
    /// Any transport failure.
    fn statistics(&self) -> Result<Record, ApiError>;
}
