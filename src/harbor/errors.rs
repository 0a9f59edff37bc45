/// Errors from the reference-resolution and aggregation layer.
use thiserror::Error;

use super::resolve::ResourceKind;
use crate::api::ApiError;

/// Errors that abort the current command.
///
/// A repository or tag that does not exist is *not* an error; see
/// [`super::aggregate::Lookup`].
#[derive(Debug, Error)]
pub enum HarborError {
    /// The repository reference was an empty string.
    #[error("Repository reference cannot be empty")]
    EmptyReference,

    /// A named user or project did not match any entry.
    #[error("No {kind} with a name or ID of '{token}' exists")]
    NotFound {
        /// Which collection was searched.
        kind: ResourceKind,
        /// The name the user passed.
        token: String,
    },

    /// A project ID resolved but the project is not in the listing.
    #[error("Project '{token}' not found")]
    ProjectNotFound {
        /// The ID or name the user passed.
        token: String,
    },

    /// A record came back without the numeric ID field we key on.
    #[error("{kind} record has no numeric '{field}' field")]
    InvalidRecord {
        kind: ResourceKind,
        field: &'static str,
    },

    /// A repository or tag record came back without a string `name`.
    #[error("{kind} record has no 'name' field")]
    UnnamedRecord { kind: &'static str },

    /// A repository command ran with neither `--project-id` nor a default project.
    #[error("No project given; pass --project-id or set HARBOR_PROJECT")]
    MissingProject,

    /// An underlying registry API call failed.
    #[error("Registry API error: {0}")]
    Api(#[from] ApiError),
}

/// Exit code mapping for `HarborError` variants.
impl HarborError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyReference | Self::MissingProject => 2,
            Self::NotFound { .. } | Self::ProjectNotFound { .. } => 4,
            Self::InvalidRecord { .. } | Self::UnnamedRecord { .. } => 1,
            Self::Api(api) => match api.status() {
                Some(401 | 403) => 3,
                _ => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HarborError::NotFound {
            kind: ResourceKind::Project,
            token: "acme".to_owned(),
        };
        assert_eq!(err.to_string(), "No project with a name or ID of 'acme' exists");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_auth_failures_exit_3() {
        let err = HarborError::from(ApiError::Status {
            url: "http://h/api/users".to_owned(),
            status: 401,
            body: String::new(),
        });
        assert_eq!(err.exit_code(), 3);
    }
}
