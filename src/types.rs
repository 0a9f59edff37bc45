/// Shared serializable output types.
use serde::{Deserialize, Serialize};

use crate::harbor::HarborError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status of the failed API call, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorOutput {
    /// Construct from a `HarborError`.
    #[must_use]
    pub fn from_harbor_error(err: &HarborError) -> Self {
        let (code, status) = match err {
            HarborError::EmptyReference => ("empty_reference", None),
            HarborError::NotFound { .. } => ("not_found", None),
            HarborError::ProjectNotFound { .. } => ("project_not_found", None),
            HarborError::InvalidRecord { .. } | HarborError::UnnamedRecord { .. } => {
                ("invalid_record", None)
            }
            HarborError::MissingProject => ("missing_project", None),
            HarborError::Api(api) => ("transport_error", api.status()),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                status,
            },
        }
    }
}
