/// Errors from the Harbor REST API layer.
use thiserror::Error;

/// Typed errors from the transport layer.
///
/// Every variant means the call did not produce a usable response; callers
/// propagate these unchanged and never retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed (bad TLS setup, etc.).
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (DNS, connect, timeout).
    #[error("request to {url} failed: {source}")]
    Request {
        /// Full request URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("{url} returned HTTP {status}{}", fmt_body(body))]
    Status {
        /// Full request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        /// Full request URL.
        url: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

fn fmt_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl ApiError {
    /// HTTP status code, if the registry answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
