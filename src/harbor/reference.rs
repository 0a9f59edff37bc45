/// Repository reference parsing: `ubuntu`, `acme/app`, `acme/app:v2`.
///
/// Parsing is purely syntactic and never touches the network:
///
/// 1. Everything after the **first** `:` is the tag (default `latest`).
/// 2. In the part before it, everything before the **first** `/` is the
///    namespace (default `library`); the rest, slashes included, is the
///    repository name.
use std::borrow::Cow;
use std::fmt;

use super::errors::HarborError;

/// Namespace assumed when a reference has no `/`.
pub const DEFAULT_NAMESPACE: &str = "library";

/// Tag assumed when a reference has no `:`.
pub const DEFAULT_TAG: &str = "latest";

/// A parsed repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Project-scoping prefix, e.g. `library`.
    pub namespace: String,
    /// Repository name without the namespace.
    pub repository: String,
    pub tag: String,
}

impl ResourceRef {
    /// Parse a raw reference string.
    ///
    /// # Errors
    ///
    /// `HarborError::EmptyReference` if `raw` is empty.
    pub fn parse(raw: &str) -> Result<Self, HarborError> {
        if raw.is_empty() {
            return Err(HarborError::EmptyReference);
        }

        let (repo_part, tag) = raw.split_once(':').unwrap_or((raw, DEFAULT_TAG));
        let (namespace, repository) = repo_part
            .split_once('/')
            .unwrap_or((DEFAULT_NAMESPACE, repo_part));

        Ok(Self {
            namespace: namespace.to_owned(),
            repository: repository.to_owned(),
            tag: tag.to_owned(),
        })
    }

    /// `namespace/repository`, the name Harbor lists repositories under.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.repository)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.namespace, self.repository, self.tag)
    }
}

/// Prefix `library/` onto a repository name that has no namespace.
///
/// Names that already contain a `/` are returned as-is (zero allocation), so
/// applying this twice is the same as applying it once.
#[must_use]
pub fn ensure_namespace(name: &str) -> Cow<'_, str> {
    if name.contains('/') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{DEFAULT_NAMESPACE}/{name}"))
    }
}
