/// Connection settings collected from global flags and their `HARBOR_*`
/// environment fallbacks.
use std::time::Duration;

use crate::cli::args::ConnectionArgs;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to talk to one Harbor instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the registry, e.g. `https://harbor.example.com`.
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Default project (ID or name) for repository commands.
    pub project: Option<String>,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Construct from CLI args.
    #[must_use]
    pub fn from_args(args: &ConnectionArgs) -> Self {
        Self {
            base_url: args.base_url.trim_end_matches('/').to_owned(),
            username: args.username.clone().filter(|u| !u.is_empty()),
            password: args.password.clone(),
            project: args.project.clone().filter(|p| !p.is_empty()),
            insecure: args.insecure,
            timeout: Duration::from_secs(args.timeout),
        }
    }

    /// Username and password, when both are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_owned(),
            username: None,
            password: None,
            project: None,
            insecure: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            base_url: "https://harbor.example.com/".to_owned(),
            username: Some("admin".to_owned()),
            password: Some("Harbor12345".to_owned()),
            project: Some(String::new()),
            insecure: true,
            timeout: 5,
        }
    }

    #[test]
    fn test_from_args_normalizes() {
        let config = ClientConfig::from_args(&args());
        assert_eq!(config.base_url, "https://harbor.example.com");
        assert_eq!(config.project, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.insecure);
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let mut config = ClientConfig::from_args(&args());
        assert_eq!(config.credentials(), Some(("admin", "Harbor12345")));
        config.password = None;
        assert_eq!(config.credentials(), None);
    }
}
