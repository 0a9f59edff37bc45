/// Blocking HTTP implementation of [`RegistryApi`] over the Harbor v1 REST API.
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::ApiError;
use super::{Manifest, NewUser, Record, RegistryApi, SearchResults};
use crate::config::ClientConfig;

/// Name of the session cookie Harbor sets on `/login`.
pub const SESSION_COOKIE: &str = "beegosessionID";

/// `GET /api/repositories/{repo}/tags/{tag}/manifest` wraps the manifest.
#[derive(serde::Deserialize)]
struct ManifestEnvelope {
    manifest: Manifest,
}

/// A session against one Harbor instance.
///
/// The cookie store keeps the session cookie from [`RegistryApi::login`] and
/// sends it with every later request.
pub struct HarborClient {
    http: Client,
    base_url: String,
}

impl HarborClient {
    /// Build an unauthenticated client.
    ///
    /// # Errors
    ///
    /// `ApiError::Client` if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Build a client and log in when credentials are configured.
    ///
    /// # Errors
    ///
    /// Client construction failures, or a rejected login.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Self::new(config)?;
        if let Some((username, password)) = config.credentials() {
            client.login(username, password)?;
        } else {
            debug!("no credentials configured, continuing anonymously");
        }
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn send(url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().map_err(|source| ApiError::Request {
            url: url.to_owned(),
            source,
        })?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "harbor api response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
            body,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(method = "GET", %url, "harbor api request");
        let response = Self::send(&url, self.http.get(&url).query(query))?;
        let body = response.text().map_err(|source| ApiError::Request {
            url: url.clone(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }

    /// Harbor answers `null` instead of `[]` for some empty collections.
    fn get_list(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Record>, ApiError> {
        self.get_json::<Option<Vec<Record>>>(path, query)
            .map(Option::unwrap_or_default)
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(method = "DELETE", %url, "harbor api request");
        Self::send(&url, self.http.delete(&url)).map(drop)
    }
}

impl RegistryApi for HarborClient {
    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError> {
        let url = self.url("/login");
        debug!(method = "POST", %url, username, "harbor api request");
        let request = self
            .http
            .post(&url)
            .form(&[("principal", username), ("password", password)]);
        let response = Self::send(&url, request)?;
        Ok(response
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_owned()))
    }

    fn list_users(&self) -> Result<Vec<Record>, ApiError> {
        self.get_list("/api/users", &[])
    }

    fn get_user(&self, id: u64) -> Result<Record, ApiError> {
        self.get_json(&format!("/api/users/{id}"), &[])
    }

    fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let url = self.url("/api/users");
        debug!(method = "POST", %url, username = %user.username, "harbor api request");
        Self::send(&url, self.http.post(&url).json(user)).map(drop)
    }

    fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/api/users/{id}"))
    }

    fn list_projects(&self) -> Result<Vec<Record>, ApiError> {
        self.get_list("/api/projects", &[])
    }

    fn delete_project(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/api/projects/{id}"))
    }

    fn list_repositories(&self, project_id: u64) -> Result<Vec<Record>, ApiError> {
        self.get_list("/api/repositories", &[("project_id", project_id.to_string())])
    }

    fn list_tags(&self, repository: &str) -> Result<Vec<Record>, ApiError> {
        self.get_list(&format!("/api/repositories/{repository}/tags"), &[])
    }

    fn get_manifest(&self, repository: &str, tag: &str) -> Result<Manifest, ApiError> {
        self.get_json::<ManifestEnvelope>(
            &format!("/api/repositories/{repository}/tags/{tag}/manifest"),
            &[],
        )
        .map(|envelope| envelope.manifest)
    }

    fn get_top_accessed(&self, count: u32) -> Result<Vec<Record>, ApiError> {
        self.get_list("/api/repositories/top", &[("count", count.to_string())])
    }

    fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.get_json("/api/search", &[("q", query.to_owned())])
    }

    fn list_logs(&self) -> Result<Vec<Record>, ApiError> {
        self.get_list("/api/logs", &[])
    }

    fn statistics(&self) -> Result<Record, ApiError> {
        self.get_json("/api/statistics", &[])
    }
}
