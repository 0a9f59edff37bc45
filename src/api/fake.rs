/// In-memory [`RegistryApi`] for tests. Records how often each method ran.
use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::errors::ApiError;
use super::{Manifest, NewUser, Record, RegistryApi, SearchResults};

/// Turn a `json!({...})` literal into a [`Record`].
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A manifest with the given layer sizes.
pub fn manifest(sizes: &[u64]) -> Manifest {
    let layers: Vec<Value> = sizes.iter().map(|s| serde_json::json!({ "size": s })).collect();
    serde_json::from_value(serde_json::json!({ "layers": layers })).unwrap()
}

fn not_found(path: &str) -> ApiError {
    ApiError::Status {
        url: format!("fake://{path}"),
        status: 404,
        body: String::new(),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub users: Vec<Record>,
    pub projects: Vec<Record>,
    /// All repositories; filtered by their `project_id` field on listing.
    pub repositories: Vec<Record>,
    pub tags: HashMap<String, Vec<Record>>,
    pub manifests: HashMap<(String, String), Manifest>,
    pub top: Vec<Record>,
    pub search: SearchResults,
    pub logs: Vec<Record>,
    pub stats: Record,
    /// Method name that answers HTTP 500 instead of succeeding.
    pub fail: Option<&'static str>,
    pub created: RefCell<Vec<NewUser>>,
    pub deleted: RefCell<Vec<(&'static str, u64)>>,
    pub calls: RefCell<HashMap<&'static str, usize>>,
}

impl FakeApi {
    /// How many times `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.borrow().get(method).copied().unwrap_or(0)
    }

    fn hit(&self, method: &'static str) -> Result<(), ApiError> {
        *self.calls.borrow_mut().entry(method).or_default() += 1;
        if self.fail == Some(method) {
            return Err(ApiError::Status {
                url: format!("fake://{method}"),
                status: 500,
                body: "internal error".to_owned(),
            });
        }
        Ok(())
    }
}

impl RegistryApi for FakeApi {
    fn login(&self, username: &str, password: &str) -> Result<Option<String>, ApiError> {
        self.hit("login")?;
        if username == "admin" && password == "Harbor12345" {
            Ok(Some("session-1".to_owned()))
        } else {
            Err(ApiError::Status {
                url: "fake://login".to_owned(),
                status: 401,
                body: String::new(),
            })
        }
    }

    fn list_users(&self) -> Result<Vec<Record>, ApiError> {
        self.hit("list_users")?;
        Ok(self.users.clone())
    }

    fn get_user(&self, id: u64) -> Result<Record, ApiError> {
        self.hit("get_user")?;
        self.users
            .iter()
            .find(|u| u.get("user_id").and_then(Value::as_u64) == Some(id))
            .cloned()
            .ok_or_else(|| not_found(&format!("users/{id}")))
    }

    fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.hit("create_user")?;
        self.created.borrow_mut().push(user.clone());
        Ok(())
    }

    fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.hit("delete_user")?;
        self.deleted.borrow_mut().push(("user", id));
        Ok(())
    }

    fn list_projects(&self) -> Result<Vec<Record>, ApiError> {
        self.hit("list_projects")?;
        Ok(self.projects.clone())
    }

    fn delete_project(&self, id: u64) -> Result<(), ApiError> {
        self.hit("delete_project")?;
        self.deleted.borrow_mut().push(("project", id));
        Ok(())
    }

    fn list_repositories(&self, project_id: u64) -> Result<Vec<Record>, ApiError> {
        self.hit("list_repositories")?;
        Ok(self
            .repositories
            .iter()
            .filter(|r| r.get("project_id").and_then(Value::as_u64) == Some(project_id))
            .cloned()
            .collect())
    }

    fn list_tags(&self, repository: &str) -> Result<Vec<Record>, ApiError> {
        self.hit("list_tags")?;
        Ok(self.tags.get(repository).cloned().unwrap_or_default())
    }

    fn get_manifest(&self, repository: &str, tag: &str) -> Result<Manifest, ApiError> {
        self.hit("get_manifest")?;
        self.manifests
            .get(&(repository.to_owned(), tag.to_owned()))
            .cloned()
            .ok_or_else(|| not_found(&format!("{repository}/tags/{tag}/manifest")))
    }

    fn get_top_accessed(&self, count: u32) -> Result<Vec<Record>, ApiError> {
        self.hit("get_top_accessed")?;
        Ok(self.top.iter().take(count as usize).cloned().collect())
    }

    fn search(&self, _query: &str) -> Result<SearchResults, ApiError> {
        self.hit("search")?;
        Ok(self.search.clone())
    }

    fn list_logs(&self) -> Result<Vec<Record>, ApiError> {
        self.hit("list_logs")?;
        Ok(self.logs.clone())
    }

    fn statistics(&self) -> Result<Record, ApiError> {
        self.hit("statistics")?;
        Ok(self.stats.clone())
    }
}
