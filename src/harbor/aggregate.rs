/// Listing pipelines that join several dependent API calls into flat rows.
///
/// All calls are issued sequentially; the first failing call aborts the
/// pipeline and its error is returned unchanged.
use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::errors::HarborError;
use super::reference::{DEFAULT_TAG, ResourceRef, ensure_namespace};
use super::resolve::{ResourceKind, record_id, resolve_project};
use crate::api::{Record, RegistryApi};

/// `repo_tag` value Harbor logs use for operations without a tag.
const NO_TAG: &str = "N/A";

/// Prefix for tag fields merged into a repository record.
const TAG_FIELD_PREFIX: &str = "tag_";

fn str_field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// One row per (repository, tag) pair in `project_id`, each carrying the
/// summed layer `size` of that tag's manifest.
///
/// Rows for tags other than `latest` have their `name` rewritten to
/// `name:tag`. Rows come out in API listing order.
///
/// # Errors
///
/// - `HarborError::UnnamedRecord` — a repository or tag without a `name`
/// - `HarborError::Api` — the first failing call
pub fn repositories_with_size(
    api: &dyn RegistryApi,
    project_id: u64,
) -> Result<Vec<Record>, HarborError> {
    let repositories = api.list_repositories(project_id)?;
    debug!(project_id, repositories = repositories.len(), "listed repositories");

    let mut rows = Vec::new();
    for repo in &repositories {
        let name = str_field(repo, "name")
            .ok_or(HarborError::UnnamedRecord { kind: "repository" })?;

        let tags = api.list_tags(name)?;
        debug!(repository = name, tags = tags.len(), "listed tags");

        for tag in &tags {
            let tag_name =
                str_field(tag, "name").ok_or(HarborError::UnnamedRecord { kind: "tag" })?;
            let manifest = api.get_manifest(name, tag_name)?;

            let mut row = repo.clone();
            row.insert("size".to_owned(), Value::from(manifest.total_size()));
            if tag_name != DEFAULT_TAG {
                row.insert("name".to_owned(), Value::from(format!("{name}:{tag_name}")));
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Outcome of an exact repository+tag lookup.
///
/// Missing repositories and tags are normal outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Repository record with the tag's fields merged in under `tag_` keys.
    Found(Record),
    Missing(Miss),
}

/// What an exact lookup failed to find. Displays as the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    Repository { repository: String },
    Tag { repository: String, tag: String },
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository { repository } => write!(f, "Image '{repository}' not found."),
            Self::Tag { repository, tag } => {
                write!(f, "Image '{repository}' with tag '{tag}' not found.")
            }
        }
    }
}

/// Find exactly `reference` (e.g. `acme/app:v2`) in `project_id`.
///
/// # Errors
///
/// - `HarborError::EmptyReference` — empty `reference`
/// - `HarborError::Api` — a listing call failed
pub fn find_repository_tag(
    api: &dyn RegistryApi,
    project_id: u64,
    reference: &str,
) -> Result<Lookup, HarborError> {
    let parsed = ResourceRef::parse(reference)?;
    let full_name = parsed.full_name();
    let repository = ensure_namespace(&full_name).into_owned();
    let tag = parsed.tag;

    let repositories = api.list_repositories(project_id)?;
    let Some(found_repo) = repositories
        .into_iter()
        .find(|r| str_field(r, "name") == Some(repository.as_str()))
    else {
        return Ok(Lookup::Missing(Miss::Repository { repository }));
    };

    let tags = api.list_tags(&repository)?;
    let Some(found_tag) = tags
        .into_iter()
        .find(|t| str_field(t, "name") == Some(tag.as_str()))
    else {
        return Ok(Lookup::Missing(Miss::Tag { repository, tag }));
    };

    let mut merged = found_repo;
    for (key, value) in found_tag {
        merged.insert(format!("{TAG_FIELD_PREFIX}{key}"), value);
    }
    Ok(Lookup::Found(merged))
}

/// All audit log records, each with a `repository` field of `repo_name`
/// plus `:repo_tag` when the log entry has a tag.
///
/// # Errors
///
/// `HarborError::Api` if the listing fails.
pub fn logs_with_repository(api: &dyn RegistryApi) -> Result<Vec<Record>, HarborError> {
    let mut logs = api.list_logs()?;
    for log in &mut logs {
        let mut repository = str_field(log, "repo_name").unwrap_or_default().to_owned();
        if let Some(tag) = str_field(log, "repo_tag").filter(|t| *t != NO_TAG) {
            repository.push(':');
            repository.push_str(tag);
        }
        log.insert("repository".to_owned(), Value::from(repository));
    }
    Ok(logs)
}

/// Resolve `token` and return that project's record from the full listing.
///
/// # Errors
///
/// - `HarborError::NotFound` — a name matched nothing
/// - `HarborError::ProjectNotFound` — the ID is not in the listing
/// - `HarborError::Api` — a listing call failed
pub fn find_project(api: &dyn RegistryApi, token: &str) -> Result<Record, HarborError> {
    let project_id = resolve_project(api, token)?;
    let projects = api.list_projects()?;
    for project in projects {
        if record_id(ResourceKind::Project, &project).ok() == Some(project_id) {
            return Ok(project);
        }
    }
    Err(HarborError::ProjectNotFound {
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::api::fake::{FakeApi, manifest, record};

    fn repo(id: u64, name: &str) -> Record {
        record(json!({
            "id": id,
            "name": name,
            "project_id": 2,
            "tags_count": 2,
            "star_count": 0,
            "pull_count": 5,
            "update_time": "2017-09-01T00:00:00Z"
        }))
    }

    fn tag(name: &str) -> Record {
        record(json!({ "name": name, "author": "ops", "os": "linux" }))
    }

    fn api() -> FakeApi {
        let mut tags = HashMap::new();
        tags.insert("acme/app".to_owned(), vec![tag("latest"), tag("v2")]);
        tags.insert("acme/db".to_owned(), vec![tag("9.6")]);

        let mut manifests = HashMap::new();
        manifests.insert(("acme/app".to_owned(), "latest".to_owned()), manifest(&[10, 20]));
        manifests.insert(("acme/app".to_owned(), "v2".to_owned()), manifest(&[5]));
        manifests.insert(("acme/db".to_owned(), "9.6".to_owned()), manifest(&[]));

        FakeApi {
            repositories: vec![repo(1, "acme/app"), repo(2, "acme/db")],
            tags,
            manifests,
            ..FakeApi::default()
        }
    }

    #[test]
    fn test_one_row_per_tag_with_size() {
        let api = api();
        let rows = repositories_with_size(&api, 2).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| str_field(r, "name").unwrap()).collect();
        assert_eq!(names, ["acme/app", "acme/app:v2", "acme/db:9.6"]);
        assert_eq!(rows[0]["size"], 30);
        assert_eq!(rows[1]["size"], 5);
        assert_eq!(rows[2]["size"], 0);
        assert_eq!(rows[1]["id"], 1);
        assert_eq!(api.calls("list_repositories"), 1);
        assert_eq!(api.calls("list_tags"), 2);
        assert_eq!(api.calls("get_manifest"), 3);
    }

    #[test]
    fn test_rows_are_independent_copies() {
        let mut api = api();
        api.tags
            .insert("acme/app".to_owned(), vec![tag("v1"), tag("v2")]);
        api.manifests
            .insert(("acme/app".to_owned(), "v1".to_owned()), manifest(&[1]));
        let rows = repositories_with_size(&api, 2).unwrap();
        assert_eq!(rows[0]["name"], "acme/app:v1");
        assert_eq!(rows[1]["name"], "acme/app:v2");
        assert_eq!(api.repositories[0]["name"], "acme/app");
    }

    #[test]
    fn test_other_projects_are_excluded() {
        let api = api();
        assert!(repositories_with_size(&api, 3).unwrap().is_empty());
        assert_eq!(api.calls("list_tags"), 0);
    }

    #[test]
    fn test_manifest_failure_aborts_pipeline() {
        let api = FakeApi {
            fail: Some("get_manifest"),
            ..api()
        };
        let err = repositories_with_size(&api, 2).unwrap_err();
        assert!(matches!(err, HarborError::Api(_)));
        assert_eq!(api.calls("get_manifest"), 1);
        assert_eq!(api.calls("list_tags"), 1);
    }

    #[test]
    fn test_repository_without_name_is_rejected() {
        let mut api = api();
        api.repositories
            .push(record(json!({ "id": 3, "project_id": 2 })));
        let err = repositories_with_size(&api, 2).unwrap_err();
        assert!(matches!(
            err,
            HarborError::UnnamedRecord { kind: "repository" }
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_tag_without_name_is_rejected() {
        let mut api = api();
        api.tags.insert(
            "acme/app".to_owned(),
            vec![tag("latest"), record(json!({ "digest": "sha256:abc" }))],
        );
        let err = repositories_with_size(&api, 2).unwrap_err();
        assert!(matches!(err, HarborError::UnnamedRecord { kind: "tag" }));
        assert_eq!(api.calls("get_manifest"), 1);
        assert_eq!(api.calls("list_tags"), 1);
    }

    #[test]
    fn test_lookup_merges_tag_fields() {
        let api = api();
        let Lookup::Found(row) = find_repository_tag(&api, 2, "acme/app:v2").unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(row["name"], "acme/app");
        assert_eq!(row["tag_name"], "v2");
        assert_eq!(row["tag_author"], "ops");
        assert_eq!(row["id"], 1);
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys.last(), Some(&"tag_os"));
    }

    #[test]
    fn test_lookup_defaults_tag_to_latest() {
        let api = api();
        let found = find_repository_tag(&api, 2, "acme/app").unwrap();
        assert!(matches!(found, Lookup::Found(ref r) if r["tag_name"] == "latest"));
    }

    #[test]
    fn test_lookup_missing_repository() {
        let api = api();
        let outcome = find_repository_tag(&api, 2, "ubuntu").unwrap();
        let Lookup::Missing(miss) = outcome else {
            panic!("expected a miss");
        };
        assert_eq!(
            miss,
            Miss::Repository {
                repository: "library/ubuntu".to_owned()
            }
        );
        assert_eq!(miss.to_string(), "Image 'library/ubuntu' not found.");
        assert_eq!(api.calls("list_tags"), 0);
    }

    #[test]
    fn test_lookup_missing_tag() {
        let mut api = api();
        api.tags
            .insert("acme/app".to_owned(), vec![tag("latest"), tag("v1-rc")]);
        let outcome = find_repository_tag(&api, 2, "acme/app:v1").unwrap();
        let Lookup::Missing(miss) = outcome else {
            panic!("expected a miss");
        };
        assert_eq!(miss.to_string(), "Image 'acme/app' with tag 'v1' not found.");
        assert_eq!(api.calls("list_tags"), 1);
    }

    #[test]
    fn test_lookup_empty_reference() {
        let api = api();
        let err = find_repository_tag(&api, 2, "").unwrap_err();
        assert!(matches!(err, HarborError::EmptyReference));
        assert_eq!(api.calls("list_repositories"), 0);
    }

    #[test]
    fn test_logs_repository_field() {
        let api = FakeApi {
            logs: vec![
                record(json!({ "log_id": 1, "repo_name": "acme/app", "repo_tag": "v2" })),
                record(json!({ "log_id": 2, "repo_name": "acme/app", "repo_tag": "N/A" })),
                record(json!({ "log_id": 3, "repo_name": "acme/db" })),
            ],
            ..FakeApi::default()
        };
        let logs = logs_with_repository(&api).unwrap();
        assert_eq!(logs[0]["repository"], "acme/app:v2");
        assert_eq!(logs[1]["repository"], "acme/app");
        assert_eq!(logs[2]["repository"], "acme/db");
        assert_eq!(logs[0]["repo_tag"], "v2");
    }

    #[test]
    fn test_find_project_by_name_and_id() {
        let api = FakeApi {
            projects: vec![
                record(json!({ "project_id": 1, "name": "library" })),
                record(json!({ "project_id": 2, "name": "acme" })),
            ],
            ..FakeApi::default()
        };
        assert_eq!(find_project(&api, "acme").unwrap()["project_id"], 2);
        assert_eq!(find_project(&api, "1").unwrap()["name"], "library");
        assert!(matches!(
            find_project(&api, "5"),
            Err(HarborError::ProjectNotFound { .. })
        ));
        assert!(matches!(
            find_project(&api, "nope"),
            Err(HarborError::NotFound { .. })
        ));
    }
}
