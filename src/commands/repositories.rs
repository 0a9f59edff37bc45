/// Repository commands: `list`, `list-tags`, `show`, `top`.
use tracing::debug;

use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::args::{ListArgs, ListTagsArgs, ShowArgs, TopArgs};
use crate::cli::output::{
    Formatter, Formatters, format_bytes, write_dict, write_list, write_message,
};
use crate::config::ClientConfig;
use crate::harbor::{
    HarborError, Lookup, find_repository_tag, repositories_with_size, resolve_project,
};

const REPOSITORY_FIELDS: &[&str] = &[
    "id",
    "name",
    "project_id",
    "size",
    "tags_count",
    "star_count",
    "pull_count",
    "update_time",
];

const TAG_FIELDS: &[&str] = &[
    "name",
    "author",
    "architecture",
    "os",
    "docker_version",
    "created",
];

const TOP_FIELDS: &[&str] = &["name", "pull_count", "star_count"];

/// `--project-id` if given, else the configured default, resolved to an ID.
fn project_id(
    api: &dyn RegistryApi,
    flag: Option<&str>,
    config: &ClientConfig,
) -> Result<u64, HarborError> {
    let token = flag
        .or(config.project.as_deref())
        .ok_or(HarborError::MissingProject)?;
    resolve_project(api, token)
}

/// Run `harbor list`.
///
/// # Errors
///
/// Returns `HarborError` if no project is given, it does not resolve, or any
/// call in the repository → tags → manifest chain fails.
pub fn list(
    args: &ListArgs,
    api: &dyn RegistryApi,
    config: &ClientConfig,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let project_id = project_id(api, args.project_id.as_deref(), config)?;
    let rows = repositories_with_size(api, project_id)?;
    debug!(project_id, rows = rows.len(), "aggregated repository rows");

    let mut formatters = Formatters::new();
    if args.human_size {
        formatters.insert("size", format_bytes as Formatter);
    }
    write_list(&rows, REPOSITORY_FIELDS, &formatters, &args.sortby, ctx);
    Ok(())
}

/// Run `harbor list-tags`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the listing fails.
pub fn list_tags(
    args: &ListTagsArgs,
    api: &dyn RegistryApi,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let tags = api.list_tags(&args.repository)?;
    write_list(&tags, TAG_FIELDS, &Formatters::new(), "name", ctx);
    Ok(())
}

/// Run `harbor show`.
///
/// A missing repository or tag prints a message and succeeds.
///
/// # Errors
///
/// Returns `HarborError` for an empty reference, an unresolvable project, or
/// a failed call.
pub fn show(
    args: &ShowArgs,
    api: &dyn RegistryApi,
    config: &ClientConfig,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let project_id = project_id(api, args.project_id.as_deref(), config)?;
    let lookup = find_repository_tag(api, project_id, &args.repository)?;
    match lookup {
        Lookup::Found(record) => write_dict(&record, ctx),
        Lookup::Missing(miss) => write_message(&miss.to_string(), ctx),
    }
    Ok(())
}

/// Run `harbor top`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the listing fails.
pub fn top(args: &TopArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let repositories = api.get_top_accessed(args.count)?;
    write_list(&repositories, TOP_FIELDS, &Formatters::new(), "pull_count", ctx);
    Ok(())
}
