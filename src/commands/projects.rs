/// `project-*` commands.
use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::args::{ProjectArgs, ProjectListArgs};
use crate::cli::output::{Formatters, write_dict, write_list, write_message};
use crate::harbor::{HarborError, find_project, resolve_project};

const PROJECT_FIELDS: &[&str] = &[
    "project_id",
    "name",
    "owner_id",
    "current_user_role_id",
    "repo_count",
    "creation_time",
    "public",
];

/// Run `harbor project-list`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the listing fails.
pub fn list(
    args: &ProjectListArgs,
    api: &dyn RegistryApi,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let projects = api.list_projects()?;
    write_list(&projects, PROJECT_FIELDS, &Formatters::new(), &args.sortby, ctx);
    Ok(())
}

/// Run `harbor project-show`.
///
/// # Errors
///
/// Returns `HarborError::NotFound` / `ProjectNotFound` for unknown projects.
pub fn show(args: &ProjectArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let project = find_project(api, &args.project)?;
    write_dict(&project, ctx);
    Ok(())
}

/// Run `harbor project-delete`.
///
/// # Errors
///
/// Returns `HarborError` if the name does not resolve or the delete fails.
pub fn delete(
    args: &ProjectArgs,
    api: &dyn RegistryApi,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let id = resolve_project(api, &args.project)?;
    api.delete_project(id)?;
    write_message(&format!("Delete project '{}' successfully.", args.project), ctx);
    Ok(())
}
