/// `search` command: find projects and repositories by name.
use std::io::{self, Write};

use crate::api::{RegistryApi, SearchResults};
use crate::cli::OutputCtx;
use crate::cli::args::SearchArgs;
use crate::cli::output::{Formatters, project_rows, render_list, write_json};
use crate::harbor::HarborError;

const PROJECT_FIELDS: &[&str] = &["id", "name", "public"];

const REPOSITORY_FIELDS: &[&str] = &[
    "repository_name",
    "project_name",
    "project_id",
    "project_public",
];

/// Run `harbor search`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the search call fails.
pub fn run(args: &SearchArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let results = api.search(&args.query)?;
    if let Err(e) = render(&mut io::stdout().lock(), &results, ctx) {
        eprintln!("Output error: {e}");
    }
    Ok(())
}

/// Render search hits: one object with both lists in JSON modes, otherwise
/// a counted heading and a table per list.
fn render<W: Write>(out: &mut W, results: &SearchResults, ctx: &OutputCtx) -> io::Result<()> {
    if ctx.is_json() {
        let value = serde_json::json!({
            "project": project_rows(&results.project, PROJECT_FIELDS, "id", ctx),
            "repository": project_rows(
                &results.repository,
                REPOSITORY_FIELDS,
                "repository_name",
                ctx,
            ),
        });
        return write_json(out, &value, ctx.format);
    }

    let none = Formatters::new();
    writeln!(out, "Find {} Projects: ", results.project.len())?;
    render_list(out, &results.project, PROJECT_FIELDS, &none, "id", ctx)?;
    writeln!(out)?;
    writeln!(out, "Find {} Repositories: ", results.repository.len())?;
    render_list(
        out,
        &results.repository,
        REPOSITORY_FIELDS,
        &none,
        "repository_name",
        ctx,
    )
}
