/// `logs` command: audit log listing.
use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::args::LogsArgs;
use crate::cli::output::{Formatters, write_list};
use crate::harbor::{HarborError, logs_with_repository};

const LOG_FIELDS: &[&str] = &[
    "log_id",
    "op_time",
    "username",
    "project_id",
    "operation",
    "repository",
];

/// Run `harbor logs`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the listing fails.
pub fn run(args: &LogsArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let logs = logs_with_repository(api)?;
    write_list(&logs, LOG_FIELDS, &Formatters::new(), &args.sortby, ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::fake::{FakeApi, record};
    use crate::commands::testing::ctx;

    #[test]
    fn test_logs_failure_propagates() {
        let api = FakeApi {
            fail: Some("list_logs"),
            ..FakeApi::default()
        };
        let args = LogsArgs {
            sortby: "op_time".to_owned(),
        };
        assert!(matches!(run(&args, &api, &ctx()), Err(HarborError::Api(_))));
    }

    #[test]
    fn test_logs_listing() {
        let api = FakeApi {
            logs: vec![record(json!({
                "log_id": 1,
                "op_time": "2017-09-01T08:00:00Z",
                "repo_name": "acme/app",
                "repo_tag": "v1"
            }))],
            ..FakeApi::default()
        };
        let args = LogsArgs {
            sortby: "op_time".to_owned(),
        };
        run(&args, &api, &ctx()).unwrap();
        assert_eq!(api.calls("list_logs"), 1);
    }
}
