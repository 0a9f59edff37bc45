/// `info` command: registry statistics.
use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::output::write_dict;
use crate::harbor::HarborError;

/// Run `harbor info`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the statistics call fails.
pub fn run(api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let stats = api.statistics()?;
    write_dict(&stats, ctx);
    Ok(())
}
