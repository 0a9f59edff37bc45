/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod info;
pub mod login;
pub mod logs;
pub mod projects;
pub mod repositories;
pub mod search;
pub mod users;

use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::config::ClientConfig;
use crate::harbor::HarborError;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `HarborError` on any command failure.
pub fn dispatch(
    command: &Command,
    api: &dyn RegistryApi,
    config: &ClientConfig,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    match command {
        Command::Login(args) => login::run(args, api, ctx),
        Command::UserList(args) => users::list(args, api, ctx),
        Command::UserShow(args) => users::show(args, api, ctx),
        Command::UserCreate(args) => users::create(args, api, ctx),
        Command::UserDelete(args) => users::delete(args, api, ctx),
        Command::ProjectList(args) => projects::list(args, api, ctx),
        Command::ProjectShow(args) => projects::show(args, api, ctx),
        Command::ProjectDelete(args) => projects::delete(args, api, ctx),
        Command::List(args) => repositories::list(args, api, config, ctx),
        Command::ListTags(args) => repositories::list_tags(args, api, ctx),
        Command::Show(args) => repositories::show(args, api, config, ctx),
        Command::Top(args) => repositories::top(args, api, ctx),
        Command::Search(args) => search::run(args, api, ctx),
        Command::Info => info::run(api, ctx),
        Command::Logs(args) => logs::run(args, api, ctx),
    }
}
