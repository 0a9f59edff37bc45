/// `login` command: authenticate and report the session id.
use tracing::warn;

use crate::api::RegistryApi;
use crate::cli::OutputCtx;
use crate::cli::args::LoginArgs;
use crate::cli::output::write_message;
use crate::harbor::HarborError;

/// Run `harbor login`.
///
/// A rejected login is reported, not raised.
///
/// # Errors
///
/// Returns `HarborError::Api` if the registry could not be reached.
pub fn run(args: &LoginArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    match api.login(&args.username, &args.password) {
        Ok(session) => {
            let session = session.unwrap_or_default();
            write_message(&format!("Successfully login, session id: {session}"), ctx);
        }
        Err(err) if err.status().is_some() => {
            warn!(error = %err, "login rejected");
            write_message(
                "Failed to login! Please re-check your username and password",
                ctx,
            );
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::commands::testing::ctx;

    fn args(username: &str, password: &str) -> LoginArgs {
        LoginArgs {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn test_login_success() {
        let api = FakeApi::default();
        run(&args("admin", "Harbor12345"), &api, &ctx()).unwrap();
        assert_eq!(api.calls("login"), 1);
    }

    #[test]
    fn test_rejected_login_is_not_an_error() {
        let api = FakeApi::default();
        assert!(run(&args("admin", "wrong"), &api, &ctx()).is_ok());
    }
}
