/// `user-*` commands.
use crate::api::{NewUser, RegistryApi};
use crate::cli::OutputCtx;
use crate::cli::args::{UserArgs, UserCreateArgs, UserListArgs};
use crate::cli::output::{Formatters, write_dict, write_list, write_message};
use crate::harbor::{HarborError, resolve_user};

const USER_FIELDS: &[&str] = &["user_id", "username", "email", "realname", "comment"];

/// Run `harbor user-list`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the listing fails.
pub fn list(args: &UserListArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let users = api.list_users()?;
    write_list(&users, USER_FIELDS, &Formatters::new(), &args.sortby, ctx);
    Ok(())
}

/// Run `harbor user-show`.
///
/// # Errors
///
/// Returns `HarborError` if the name does not resolve or a call fails.
pub fn show(args: &UserArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let id = resolve_user(api, &args.user)?;
    let user = api.get_user(id)?;
    write_dict(&user, ctx);
    Ok(())
}

/// Run `harbor user-create`.
///
/// # Errors
///
/// Returns `HarborError::Api` if the registry rejects the user.
pub fn create(
    args: &UserCreateArgs,
    api: &dyn RegistryApi,
    ctx: &OutputCtx,
) -> Result<(), HarborError> {
    let user = NewUser {
        username: args.username.clone(),
        password: args.password.clone(),
        email: args.email.clone(),
        realname: args.realname.clone(),
        comment: args.comment.clone(),
    };
    api.create_user(&user)?;
    write_message(&format!("Create user '{}' successfully.", args.username), ctx);
    Ok(())
}

/// Run `harbor user-delete`.
///
/// # Errors
///
/// Returns `HarborError` if the name does not resolve or the delete fails.
pub fn delete(args: &UserArgs, api: &dyn RegistryApi, ctx: &OutputCtx) -> Result<(), HarborError> {
    let id = resolve_user(api, &args.user)?;
    api.delete_user(id)?;
    write_message(&format!("Delete user '{}' successfully.", args.user), ctx);
    Ok(())
}
