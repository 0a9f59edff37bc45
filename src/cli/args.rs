/// CLI argument definitions via clap derive.
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_TIMEOUT_SECS;

/// harbor — manage users, projects and repositories of a Harbor registry.
#[derive(Debug, Parser)]
#[command(
    name = "harbor",
    about = "Manage users, projects and repositories of a Harbor registry from the CLI",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Comma-separated field names to include in list output, replacing the
    /// command's default columns.
    #[arg(long, global = true, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Log every API request to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where and how to reach the registry.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Base URL of the Harbor instance.
    #[arg(
        long = "os-baseurl",
        id = "os-baseurl",
        env = "HARBOR_URL",
        global = true,
        value_name = "URL",
        default_value = "http://localhost"
    )]
    pub base_url: String,

    /// Username to log in with before running the command.
    #[arg(
        long = "os-username",
        id = "os-username",
        env = "HARBOR_USERNAME",
        global = true,
        value_name = "USER"
    )]
    pub username: Option<String>,

    /// Password for --os-username.
    #[arg(
        long = "os-password",
        id = "os-password",
        env = "HARBOR_PASSWORD",
        global = true,
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Default project (ID or name) for `list` and `show`.
    #[arg(
        long = "os-project",
        id = "os-project",
        env = "HARBOR_PROJECT",
        global = true,
        value_name = "PROJECT"
    )]
    pub project: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, env = "HARBOR_INSECURE", global = true)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "HARBOR_TIMEOUT",
        global = true,
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout: u64,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON array or object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and print the session id.
    Login(LoginArgs),
    /// List users.
    UserList(UserListArgs),
    /// Show details about a user.
    UserShow(UserArgs),
    /// Create a new user.
    UserCreate(UserCreateArgs),
    /// Delete a user.
    UserDelete(UserArgs),
    /// List projects.
    ProjectList(ProjectListArgs),
    /// Show details about a project.
    ProjectShow(ProjectArgs),
    /// Delete a project.
    ProjectDelete(ProjectArgs),
    /// List repositories of a project, one row per tag, with image sizes.
    List(ListArgs),
    /// List tags of a repository.
    ListTags(ListTagsArgs),
    /// Show details about a repository and one of its tags.
    Show(ShowArgs),
    /// List the most pulled repositories.
    Top(TopArgs),
    /// Search projects and repositories by name.
    Search(SearchArgs),
    /// Show registry statistics.
    Info,
    /// List audit logs.
    Logs(LogsArgs),
}

/// Arguments for `harbor user-list`.
#[derive(Debug, Parser)]
pub struct UserListArgs {
    /// Sort key.
    #[arg(long, value_name = "FIELD", default_value = "user_id")]
    pub sortby: String,
}

/// Arguments for `harbor project-list`.
#[derive(Debug, Parser)]
pub struct ProjectListArgs {
    /// Sort key.
    #[arg(long, value_name = "FIELD", default_value = "project_id")]
    pub sortby: String,
}

/// Arguments for `harbor logs`.
#[derive(Debug, Parser)]
pub struct LogsArgs {
    /// Sort key.
    #[arg(long, value_name = "FIELD", default_value = "op_time")]
    pub sortby: String,
}

/// Arguments for `harbor login`.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Username.
    #[arg(long, env = "HARBOR_USERNAME", value_name = "USERNAME")]
    pub username: String,

    /// Password.
    #[arg(long, env = "HARBOR_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// A user given by ID or name.
#[derive(Debug, Parser)]
pub struct UserArgs {
    /// ID or name of user.
    #[arg(value_name = "USER")]
    pub user: String,
}

/// Arguments for `harbor user-create`.
#[derive(Debug, Parser)]
pub struct UserCreateArgs {
    /// Unique name of the new user.
    #[arg(long, value_name = "USERNAME")]
    pub username: String,

    /// Password of the new user.
    #[arg(long, value_name = "PASSWORD")]
    pub password: String,

    /// Email of the new user.
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Real name of the new user.
    #[arg(long, value_name = "REALNAME")]
    pub realname: Option<String>,

    /// Comment on the new user.
    #[arg(long, value_name = "COMMENT")]
    pub comment: Option<String>,
}

/// A project given by ID or name.
#[derive(Debug, Parser)]
pub struct ProjectArgs {
    /// ID or name of project.
    #[arg(value_name = "PROJECT")]
    pub project: String,
}

/// Arguments for `harbor list`.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// ID or name of project. Defaults to --os-project.
    #[arg(long, short = 'p', value_name = "PROJECT")]
    pub project_id: Option<String>,

    /// Sort key.
    #[arg(long, value_name = "FIELD", default_value = "id")]
    pub sortby: String,

    /// Print sizes as KiB/MiB/GiB instead of bytes.
    #[arg(long)]
    pub human_size: bool,
}

/// Arguments for `harbor list-tags`.
#[derive(Debug, Parser)]
pub struct ListTagsArgs {
    /// Full repository name, e.g. library/ubuntu.
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,
}

/// Arguments for `harbor show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// ID or name of project. Defaults to --os-project.
    #[arg(long, short = 'p', value_name = "PROJECT")]
    pub project_id: Option<String>,

    /// Repository reference, for example: int32bit/ubuntu:14.04.
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,
}

/// Arguments for `harbor top`.
#[derive(Debug, Parser)]
pub struct TopArgs {
    /// Number of repositories to show.
    #[arg(long, short = 'c', value_name = "COUNT", default_value = "5")]
    pub count: u32,
}

/// Arguments for `harbor search`.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search parameter for project and repository names.
    pub query: String,
}
