#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! harbor — manage users, projects and repositories of a Harbor registry.

mod api;
mod cli;
mod commands;
mod config;
mod harbor;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::HarborClient;
use cli::args::Command;
use cli::{Cli, OutputCtx, write_error};
use config::ClientConfig;
use harbor::HarborError;
use types::ErrorOutput;

/// Logs go to stderr; `RUST_LOG` overrides `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "harbor=debug" } else { "harbor=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, config: &ClientConfig, ctx: &OutputCtx) -> Result<(), HarborError> {
    // `login` authenticates itself; everything else logs in up front.
    let client = if matches!(cli.command, Command::Login(_)) {
        HarborClient::new(config)?
    } else {
        HarborClient::connect(config)?
    };
    commands::dispatch(&cli.command, &client, config, ctx)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.fields.as_deref(), cli.no_header);
    let config = ClientConfig::from_args(&cli.connection);

    match run(&cli, &config, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_harbor_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
