mod cli;
mod commands;
mod error;
mod shell;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::debug!(error = ?err, "invocation failed");
        report(&err);
        std::process::exit(exit_code::FAILURE);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print `Error: <message>` plus the diagnostic's help line, if any.
fn report(err: &CliError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        for line in help.to_string().lines() {
            eprintln!("  help: {line}");
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(circuits_config::default_config_path);

    // Usage errors come before anything touches the filesystem
    let action = commands::plan(cli)?;

    let config = circuits_config::load_connect_config(&config_path)?;

    tracing::debug!(?action, cache = %config.cache_file.display(), "dispatching");
    commands::dispatch(action, &config).await
}
