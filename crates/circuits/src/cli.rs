//! Clap derive structures for the `c` CLI.
//!
//! Kept free of crate-internal imports so `build.rs` can include it to
//! render the man page.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// c -- connect to a circuitsmngr device by name
#[derive(Debug, Parser)]
#[command(
    name = "c",
    version,
    about = "circuitsmngr device connect utility",
    long_about = "Look up a device in the local circuitsmngr cache and open a \
        connection to it (ssh, telnet or web) using the command template for \
        its protocol.\n\n\
        Refresh the cache first with: c --update-cache -u <user> -p <pass>"
)]
pub struct Cli {
    /// Device query
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    #[command(flatten)]
    pub update: UpdateOpts,

    /// Specify configuration file, defaults to $HOME/.config/c.json
    #[arg(long, value_name = "PATH", env = "CIRCUITS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Specify client/customer
    #[arg(long, short = 'c', value_name = "NAME")]
    pub client: Option<String>,

    /// For use with bash completion to specify what to search
    #[arg(long, value_enum, value_name = "WHAT")]
    pub bash_completion: Option<CompletionTarget>,

    /// Print the connect command instead of running it
    #[arg(long)]
    pub print: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ── Cache update ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Local cache update")]
pub struct UpdateOpts {
    /// Update local device cache and exit
    #[arg(long)]
    pub update_cache: bool,

    /// Specify your circuitsmngr username
    #[arg(long, short = 'u', env = "CIRCUITS_USER")]
    pub user: Option<String>,

    /// Specify your circuitsmngr password
    #[arg(long, short = 'p', env = "CIRCUITS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Completion targets ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionTarget {
    /// Client names
    Client,
    /// Service device names
    Service,
    /// Network device names
    Network,
}
