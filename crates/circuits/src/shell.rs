//! Hands the resolved command line to the system shell.

use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::CliError;

/// Run `line` through `sh -c` with inherited stdio and wait for it.
pub fn run(line: &str) -> Result<ExitStatus, CliError> {
    debug!(command = line, "executing");

    Command::new("sh")
        .arg("-c")
        .arg(line)
        .status()
        .map_err(|source| CliError::Shell {
            command: line.to_owned(),
            source,
        })
}
