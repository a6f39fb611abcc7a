//! `--bash-completion`: print matching names, one per line.
//!
//! Listing tolerates a missing or unreadable cache and prints nothing.

use std::io::{self, Write};

use circuits_core::{CacheStore, CompletionMode, ConnectConfig, Resolver};

use crate::error::CliError;

pub fn handle(
    config: &ConnectConfig,
    mode: CompletionMode,
    query: &str,
    client: Option<&str>,
) -> Result<(), CliError> {
    let snapshot = CacheStore::new(&config.cache_file).load_or_empty();
    let matches = Resolver::new(&snapshot).complete(mode, query, client)?;

    tracing::debug!(%mode, count = matches.len(), "completion candidates");

    write_lines(&mut io::stdout().lock(), &matches)
}

fn write_lines<W: Write>(out: &mut W, names: &[&str]) -> Result<(), CliError> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    out.flush()?;
    Ok(())
}
