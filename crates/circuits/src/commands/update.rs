//! `--update-cache`: refresh the local cache from circuitsmngr.

use secrecy::SecretString;

use circuits_core::{ConnectConfig, update_cache};

use crate::error::CliError;

pub async fn handle(
    config: &ConnectConfig,
    user: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let summary = update_cache(config, user, password).await?;
    println!(
        "cache updated ({} devices, {} clients)",
        summary.devices, summary.clients
    );
    Ok(())
}
