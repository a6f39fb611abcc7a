//! Default mode: resolve one device and connect to it.

use tracing::{debug, warn};

use circuits_core::{CacheStore, CommandBuilder, ConnectConfig, Resolver};

use crate::error::CliError;
use crate::shell;

pub fn handle(
    config: &ConnectConfig,
    query: &str,
    client: Option<&str>,
    print_only: bool,
) -> Result<(), CliError> {
    let snapshot = CacheStore::new(&config.cache_file).load()?;
    let device = Resolver::new(&snapshot).find_device(query, client)?;
    let command = CommandBuilder::new(config).build(device)?;

    debug!(
        device = %device.full_name,
        user = %command.user,
        protocol = %command.protocol,
        "resolved device"
    );

    if print_only {
        println!("{}", command.line);
        return Ok(());
    }

    let status = shell::run(&command.line)?;
    if !status.success() {
        warn!(%status, command = %command.line, "connect command exited unsuccessfully");
    }
    Ok(())
}
