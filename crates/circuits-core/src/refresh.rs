// ── Cache refresh ──
//
// Pull a fresh inventory and replace the cache with it. Nothing is merged:
// the previous cache is overwritten only after the fetch and conversion
// both succeed.

use std::path::PathBuf;

use secrecy::SecretString;
use tracing::info;

use circuits_api::{InventoryClient, TransportConfig};

use crate::cache::{CacheSnapshot, CacheStore};
use crate::config::ConnectConfig;
use crate::error::CoreError;

/// What an update wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSummary {
    pub devices: usize,
    pub clients: usize,
    pub path: PathBuf,
}

/// Fetch the inventory with the given credentials and rewrite the cache.
pub async fn update_cache(
    config: &ConnectConfig,
    username: &str,
    password: &SecretString,
) -> Result<CacheSummary, CoreError> {
    let transport = TransportConfig::with_timeout(config.timeout);
    let client = InventoryClient::new(config.inventory_url.clone(), &transport)?;

    let inventory = client.fetch(username, password).await?;
    let snapshot = CacheSnapshot::try_from(inventory)?;

    let store = CacheStore::new(&config.cache_file);
    store.save(&snapshot)?;

    let summary = CacheSummary {
        devices: snapshot.devices.len(),
        clients: snapshot.clients.len(),
        path: config.cache_file.clone(),
    };
    info!(
        devices = summary.devices,
        clients = summary.clients,
        path = %summary.path.display(),
        "cache updated"
    );
    Ok(summary)
}
