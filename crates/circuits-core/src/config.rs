// ── Runtime configuration ──
//
// Describes where the inventory lives, where the cache goes, and how to
// turn a device into a command line. Core never reads config files: the
// config crate builds a `ConnectConfig` and hands it in.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// circuitsmngr inventory endpoint.
    pub inventory_url: Url,
    /// Cache document location (already home-expanded).
    pub cache_file: PathBuf,
    /// Request timeout for the inventory fetch.
    pub timeout: Duration,
    /// Username used when a device has no override.
    pub fallback_user: String,
    /// Protocol used when a device has none.
    pub fallback_proto: String,
    /// Command templates keyed by protocol name (`ssh1`, `telnet`, ...).
    pub templates: BTreeMap<String, String>,
}

impl ConnectConfig {
    /// Template registered for `protocol`, if any.
    pub fn template(&self, protocol: &str) -> Option<&str> {
        self.templates.get(protocol).map(String::as_str)
    }
}
