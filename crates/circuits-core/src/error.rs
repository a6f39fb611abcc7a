// ── Core error types ──
//
// User-facing errors from circuits-core. Consumers never see HTTP status
// handling or reqwest errors directly: the `From<circuits_api::Error>` impl
// translates transport-layer errors into domain variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Inventory service ────────────────────────────────────────────
    #[error("Invalid login.")]
    InvalidCredentials,

    #[error("Invalid data returned from circuitsmngr: {message}")]
    MalformedUpstreamData { message: String },

    #[error("circuitsmngr request failed (HTTP {status})")]
    Upstream { status: u16, message: String },

    #[error("Cannot connect to circuitsmngr at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("circuitsmngr request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Cache ────────────────────────────────────────────────────────
    #[error("Cache file {} does not exist", .path.display())]
    CacheMissing { path: PathBuf },

    #[error("Cache file {} is unusable: {reason}", .path.display())]
    CacheCorrupt { path: PathBuf, reason: String },

    #[error("Failed to write cache file {}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Client not found in cache: {name}")]
    ClientNotFound { name: String },

    #[error("device not found: {query}")]
    DeviceNotFound { query: String },

    #[error("No command template configured for protocol '{protocol}'")]
    MissingTemplate { protocol: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<circuits_api::Error> for CoreError {
    fn from(err: circuits_api::Error) -> Self {
        match err {
            circuits_api::Error::InvalidCredentials => CoreError::InvalidCredentials,
            circuits_api::Error::Upstream { status, body } => CoreError::Upstream {
                status,
                message: body,
            },
            circuits_api::Error::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            circuits_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            circuits_api::Error::ClientBuild(msg) => CoreError::Internal(msg),
            circuits_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedUpstreamData { message }
            }
            circuits_api::Error::MalformedInventory { missing } => {
                CoreError::MalformedUpstreamData {
                    message: format!("missing `{missing}` list"),
                }
            }
        }
    }
}
