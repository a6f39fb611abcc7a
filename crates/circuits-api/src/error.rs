use thiserror::Error;

/// Top-level error type for the `circuits-api` crate.
///
/// Covers every way a single inventory fetch can fail: rejected
/// credentials, upstream failures, transport problems, and payloads that
/// don't look like an inventory. `circuits-core` maps these into
/// domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The inventory service answered 401.
    #[error("Invalid login.")]
    InvalidCredentials,

    // ── Upstream ────────────────────────────────────────────────────
    /// Any other non-success status from the inventory service.
    #[error("circuitsmngr returned HTTP {status}")]
    Upstream { status: u16, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The payload parsed but lacks one of the required top-level lists.
    #[error("Invalid data returned from circuitsmngr (missing `{missing}`).")]
    MalformedInventory { missing: &'static str },
}

impl Error {
    /// Returns `true` if the request never got a usable HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }
}
