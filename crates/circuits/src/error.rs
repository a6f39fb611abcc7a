//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use circuits_config::ConfigError;
use circuits_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(c::usage), help("See: c --help"))]
    Usage { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Failed to parse configuration, check syntax.")]
    #[diagnostic(code(c::config_parse), help("{path}: {detail}"))]
    ConfigParse { path: String, detail: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(c::validation))]
    Validation { field: String, reason: String },

    // ── Inventory service ────────────────────────────────────────────
    #[error("Invalid login.")]
    #[diagnostic(
        code(c::invalid_login),
        help("Check the username and password given with --user/--password.")
    )]
    InvalidCredentials,

    #[error("Invalid data returned from circuitsmngr.")]
    #[diagnostic(code(c::malformed_upstream), help("{message}"))]
    MalformedUpstreamData { message: String },

    #[error("circuitsmngr request failed (HTTP {status})")]
    #[diagnostic(code(c::upstream))]
    Upstream { status: u16 },

    #[error("Could not connect to circuitsmngr at {url}")]
    #[diagnostic(
        code(c::connection_failed),
        help("{reason}\nCheck circuitsmngr.url in your configuration.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(c::timeout),
        help("Raise http.timeout in your configuration or check the service.")
    )]
    Timeout { seconds: u64 },

    // ── Cache ────────────────────────────────────────────────────────
    #[error("Cache file {path} does not exist, run --update-cache first.")]
    #[diagnostic(code(c::cache_missing), help("Run: c --update-cache -u <user> -p <pass>"))]
    CacheMissing { path: String },

    #[error("Cache file {path} could not be read: {reason}")]
    #[diagnostic(
        code(c::cache_corrupt),
        help("Rebuild it with: c --update-cache -u <user> -p <pass>")
    )]
    CacheCorrupt { path: String, reason: String },

    #[error("Failed to write cache file {path}")]
    #[diagnostic(code(c::cache_write))]
    CacheWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Client not found in cache, maybe it needs updated?")]
    #[diagnostic(
        code(c::client_not_found),
        help("No client named '{name}'. List clients with: c --bash-completion client ''")
    )]
    ClientNotFound { name: String },

    #[error("device not found")]
    #[diagnostic(code(c::device_not_found), help("No cached device is named '{query}'."))]
    DeviceNotFound { query: String },

    #[error("No command template for protocol '{protocol}'")]
    #[diagnostic(
        code(c::missing_template),
        help("Add a \"commands.{protocol}\" entry to your configuration file.")
    )]
    MissingTemplate { protocol: String },

    // ── Execution ────────────────────────────────────────────────────
    #[error("Failed to run '{command}'")]
    #[diagnostic(code(c::shell))]
    Shell {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(c::internal))]
    Internal(String),
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse { path, source } => CliError::ConfigParse {
                path: path.display().to_string(),
                detail: source.to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => CliError::InvalidCredentials,

            CoreError::MalformedUpstreamData { message } => {
                CliError::MalformedUpstreamData { message }
            }

            CoreError::Upstream { status, message: _ } => CliError::Upstream { status },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::CacheMissing { path } => CliError::CacheMissing {
                path: path.display().to_string(),
            },

            CoreError::CacheCorrupt { path, reason } => CliError::CacheCorrupt {
                path: path.display().to_string(),
                reason,
            },

            CoreError::CacheWrite { path, source } => CliError::CacheWrite {
                path: path.display().to_string(),
                source,
            },

            CoreError::ClientNotFound { name } => CliError::ClientNotFound { name },

            CoreError::DeviceNotFound { query } => CliError::DeviceNotFound { query },

            CoreError::MissingTemplate { protocol } => CliError::MissingTemplate { protocol },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cache_missing_message_names_path_and_fix() {
        let err = CliError::from(CoreError::CacheMissing {
            path: PathBuf::from("/home/u/.c-cache.json"),
        });
        assert_eq!(
            err.to_string(),
            "Cache file /home/u/.c-cache.json does not exist, run --update-cache first."
        );
        assert!(err.help().is_some());
    }

    #[test]
    fn client_not_found_keeps_original_wording() {
        let err = CliError::from(CoreError::ClientNotFound {
            name: "initech".into(),
        });
        assert_eq!(
            err.to_string(),
            "Client not found in cache, maybe it needs updated?"
        );
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("initech"));
    }

    #[test]
    fn config_validation_maps_through() {
        let err = CliError::from(ConfigError::Validation {
            field: "http.timeout".into(),
            reason: "expected a number".into(),
        });
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
