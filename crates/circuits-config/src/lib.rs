//! Configuration for the `c` connect utility.
//!
//! Built-in defaults merged with an optional flat JSON file of dotted keys
//! (`"commands.ssh1"`, `"cache.file"`, ...), then translated to
//! `circuits_core::ConnectConfig`. The file is read once per invocation and
//! never written back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use circuits_core::ConnectConfig;

/// Default location of the user config file.
pub const DEFAULT_CONFIG_FILE: &str = "~/.config/c.json";

const COMMAND_PREFIX: &str = "commands.";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration, check syntax.")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

// ── Settings ────────────────────────────────────────────────────────

/// Flat key/value configuration as it appears on disk.
///
/// Every `commands.<proto>` key lands in `extra` alongside anything else
/// the file carries; [`Settings::templates`] picks the command templates
/// back out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "circuitsmngr.url")]
    pub url: String,

    #[serde(rename = "cache.file")]
    pub cache_file: String,

    #[serde(rename = "fallback.user")]
    pub fallback_user: String,

    #[serde(rename = "fallback.proto")]
    pub fallback_proto: String,

    /// Request timeout in seconds.
    #[serde(rename = "http.timeout")]
    pub timeout: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let extra = [
            ("ssh1", "/usr/bin/ssh -1 -l %username% %hostname%"),
            ("ssh2", "/usr/bin/ssh -l %username% %hostname%"),
            ("telnet", "/usr/local/bin/telnet -K %hostname%"),
            ("web", "/usr/bin/open http://%hostname%"),
        ]
        .into_iter()
        .map(|(proto, template)| (format!("{COMMAND_PREFIX}{proto}"), template.to_owned()))
        .collect();

        Self {
            url: "https://circuits.vcn.com/c.php".into(),
            cache_file: "~/.c-cache.json".into(),
            fallback_user: String::new(),
            fallback_proto: "telnet".into(),
            timeout: "10".into(),
            extra,
        }
    }
}

impl Settings {
    /// Command templates keyed by protocol (the part after `commands.`).
    pub fn templates(&self) -> BTreeMap<String, String> {
        self.extra
            .iter()
            .filter_map(|(key, template)| {
                key.strip_prefix(COMMAND_PREFIX)
                    .map(|proto| (proto.to_owned(), template.clone()))
            })
            .collect()
    }

    /// Validate and translate into the runtime config core consumes.
    pub fn into_connect_config(self) -> Result<ConnectConfig, ConfigError> {
        for key in self.extra.keys().filter(|k| !k.starts_with(COMMAND_PREFIX)) {
            warn!(%key, "ignoring unknown configuration key");
        }

        let inventory_url: url::Url = self.url.parse().map_err(|e| ConfigError::Validation {
            field: "circuitsmngr.url".into(),
            reason: format!("invalid URL '{}': {e}", self.url),
        })?;

        let timeout_secs: u64 = self.timeout.trim().parse().map_err(|_| ConfigError::Validation {
            field: "http.timeout".into(),
            reason: format!("expected a whole number of seconds, got '{}'", self.timeout),
        })?;

        Ok(ConnectConfig {
            inventory_url,
            cache_file: expand_home(&self.cache_file),
            timeout: Duration::from_secs(timeout_secs),
            templates: self.templates(),
            fallback_user: self.fallback_user,
            fallback_proto: self.fallback_proto,
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and `~user` forms, are returned unchanged.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };

    match BaseDirs::new() {
        Some(dirs) if rest.is_empty() => dirs.home_dir().to_path_buf(),
        Some(dirs) => dirs.home_dir().join(rest),
        None => PathBuf::from(raw),
    }
}

/// The config file used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    expand_home(DEFAULT_CONFIG_FILE)
}

// ── Loading ─────────────────────────────────────────────────────────

/// Merge the built-in defaults with the JSON file at `path`.
///
/// A missing file is not an error; the defaults apply unchanged.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    debug!(path = %path.display(), "loading configuration");

    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Json::file(path))
        .extract()
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
}

/// Load the file at `path` and translate it into a `ConnectConfig`.
pub fn load_connect_config(path: &Path) -> Result<ConnectConfig, ConfigError> {
    load_settings(path)?.into_connect_config()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(load_connect_config(&dir.path().join("absent.json")).is_ok());
    }

    #[test]
    fn file_overrides_individual_keys() {
        let (_dir, path) = write_config(
            r#"{
                "fallback.user": "noc",
                "commands.telnet": "/usr/bin/telnet %hostname%",
                "commands.ssh": "/usr/bin/ssh %username%@%hostname%"
            }"#,
        );
        let settings = load_settings(&path).unwrap();

        assert_eq!(settings.fallback_user, "noc");
        assert_eq!(settings.fallback_proto, "telnet");
        let templates = settings.templates();
        assert_eq!(templates["telnet"], "/usr/bin/telnet %hostname%");
        assert_eq!(templates["ssh"], "/usr/bin/ssh %username%@%hostname%");
        assert_eq!(templates["ssh1"], "/usr/bin/ssh -1 -l %username% %hostname%");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let (_dir, path) = write_config("{ \"fallback.user\": ");
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.to_string(), "Failed to parse configuration, check syntax.");
    }

    #[test]
    fn defaults_translate_to_connect_config() {
        let cfg = Settings::default().into_connect_config().unwrap();
        assert_eq!(cfg.inventory_url.as_str(), "https://circuits.vcn.com/c.php");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.fallback_user, "");
        assert_eq!(cfg.fallback_proto, "telnet");
        assert_eq!(cfg.template("web"), Some("/usr/bin/open http://%hostname%"));
        assert_eq!(cfg.template("ssh"), None);
        assert!(cfg.cache_file.ends_with(".c-cache.json"));
    }

    #[test]
    fn bad_url_is_rejected() {
        let settings = Settings {
            url: "not a url".into(),
            ..Settings::default()
        };
        let err = settings.into_connect_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "circuitsmngr.url"));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let settings = Settings {
            timeout: "soon".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.into_connect_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/var/cache/c.json"), PathBuf::from("/var/cache/c.json"));
        assert_eq!(expand_home("relative/~/c.json"), PathBuf::from("relative/~/c.json"));
        assert_eq!(expand_home("~other/c.json"), PathBuf::from("~other/c.json"));

        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(expand_home("~/.c-cache.json"), dirs.home_dir().join(".c-cache.json"));
            assert_eq!(expand_home("~"), dirs.home_dir());
        }
    }

    #[test]
    fn absolute_cache_file_is_kept() {
        let (_dir, path) = write_config(r#"{ "cache.file": "/srv/c/cache.json" }"#);
        let cfg = load_connect_config(&path).unwrap();
        assert_eq!(cfg.cache_file, PathBuf::from("/srv/c/cache.json"));
    }
}
