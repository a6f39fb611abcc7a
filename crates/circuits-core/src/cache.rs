// ── Local inventory cache ──
//
// One JSON document, `{ "devices": [...], "clients": [...] }`, replaced
// wholesale on every update and read-only otherwise.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Client, Device};

/// Everything the cache holds, in the order the inventory service sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

impl CacheSnapshot {
    pub fn new(devices: Vec<Device>, clients: Vec<Client>) -> Self {
        Self { devices, clients }
    }
}

/// Reads and writes the cache document at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache for device resolution.
    ///
    /// A missing file is `CacheMissing`; anything unreadable or unparseable
    /// is `CacheCorrupt`.
    pub fn load(&self) -> Result<CacheSnapshot, CoreError> {
        debug!(path = %self.path.display(), "loading cache");

        let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CoreError::CacheMissing {
                path: self.path.clone(),
            },
            _ => CoreError::CacheCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })?;

        serde_json::from_str(&raw).map_err(|e| CoreError::CacheCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Load the cache for listing contexts: any failure yields empty lists.
    pub fn load_or_empty(&self) -> CacheSnapshot {
        self.load().unwrap_or_else(|err| {
            warn!(%err, "cache unavailable, continuing with empty lists");
            CacheSnapshot::default()
        })
    }

    /// Replace the cache with `snapshot`.
    ///
    /// Writes a sibling temp file, syncs it, then renames it over the
    /// target so an interrupted write leaves the previous cache intact.
    pub fn save(&self, snapshot: &CacheSnapshot) -> Result<(), CoreError> {
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Internal(format!("cannot serialize cache: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let temp_path = self.temp_path();
        debug!(path = %temp_path.display(), "writing cache");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| self.write_error(e))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                file.set_permissions(fs::Permissions::from_mode(0o600))
                    .map_err(|e| self.write_error(e))?;
            }

            file.write_all(contents.as_bytes())
                .map_err(|e| self.write_error(e))?;
            file.sync_all().map_err(|e| self.write_error(e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(&self, source: io::Error) -> CoreError {
        CoreError::CacheWrite {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ClientId, LocationType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> CacheSnapshot {
        let mut svc = Device::new("svc1.example", LocationType::Service, "10.0.0.5");
        svc.clients = vec![ClientId::from(1)];
        svc.user = Some(String::new());
        svc.proto = Some("ssh".into());
        svc.extra.insert("circuit_id".into(), json!("CKT-0042"));

        let core = Device::new("core1.example", LocationType::Network, "10.0.0.1");

        CacheSnapshot::new(
            vec![svc, core],
            vec![Client::new(1, "acme"), Client::new(2, "globex")],
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));

        let original = sample();
        store.save(&original).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, original);

        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), original);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));
        store.save(&sample()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("cache.json")]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("nested/deeper/cache.json"));
        store.save(&CacheSnapshot::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn saved_document_uses_two_top_level_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));
        store.save(&sample()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(doc["devices"][0]["full_name"], "svc1.example");
        assert_eq!(doc["devices"][0]["circuit_id"], "CKT-0042");
        assert_eq!(doc["clients"][1]["name"], "globex");
    }

    #[cfg(unix)]
    #[test]
    fn saved_cache_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.json"));
        store.save(&sample()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn missing_file_is_distinct_from_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let missing = CacheStore::new(dir.path().join("absent.json"));
        assert!(matches!(missing.load(), Err(CoreError::CacheMissing { .. })));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let corrupt = CacheStore::new(path);
        assert!(matches!(corrupt.load(), Err(CoreError::CacheCorrupt { .. })));
    }

    #[test]
    fn missing_lists_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "clients": [{ "id": 1, "name": "acme" }] }"#).unwrap();

        let snapshot = CacheStore::new(path).load().unwrap();
        assert!(snapshot.devices.is_empty());
        assert_eq!(snapshot.clients.len(), 1);
    }

    #[test]
    fn load_or_empty_tolerates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2").unwrap();

        assert_eq!(CacheStore::new(path).load_or_empty(), CacheSnapshot::default());
        assert_eq!(
            CacheStore::new(dir.path().join("absent.json")).load_or_empty(),
            CacheSnapshot::default()
        );
    }
}
