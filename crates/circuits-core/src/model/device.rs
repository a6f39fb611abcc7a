// ── Device domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use super::ClientId;

/// Where a device sits: a customer-facing service endpoint or a piece of
/// network infrastructure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocationType {
    Service,
    Network,
}

/// A connectable endpoint as recorded in the cache.
///
/// `full_name` is the lookup key. `user` and `proto` are optional
/// overrides; an empty string counts as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub full_name: String,
    pub location_type: LocationType,
    #[serde(default)]
    pub clients: Vec<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    pub fn new(
        full_name: impl Into<String>,
        location_type: LocationType,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            location_type,
            clients: Vec::new(),
            user: None,
            proto: None,
            ip: ip.into(),
            extra: Map::new(),
        }
    }

    /// Username override, if one is set and non-empty.
    pub fn user_override(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }

    /// Protocol as stored, if set and non-empty.
    pub fn protocol(&self) -> Option<&str> {
        self.proto.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether this device is associated with the given client.
    pub fn serves(&self, client: &ClientId) -> bool {
        self.clients.contains(client)
    }
}
