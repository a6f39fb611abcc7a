// Inventory response types
//
// Wire models for the circuitsmngr inventory payload. Fields use
// `#[serde(default)]` where the service is known to omit them, and every
// record keeps unmodelled fields in `extra` so nothing is lost on the way
// to the cache.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// A device record as returned by the inventory service.
///
/// `location_type` and the client ids are left loosely typed here;
/// `circuits-core` validates them when converting to its domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub full_name: String,
    pub location_type: String,
    #[serde(default)]
    pub clients: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A client (customer) record as returned by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: Value,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A complete inventory snapshot: every device and every client.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub devices: Vec<DeviceRecord>,
    pub clients: Vec<ClientRecord>,
}

/// Raw response body. Both lists must be present for the payload to count
/// as an inventory.
#[derive(Debug, Deserialize)]
pub(crate) struct InventoryResponse {
    pub devices: Option<Vec<DeviceRecord>>,
    pub clients: Option<Vec<ClientRecord>>,
}

impl TryFrom<InventoryResponse> for Inventory {
    type Error = Error;

    fn try_from(resp: InventoryResponse) -> Result<Self, Self::Error> {
        let devices = resp
            .devices
            .ok_or(Error::MalformedInventory { missing: "devices" })?;
        let clients = resp
            .clients
            .ok_or(Error::MalformedInventory { missing: "clients" })?;
        Ok(Self { devices, clients })
    }
}
