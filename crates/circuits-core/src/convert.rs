// ── Wire → domain conversion ──
//
// The inventory service hands back loosely typed records. These impls
// validate them into the cache's domain model. A device that doesn't fit
// is dropped from the snapshot with a warning; a bad client record is
// reported as malformed upstream data.

use circuits_api::{ClientRecord, DeviceRecord, Inventory};
use serde_json::Value;
use tracing::warn;

use crate::cache::CacheSnapshot;
use crate::error::CoreError;
use crate::model::{Client, ClientId, Device, LocationType};

fn client_id(value: Value) -> Result<ClientId, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::MalformedUpstreamData {
        message: format!("invalid client id: {e}"),
    })
}

impl TryFrom<DeviceRecord> for Device {
    type Error = CoreError;

    fn try_from(rec: DeviceRecord) -> Result<Self, Self::Error> {
        let location_type: LocationType =
            rec.location_type
                .parse()
                .map_err(|_| CoreError::MalformedUpstreamData {
                    message: format!(
                        "device '{}' has unknown location_type '{}'",
                        rec.full_name, rec.location_type
                    ),
                })?;

        let clients = rec
            .clients
            .into_iter()
            .map(client_id)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            full_name: rec.full_name,
            location_type,
            clients,
            user: rec.user,
            proto: rec.proto,
            ip: rec.ip,
            extra: rec.extra,
        })
    }
}

impl TryFrom<ClientRecord> for Client {
    type Error = CoreError;

    fn try_from(rec: ClientRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: client_id(rec.id)?,
            name: rec.name,
            extra: rec.extra,
        })
    }
}

impl TryFrom<Inventory> for CacheSnapshot {
    type Error = CoreError;

    fn try_from(inv: Inventory) -> Result<Self, Self::Error> {
        let devices = inv
            .devices
            .into_iter()
            .filter_map(|rec| {
                Device::try_from(rec)
                    .inspect_err(|err| warn!(%err, "skipping device"))
                    .ok()
            })
            .collect();
        let clients = inv
            .clients
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { devices, clients })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn record(location_type: &str) -> DeviceRecord {
        DeviceRecord {
            full_name: "edge1.example".into(),
            location_type: location_type.into(),
            clients: vec![json!(4), json!("c-9")],
            user: Some("noc".into()),
            proto: Some("ssh2".into()),
            ip: "192.0.2.1".into(),
            extra: Map::new(),
        }
    }

    #[test]
    fn device_record_converts() {
        let dev = Device::try_from(record("network")).unwrap();
        assert_eq!(dev.location_type, LocationType::Network);
        assert_eq!(dev.clients, vec![ClientId::Numeric(4), ClientId::Named("c-9".into())]);
        assert_eq!(dev.user_override(), Some("noc"));
    }

    #[test]
    fn unknown_location_type_is_malformed() {
        let err = Device::try_from(record("datacenter")).unwrap_err();
        assert!(matches!(err, CoreError::MalformedUpstreamData { .. }));
    }

    #[test]
    fn snapshot_skips_unconvertible_devices() {
        let inv = Inventory {
            devices: vec![record("datacenter"), record("service")],
            clients: vec![ClientRecord {
                id: json!(4),
                name: "acme".into(),
                extra: Map::new(),
            }],
        };
        let snapshot = CacheSnapshot::try_from(inv).unwrap();
        assert_eq!(snapshot.devices.len(), 1);
        assert_eq!(snapshot.devices[0].location_type, LocationType::Service);
        assert_eq!(snapshot.clients.len(), 1);
    }

    #[test]
    fn object_client_id_is_malformed() {
        let rec = ClientRecord {
            id: json!({ "nested": 1 }),
            name: "acme".into(),
            extra: Map::new(),
        };
        assert!(matches!(
            Client::try_from(rec),
            Err(CoreError::MalformedUpstreamData { .. })
        ));
    }
}
