// ── Query resolution ──
//
// Linear, order-preserving filters over a cache snapshot. Every lookup
// first resolves the optional client filter, so an unknown client name
// fails the same way in every mode.

use strum::{Display, EnumString};

use crate::cache::CacheSnapshot;
use crate::error::CoreError;
use crate::model::{ClientId, Device, LocationType};

/// What a shell-completion request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CompletionMode {
    /// Client names.
    Client,
    /// Full names of `service` devices.
    Service,
    /// Full names of `network` devices.
    Network,
}

impl CompletionMode {
    /// The device location type this mode lists, or `None` for clients.
    pub fn location_type(self) -> Option<LocationType> {
        match self {
            Self::Client => None,
            Self::Service => Some(LocationType::Service),
            Self::Network => Some(LocationType::Network),
        }
    }
}

/// Resolves queries against one cache snapshot.
pub struct Resolver<'a> {
    snapshot: &'a CacheSnapshot,
}

impl<'a> Resolver<'a> {
    pub fn new(snapshot: &'a CacheSnapshot) -> Self {
        Self { snapshot }
    }

    /// Id of the first client whose name is exactly `name`.
    pub fn client_id(&self, name: &str) -> Result<&'a ClientId, CoreError> {
        self.snapshot
            .clients
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.id)
            .ok_or_else(|| CoreError::ClientNotFound { name: name.into() })
    }

    fn scope(&self, client: Option<&str>) -> Result<Option<&'a ClientId>, CoreError> {
        client.map(|name| self.client_id(name)).transpose()
    }

    /// First device whose `full_name` equals `query`.
    ///
    /// With a client filter only `service` devices qualify. The filter
    /// does not check the device's client list, only that the client
    /// exists.
    pub fn find_device(&self, query: &str, client: Option<&str>) -> Result<&'a Device, CoreError> {
        let scoped = self.scope(client)?.is_some();

        self.snapshot
            .devices
            .iter()
            .find(|d| {
                d.full_name == query && (!scoped || d.location_type == LocationType::Service)
            })
            .ok_or_else(|| CoreError::DeviceNotFound {
                query: query.into(),
            })
    }

    /// Completion candidates starting with `query`, in cache order.
    pub fn complete(
        &self,
        mode: CompletionMode,
        query: &str,
        client: Option<&str>,
    ) -> Result<Vec<&'a str>, CoreError> {
        let scope = self.scope(client)?;

        let Some(location_type) = mode.location_type() else {
            return Ok(self
                .snapshot
                .clients
                .iter()
                .map(|c| c.name.as_str())
                .filter(|name| name.starts_with(query))
                .collect());
        };

        Ok(self
            .snapshot
            .devices
            .iter()
            .filter(|d| d.location_type == location_type)
            .filter(|d| scope.is_none_or(|id| d.serves(id)))
            .map(|d| d.full_name.as_str())
            .filter(|name| name.starts_with(query))
            .collect())
    }
}
