use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ClientId;

/// A customer/tenant that groups devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}
