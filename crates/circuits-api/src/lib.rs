// circuits-api: Async client for the circuitsmngr inventory endpoint

pub mod error;
pub mod inventory;
pub mod models;
pub mod transport;

pub use error::Error;
pub use inventory::InventoryClient;
pub use models::{ClientRecord, DeviceRecord, Inventory};
pub use transport::TransportConfig;
