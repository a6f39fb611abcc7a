// ── Domain model ──
//
// Canonical representation of the inventory records held in the cache.
// Upstream fields the model doesn't name are carried in `extra` so the
// cache file round-trips the service payload unchanged.

pub mod client;
pub mod client_id;
pub mod device;

pub use client::Client;
pub use client_id::ClientId;
pub use device::{Device, LocationType};
