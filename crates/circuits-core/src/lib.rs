// circuits-core: cached inventory, query resolution and command building.

pub mod cache;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod refresh;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheSnapshot, CacheStore};
pub use command::{CommandBuilder, ConnectCommand};
pub use config::ConnectConfig;
pub use error::CoreError;
pub use refresh::{CacheSummary, update_cache};
pub use resolve::{CompletionMode, Resolver};

pub use model::{Client, ClientId, Device, LocationType};
