// ── Client identity ──

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a client (customer) record.
///
/// The inventory service emits numeric ids, but string ids are accepted
/// too. Either form serializes back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Numeric(i64),
    Named(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Named(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ClientId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self::Named(s.to_owned())
    }
}
