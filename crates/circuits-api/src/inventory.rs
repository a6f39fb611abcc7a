// Inventory HTTP client
//
// One authenticated POST returns every device and client the account can
// see. There is no session: the credentials travel in the request body.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Inventory, InventoryResponse};
use crate::transport::TransportConfig;

/// HTTP client for the circuitsmngr inventory endpoint.
pub struct InventoryClient {
    http: reqwest::Client,
    url: Url,
    timeout: Option<Duration>,
}

impl InventoryClient {
    /// Create a client for `url` from a `TransportConfig`.
    pub fn new(url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            url,
            timeout: Some(transport.timeout),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self {
            http,
            url,
            timeout: None,
        }
    }

    /// Log in and download the full inventory.
    ///
    /// A 401 is reported as `Error::InvalidCredentials`; any other
    /// non-success status becomes `Error::Upstream`. A successful body must
    /// carry both `devices` and `clients`.
    pub async fn fetch(&self, username: &str, password: &SecretString) -> Result<Inventory, Error> {
        debug!("POST {}", self.url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http
            .post(self.url.clone())
            .headers(crate::transport::json_headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidCredentials);
        }

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "inventory fetch rejected");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: InventoryResponse =
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text.clone(),
            })?;

        let inventory = Inventory::try_from(parsed)?;
        debug!(
            devices = inventory.devices.len(),
            clients = inventory.clients.len(),
            "inventory received"
        );
        Ok(inventory)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        match self.timeout {
            Some(timeout) if err.is_timeout() => Error::Timeout {
                timeout_secs: timeout.as_secs(),
            },
            _ => Error::Transport(err),
        }
    }
}
