use std::time::Duration;

use mdt_core::bridge::{BridgeError, BridgeTransport};
use mdt_core::BridgeClient;
use serde_json::Value;

use crate::app_config::AppConfig;

/// Bridge transport POSTing JSON to `{base_url}/{action}`.
///
/// Connect and read share one timeout so a dead host costs at most one
/// timeout per call, matching the bounded-latency contract of the trait.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BridgeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl BridgeTransport for HttpTransport {
    fn call(&self, action: &str, payload: &Value) -> Result<Value, BridgeError> {
        let url = format!("{}/{}", self.base_url, action);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Transport(format!("{url} returned {status}")));
        }

        let body = response
            .text()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        // One-way actions reply with an empty body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Bridge client for the configured environment. No bridge URL means no host
/// to talk to; every call then degrades to its local fallback.
pub fn bridge_for(config: &AppConfig) -> BridgeClient {
    match config.bridge_url.as_deref() {
        Some(url) => {
            let timeout = Duration::from_millis(config.bridge_timeout_ms);
            match HttpTransport::new(url, timeout) {
                Ok(transport) => BridgeClient::new(Box::new(transport)),
                Err(e) => {
                    tracing::warn!(error = %e, "bridge transport unavailable, running offline");
                    BridgeClient::offline()
                }
            }
        }
        None => BridgeClient::offline(),
    }
}
