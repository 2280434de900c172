use crate::models::Report;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Action asking the host for the persisted working set.
pub const LOAD_REPORTS: &str = "loadReports";
/// Action persisting a created or updated report on the host.
pub const SAVE_REPORT: &str = "saveReport";
/// Action deleting a report on the host.
pub const DELETE_REPORT: &str = "deleteReport";
/// One-way action asking the host to close the terminal overlay.
pub const CLOSE: &str = "close";

#[derive(Debug, Error)]
pub enum BridgeError {
    /// No endpoint is configured; every call short-circuits to its fallback.
    #[error("no bridge endpoint configured")]
    Offline,
    #[error("bridge transport error: {0}")]
    Transport(String),
    #[error("bridge response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Carries one request to the host environment and returns its raw reply.
///
/// Implementations must bound their own latency (connect and read timeouts);
/// callers treat a slow host exactly like an absent one.
pub trait BridgeTransport: Send {
    fn call(&self, action: &str, payload: &Value) -> Result<Value, BridgeError>;
}

/// Transport used when no host endpoint is configured.
pub struct NullTransport;

impl BridgeTransport for NullTransport {
    fn call(&self, _action: &str, _payload: &Value) -> Result<Value, BridgeError> {
        Err(BridgeError::Offline)
    }
}

/// Typed front of the host bridge.
///
/// The terminal works local-first: [`BridgeClient::call_or`] never surfaces an
/// error, it degrades to the caller's fallback so report flows behave the same
/// with or without a host attached. [`BridgeClient::call`] is for the paths
/// that must distinguish a real reply from a degraded one.
pub struct BridgeClient {
    transport: Box<dyn BridgeTransport>,
}

impl BridgeClient {
    pub fn new(transport: Box<dyn BridgeTransport>) -> Self {
        Self { transport }
    }

    pub fn offline() -> Self {
        Self::new(Box::new(NullTransport))
    }

    /// Calls the host and decodes the reply. Errors on transport or decode
    /// failure.
    pub fn call<T: DeserializeOwned>(&self, action: &str, payload: Value) -> Result<T, BridgeError> {
        let raw = self.transport.call(action, &payload)?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Calls the host; any failure logs and yields `fallback` instead.
    pub fn call_or<T: DeserializeOwned>(&self, action: &str, payload: Value, fallback: T) -> T {
        match self.call(action, payload) {
            Ok(reply) => reply,
            Err(BridgeError::Offline) => {
                tracing::debug!(action, "bridge offline, using fallback");
                fallback
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "bridge call failed, using fallback");
                fallback
            }
        }
    }

    /// One-way notification. The reply, if any, is discarded.
    pub fn fire(&self, action: &str, payload: Value) {
        if let Err(e) = self.transport.call(action, &payload) {
            tracing::debug!(action, error = %e, "one-way bridge call failed");
        }
    }
}

/// Reply to [`LOAD_REPORTS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReportsResponse {
    pub success: bool,
    #[serde(default)]
    pub reports: Vec<Report>,
}

/// Reply to [`SAVE_REPORT`]. On a create the host may assign the durable id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportResponse {
    pub success: bool,
    #[serde(default)]
    pub report_id: Option<i64>,
}

/// Reply to [`DELETE_REPORT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteReportResponse {
    pub success: bool,
}
