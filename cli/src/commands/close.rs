use mdt_core::bridge::CLOSE;
use serde_json::json;

use crate::{app_config::AppConfig, net};

/// Tells the host to close the terminal overlay. One-way, nothing to report
/// back.
pub fn close_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    let bridge = net::bridge_for(config);
    bridge.fire(CLOSE, json!({}));

    Ok(())
}
