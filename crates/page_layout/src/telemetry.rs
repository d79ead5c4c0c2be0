//! Per-pass telemetry lines.

use log::{debug, info};
use serde::Serialize;

/// Log `report` as one JSON line when `enabled`.
pub(crate) fn emit<T: Serialize>(enabled: bool, report: &T) {
    if !enabled {
        return;
    }
    match serde_json::to_string(report) {
        Ok(line) => info!(target: "page_layout::telemetry", "{line}"),
        Err(error) => debug!(target: "page_layout::telemetry", "unserializable report: {error}"),
    }
}
