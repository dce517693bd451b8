//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and what the opened
//! dataset contains.

use axum::{extract::State, Json};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::state::AppState;
use crate::store::DatasetSummary;

/// Server ID, unique per process
static SERVER_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: Lazy<SystemTime> = Lazy::new(SystemTime::now);

/// Pin the start time; called when the router is built
pub(crate) fn mark_server_start() {
    Lazy::force(&START_TIME);
}

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Dataset file path
    pub file_path: String,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let status = if state.is_empty() { "empty" } else { "healthy" };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: DatasetInfo {
            file_path: state.store.path().display().to_string(),
            summary: state.dataset.clone(),
        },
        status: status.to_string(),
    })
}
