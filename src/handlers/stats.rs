//! Temperature statistics endpoint handlers.
//!
//! Return min/avg/max temperature from a start date to the end of the
//! dataset, or over an inclusive start/end range.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::queries::{stats_from, stats_range, TemperatureStats};
use crate::state::AppState;

/// Response for the statistics endpoints
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub stats: TemperatureStats,
}

/// Handle GET /api/v1.0/:start requests
pub async fn start_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    let endpoint = "/api/v1.0/:start";
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = %start,
        "Processing start stats request"
    );

    match stats_from(&state.store, &start).await {
        Ok(stats) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Start stats request successful"
            );
            Json(StatsResponse {
                start_date: start,
                end_date: None,
                stats,
            })
            .into_response()
        }
        Err(error) => error_response(
            error,
            endpoint,
            &request_id,
            Some(&format!("start={}", start)),
        ),
    }
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn start_end_stats_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let endpoint = "/api/v1.0/:start/:end";
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = %start,
        end = %end,
        "Processing range stats request"
    );

    match stats_range(&state.store, &start, &end).await {
        Ok(stats) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Range stats request successful"
            );
            Json(StatsResponse {
                start_date: start,
                end_date: Some(end),
                stats,
            })
            .into_response()
        }
        Err(error) => error_response(
            error,
            endpoint,
            &request_id,
            Some(&format!("start={}, end={}", start, end)),
        ),
    }
}
