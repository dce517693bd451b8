//! Temperature observations endpoint handler.
//!
//! Returns the trailing year of temperature observations for the station
//! with the most measurements.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::queries::most_active_station_observations;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing tobs request");

    match most_active_station_observations(&state.store).await {
        Ok(observations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                observation_count = observations.len(),
                "Tobs request successful"
            );
            Json(observations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
