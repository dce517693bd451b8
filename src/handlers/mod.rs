//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them to their paths.

pub mod heartbeat;
pub mod home;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use stats::{start_end_stats_handler, start_stats_handler};
pub use tobs::tobs_handler;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::SurfsUpError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    heartbeat::mark_server_start();

    Router::new()
        .route("/", get(home_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_stats_handler))
        .route("/api/v1.0/:start/:end", get(start_end_stats_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Log a failed request and turn the error into a JSON error response
pub(crate) fn error_response(
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}


#[cfg(test)]
mod tests {
    use super::test_support::{get, get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (_dir, app) = test_app().await;
        let (status, _) = get(app, "/api/v2.0/stations").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_routes_win_over_date_parameter() {
        let (_dir, app) = test_app().await;
        let (status, json) = get_json(app, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.is_array());
    }

    #[tokio::test]
    async fn test_error_body_carries_request_id() {
        let (_dir, app) = test_app().await;
        let (status, json) = get_json(app, "/api/v1.0/1900-01-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
        assert!(!json["request_id"].as_str().unwrap().is_empty());
    }
}
