//! # surfsup
//!
//! A read-only HTTP API over a SQLite climate observations dataset.
//!
//! The dataset holds daily precipitation and temperature readings together
//! with the stations that recorded them. The server answers a fixed set of
//! descriptive queries over it and never writes to the file.
//!
//! ## Architecture
//!
//! - **Store**: opens the SQLite file read-only and checks its declared schema
//! - **Queries**: recent precipitation, station listing, most-active-station
//!   observations and temperature statistics
//! - **Handlers**: one GET endpoint per query, JSON in and out

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod server;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{Result, SurfsUpError};
pub use handlers::create_router;
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error,
};
pub use state::AppState;
pub use store::{DatasetSummary, Measurement, Station, Store};
