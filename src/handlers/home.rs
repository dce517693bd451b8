//! Root endpoint handler.
//!
//! Returns a plain-text list of the available routes.

/// Route listing served at `/`
pub const ROUTE_LIST: &str = "Welcome to the Hawaii Climate API! Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
";

/// Handle GET / requests
pub async fn home_handler() -> &'static str {
    ROUTE_LIST
}
