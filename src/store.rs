//! Read-only access to the SQLite climate dataset.
//!
//! The dataset holds two tables, `measurement` and `station`. Their layout is
//! declared here rather than discovered at runtime, and [`Store::open`]
//! refuses to serve a file whose tables lack any declared column.
//!
//! Dates are stored as zero-padded ISO `YYYY-MM-DD` text, so SQL string
//! comparison on the `date` column is chronological comparison.

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SurfsUpError};

/// A table name together with the columns this crate reads from it
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Daily readings, one row per station per day
pub const MEASUREMENT_TABLE: TableSchema = TableSchema {
    name: "measurement",
    columns: &["id", "station", "date", "prcp", "tobs"],
};

/// Station metadata
pub const STATION_TABLE: TableSchema = TableSchema {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
};

/// DDL for a dataset file with the declared layout.
///
/// The server never runs these; they exist for fixtures and tooling that
/// need to produce a compatible file.
pub const SCHEMA_DDL: [&str; 2] = [
    "CREATE TABLE measurement (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT
    )",
    "CREATE TABLE station (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    )",
];

/// A single daily measurement
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Measurement {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub date: String,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[sqlx(rename = "tobs")]
    pub temperature_observed: Option<f64>,
}

/// A weather station
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Station with its measurement count
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StationActivity {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub measurement_count: i64,
}

/// Aggregate temperature statistics; `None` when no row has a temperature
#[derive(Debug, Clone, Copy, PartialEq, Default, sqlx::FromRow)]
pub struct TemperatureAggregate {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// Size and date span of the opened dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub measurement_count: i64,
    pub station_count: i64,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}

/// Handle to the dataset, shared by every request.
///
/// Each query borrows a pooled connection. All connections are opened
/// read-only, so concurrent requests need no further coordination.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    path: PathBuf,
}

impl Store {
    /// Open the dataset read-only and verify its schema
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self> {
        if !path.exists() {
            return Err(SurfsUpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened dataset: {}", path.display());

        let store = Self {
            pool,
            path: path.to_path_buf(),
        };
        if let Err(e) = store.verify_schema().await {
            store.pool.close().await;
            return Err(e);
        }

        Ok(store)
    }

    /// Path of the opened file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that every declared table exists with every declared column
    async fn verify_schema(&self) -> Result<()> {
        for table in [MEASUREMENT_TABLE, STATION_TABLE] {
            let columns: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                    .bind(table.name)
                    .fetch_all(&self.pool)
                    .await?;

            if columns.is_empty() {
                return Err(SurfsUpError::Schema {
                    message: format!("Table '{}' not found", table.name),
                });
            }

            for expected in table.columns {
                if !columns.iter().any(|c| c == expected) {
                    return Err(SurfsUpError::Schema {
                        message: format!(
                            "Table '{}' is missing column '{}'",
                            table.name, expected
                        ),
                    });
                }
            }

            debug!(table = table.name, columns = ?columns, "Schema verified");
        }

        Ok(())
    }

    /// Earliest and latest measurement dates; `None` for an empty dataset
    pub async fn date_bounds(&self) -> Result<Option<(String, String)>> {
        let (earliest, latest): (Option<String>, Option<String>) =
            sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
                .fetch_one(&self.pool)
                .await?;

        Ok(earliest.zip(latest))
    }

    /// `(date, prcp)` for every measurement on or after `cutoff`, in insertion order
    pub async fn precipitation_since(&self, cutoff: &str) -> Result<Vec<(String, Option<f64>)>> {
        let rows = sqlx::query_as(
            "SELECT date, CAST(prcp AS REAL) FROM measurement WHERE date >= ?1 ORDER BY id",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every station, in store order
    pub async fn stations(&self) -> Result<Vec<Station>> {
        let stations = sqlx::query_as(
            "SELECT station, name,
                    CAST(latitude AS REAL) AS latitude,
                    CAST(longitude AS REAL) AS longitude,
                    CAST(elevation AS REAL) AS elevation
             FROM station ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    /// The station with the most measurements.
    ///
    /// Ties go to the lowest station id, so the answer is stable for a given file.
    pub async fn most_active_station(&self) -> Result<Option<StationActivity>> {
        let activity = sqlx::query_as(
            "SELECT station, COUNT(*) AS measurement_count
             FROM measurement
             GROUP BY station
             ORDER BY measurement_count DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    /// `(date, tobs)` for one station on or after `cutoff`, ordered by date
    pub async fn observations_since(
        &self,
        station_id: &str,
        cutoff: &str,
    ) -> Result<Vec<(String, Option<f64>)>> {
        let rows = sqlx::query_as(
            "SELECT date, CAST(tobs AS REAL)
             FROM measurement
             WHERE station = ?1 AND date >= ?2
             ORDER BY date, id",
        )
        .bind(station_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Min/avg/max of `tobs` over `start <= date` and, if given, `date <= end`
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureAggregate> {
        let aggregate = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL) AS min,
                    CAST(AVG(tobs) AS REAL) AS avg,
                    CAST(MAX(tobs) AS REAL) AS max
             FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(aggregate)
    }

    /// The `limit` most recent measurements, newest first
    pub async fn latest_measurements(&self, limit: i64) -> Result<Vec<Measurement>> {
        let measurements = sqlx::query_as(
            "SELECT station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs
             FROM measurement
             ORDER BY date DESC, id DESC
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(measurements)
    }

    /// Row counts and date span
    pub async fn summary(&self) -> Result<DatasetSummary> {
        let measurement_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        let bounds = self.date_bounds().await?;

        Ok(DatasetSummary {
            measurement_count,
            station_count,
            earliest_date: bounds.as_ref().map(|(earliest, _)| earliest.clone()),
            latest_date: bounds.map(|(_, latest)| latest),
        })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed dataset: {}", self.path.display());
    }

    /// Whether [`Store::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
