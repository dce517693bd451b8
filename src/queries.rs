//! The five descriptive queries served by the API.
//!
//! Each function reads from the [`Store`] and computes its result fresh;
//! nothing is cached between calls.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Result, SurfsUpError};
use crate::store::Store;

/// Length of the "last year of data" window, counted back from the latest date.
///
/// A fixed day count, not a calendar year.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Precipitation keyed by date
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Station entry returned by the station listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationListing {
    pub station: String,
    pub name: String,
}

/// One temperature observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: Option<f64>,
}

/// Min/avg/max temperature over a date span
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

/// Parse a caller-supplied date.
///
/// Only the zero-padded `YYYY-MM-DD` form is accepted, since the stored dates
/// are compared as strings.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let invalid = || SurfsUpError::InvalidDate {
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if format_date(date) != value {
        return Err(invalid());
    }

    Ok(date)
}

/// Render a date the way the dataset stores it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First date inside the trailing window ending at `latest`
pub fn trailing_window_start(latest: NaiveDate) -> NaiveDate {
    latest - Duration::days(TRAILING_WINDOW_DAYS)
}

/// Cutoff string for the trailing window, or `None` for an empty dataset
async fn trailing_cutoff(store: &Store) -> Result<Option<String>> {
    let Some((_, latest)) = store.date_bounds().await? else {
        return Ok(None);
    };

    let latest = NaiveDate::parse_from_str(&latest, DATE_FORMAT).map_err(|e| {
        SurfsUpError::Schema {
            message: format!("Stored date '{}' is not an ISO date: {}", latest, e),
        }
    })?;

    Ok(Some(format_date(trailing_window_start(latest))))
}

/// Precipitation for every date in the trailing window.
///
/// When several stations report the same date, the row inserted last wins.
pub async fn recent_precipitation(store: &Store) -> Result<PrecipitationByDate> {
    let Some(cutoff) = trailing_cutoff(store).await? else {
        return Ok(PrecipitationByDate::new());
    };

    let rows = store.precipitation_since(&cutoff).await?;
    Ok(rows.into_iter().collect())
}

/// Every station's id and name, in store order
pub async fn list_stations(store: &Store) -> Result<Vec<StationListing>> {
    let stations = store.stations().await?;

    Ok(stations
        .into_iter()
        .map(|s| StationListing {
            station: s.station_id,
            name: s.name,
        })
        .collect())
}

/// Trailing-window temperature observations of the station with the most measurements
pub async fn most_active_station_observations(
    store: &Store,
) -> Result<Vec<TemperatureObservation>> {
    let Some(cutoff) = trailing_cutoff(store).await? else {
        return Ok(Vec::new());
    };
    let Some(station) = store.most_active_station().await? else {
        return Ok(Vec::new());
    };

    let rows = store
        .observations_since(&station.station_id, &cutoff)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(date, temperature)| TemperatureObservation { date, temperature })
        .collect())
}

/// Temperature statistics from `start` to the end of the dataset
pub async fn stats_from(store: &Store, start: &str) -> Result<TemperatureStats> {
    let start = format_date(parse_date(start)?);
    let (earliest, latest) = store.date_bounds().await?.ok_or(SurfsUpError::EmptyDataset)?;

    if !in_bounds(&start, &earliest, &latest) {
        return Err(out_of_range("Date", &earliest, &latest));
    }

    let aggregate = store.temperature_stats(&start, None).await?;
    Ok(TemperatureStats {
        min: aggregate.min,
        avg: aggregate.avg,
        max: aggregate.max,
    })
}

/// Temperature statistics for `start..=end`.
///
/// Checks run in order: both dates well formed, start in bounds, end in
/// bounds, start not after end.
pub async fn stats_range(store: &Store, start: &str, end: &str) -> Result<TemperatureStats> {
    let start = format_date(parse_date(start)?);
    let end = format_date(parse_date(end)?);
    let (earliest, latest) = store.date_bounds().await?.ok_or(SurfsUpError::EmptyDataset)?;

    if !in_bounds(&start, &earliest, &latest) {
        return Err(out_of_range("Start date", &earliest, &latest));
    }
    if !in_bounds(&end, &earliest, &latest) {
        return Err(out_of_range("End date", &earliest, &latest));
    }
    if start > end {
        return Err(SurfsUpError::InvalidRange);
    }

    let aggregate = store.temperature_stats(&start, Some(&end)).await?;
    Ok(TemperatureStats {
        min: aggregate.min,
        avg: aggregate.avg,
        max: aggregate.max,
    })
}

fn in_bounds(date: &str, earliest: &str, latest: &str) -> bool {
    earliest <= date && date <= latest
}

fn out_of_range(subject: &str, earliest: &str, latest: &str) -> SurfsUpError {
    SurfsUpError::DateOutOfRange {
        message: format!(
            "{} out of range. Please use a date between {} and {}.",
            subject, earliest, latest
        ),
    }
}
