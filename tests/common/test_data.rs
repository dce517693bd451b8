//! Test data generation utilities.
//!
//! This module writes SQLite files with the dataset layout the server expects,
//! filled with known data patterns.

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

use surfsup::store::SCHEMA_DDL;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Station that reports every day; the most active one
pub const DAILY_STATION: &str = "USC00519281";
/// Station that reports every other day
pub const ALTERNATE_STATION: &str = "USC00519397";
/// Station that only reports over the last few days
pub const RECENT_STATION: &str = "USC00516128";

/// First and last dates of the generated climate dataset
pub const FIRST_DATE: &str = "2016-01-01";
pub const LAST_DATE: &str = "2017-08-23";
/// The daily station stops reporting a few days before the end
pub const DAILY_LAST_DATE: &str = "2017-08-18";

/// A measurement row: `(station, date, prcp, tobs)`
pub type Row = (String, String, Option<f64>, Option<f64>);

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid fixture date")
}

fn dates_between(first: &str, last: &str) -> Vec<NaiveDate> {
    let (first, last) = (date(first), date(last));
    let mut dates = Vec::new();
    let mut day = first;
    while day <= last {
        dates.push(day);
        day += Duration::days(1);
    }
    dates
}

/// Temperature pattern for the daily station: 65..=74 repeating
pub fn daily_temperature(index: usize) -> f64 {
    65.0 + (index % 10) as f64
}

/// Write a file with the dataset schema and the given rows
pub async fn write_dataset(path: &Path, stations: &[(&str, &str)], rows: &[Row]) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(&mut conn).await?;
    }

    for (id, name) in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, 21.2716, -157.8168, 3.0)",
        )
        .bind(*id)
        .bind(*name)
        .execute(&mut conn)
        .await?;
    }

    let mut tx = conn.begin().await?;
    for (station, day, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station.as_str())
            .bind(day.as_str())
            .bind(*prcp)
            .bind(*tobs)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    conn.close().await
}

/// Creates a dataset shaped like the Hawaii climate file.
///
/// * the daily station reports every day from `FIRST_DATE` to `DAILY_LAST_DATE`
///   with [`daily_temperature`] and no precipitation on every seventh day
/// * the alternate station reports every other day up to `LAST_DATE`
/// * the recent station reports only the last five days
pub async fn create_climate_dataset(path: &Path) -> Result<()> {
    let stations = [
        (DAILY_STATION, "WAIHEE 837.5, HI US"),
        (ALTERNATE_STATION, "WAIKIKI 717.2, HI US"),
        (RECENT_STATION, "KANEOHE 838.1, HI US"),
    ];

    let mut rows = Vec::new();

    for (i, day) in dates_between(FIRST_DATE, DAILY_LAST_DATE).iter().enumerate() {
        let prcp = if i % 7 == 0 { None } else { Some((i % 5) as f64 * 0.1) };
        rows.push((
            DAILY_STATION.to_string(),
            day.format("%Y-%m-%d").to_string(),
            prcp,
            Some(daily_temperature(i)),
        ));
    }

    for day in dates_between(FIRST_DATE, LAST_DATE).iter().step_by(2) {
        rows.push((
            ALTERNATE_STATION.to_string(),
            day.format("%Y-%m-%d").to_string(),
            Some(0.0),
            Some(78.0),
        ));
    }

    for day in dates_between("2017-08-19", LAST_DATE) {
        rows.push((
            RECENT_STATION.to_string(),
            day.format("%Y-%m-%d").to_string(),
            Some(2.0),
            None,
        ));
    }

    write_dataset(path, &stations, &rows).await
}

/// One station, three days, temperatures 70/75/80
pub async fn create_three_day_dataset(path: &Path) -> Result<()> {
    let rows = [("2017-08-21", 70.0), ("2017-08-22", 75.0), ("2017-08-23", 80.0)]
        .into_iter()
        .map(|(day, tobs)| {
            (
                ALTERNATE_STATION.to_string(),
                day.to_string(),
                Some(0.0),
                Some(tobs),
            )
        })
        .collect::<Vec<_>>();

    write_dataset(path, &[(ALTERNATE_STATION, "WAIKIKI 717.2, HI US")], &rows).await
}

/// Dates in the trailing window on which the daily station reported
pub fn daily_station_window() -> Vec<(String, f64)> {
    let cutoff = date(LAST_DATE) - Duration::days(365);
    dates_between(FIRST_DATE, DAILY_LAST_DATE)
        .into_iter()
        .enumerate()
        .filter(|(_, day)| *day >= cutoff)
        .map(|(i, day)| (day.format("%Y-%m-%d").to_string(), daily_temperature(i)))
        .collect()
}
