use std::error::Error;
use std::path::PathBuf;

use surfsup::queries::{format_date, parse_date, trailing_window_start};
use surfsup::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Path to the dataset, defaulting to the bundled resource location
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Resources/hawaii.sqlite"));

    println!("Inspecting dataset: {}", file_path.display());

    let store = Store::open(&file_path, 1).await?;
    let summary = store.summary().await?;

    println!("\n=== DATASET ===");
    println!("  measurements = {}", summary.measurement_count);
    println!("  stations     = {}", summary.station_count);

    match (&summary.earliest_date, &summary.latest_date) {
        (Some(earliest), Some(latest)) => {
            println!("  date span    = {} .. {}", earliest, latest);
            let window_start = trailing_window_start(parse_date(latest)?);
            println!("  last year    = {} .. {}", format_date(window_start), latest);
        }
        _ => println!("  date span    = (no measurements)"),
    }

    println!("\nStations:");
    for station in store.stations().await? {
        println!(
            "  {} {} (lat {}, lon {}, elev {})",
            station.station_id, station.name, station.latitude, station.longitude, station.elevation
        );
    }

    if let Some(active) = store.most_active_station().await? {
        println!(
            "\nMost active station: {} ({} measurements)",
            active.station_id, active.measurement_count
        );
    }

    println!("\nLatest measurements:");
    for m in store.latest_measurements(5).await? {
        println!(
            "  {} {} prcp={:?} tobs={:?}",
            m.date, m.station_id, m.precipitation, m.temperature_observed
        );
    }

    store.close().await;
    Ok(())
}
