//! Application state management for surfsup.
//!
//! This module defines the shared state that is passed to all handlers:
//! the configuration, the open dataset handle and a startup snapshot of the
//! dataset's size.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, SurfsUpError};
use crate::queries::parse_date;
use crate::store::{DatasetSummary, Store};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only dataset handle
    pub store: Store,
    /// Counts and date span taken when the dataset was opened
    pub dataset: DatasetSummary,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: Store, dataset: DatasetSummary) -> Self {
        Self {
            config,
            store,
            dataset,
        }
    }

    /// Open the dataset at `path` and build the state around it
    pub async fn load(path: &Path, config: Config) -> Result<Self> {
        let store = Store::open(path, config.data.max_connections).await?;
        let dataset = store.summary().await?;
        Ok(Self::new(config, store, dataset))
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub async fn load_shared(path: &Path, config: Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::load(path, config).await?))
    }

    /// Validate that the dataset is usable for date queries.
    ///
    /// Stored bounds must be zero-padded ISO dates, otherwise string
    /// comparison on the date column would not be chronological.
    pub fn validate(&self) -> Result<()> {
        for date in [&self.dataset.earliest_date, &self.dataset.latest_date]
            .into_iter()
            .flatten()
        {
            parse_date(date).map_err(|_| SurfsUpError::Schema {
                message: format!("Stored date '{}' is not in YYYY-MM-DD form", date),
            })?;
        }

        Ok(())
    }

    /// Whether the dataset has any measurements at all
    pub fn is_empty(&self) -> bool {
        self.dataset.measurement_count == 0
    }
}
