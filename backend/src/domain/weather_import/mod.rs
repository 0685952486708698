//! Batch weather import.
//!
//! One batch reads a snapshot of tracked locations and, strictly in snapshot
//! order, fetches and stores one observation per location. A failing location
//! is logged and counted, then the batch moves on.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

pub use self::error::{ObservationFetchCause, ObservationFetchError};
use crate::domain::ports::{
    ImportBatchSummary, ImportFailureKind, ImportMetrics, LocationRepository,
    LocationRepositoryError, NoOpImportMetrics, ObservationRepository, WeatherImport,
    WeatherSource,
};
use crate::domain::{Error, Location, NewObservation, Observation};

/// Parameter object bundling the driven ports used by the runner.
#[derive(Clone)]
pub struct WeatherImportPorts {
    /// Provider of current weather readings.
    pub weather: Arc<dyn WeatherSource>,
    /// Source of the tracked snapshot.
    pub locations: Arc<dyn LocationRepository>,
    /// Destination for observations.
    pub observations: Arc<dyn ObservationRepository>,
    /// Per-location outcome counters.
    pub metrics: Arc<dyn ImportMetrics>,
}

impl WeatherImportPorts {
    /// Bundle the ports with no-op metrics.
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        locations: Arc<dyn LocationRepository>,
        observations: Arc<dyn ObservationRepository>,
    ) -> Self {
        Self {
            weather,
            locations,
            observations,
            metrics: Arc::new(NoOpImportMetrics),
        }
    }

    /// Replace the metrics recorder.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn ImportMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Runs import cycles over every tracked location.
#[derive(Clone)]
pub struct WeatherImportRunner {
    weather: Arc<dyn WeatherSource>,
    locations: Arc<dyn LocationRepository>,
    observations: Arc<dyn ObservationRepository>,
    metrics: Arc<dyn ImportMetrics>,
}

impl WeatherImportRunner {
    /// Create a runner from its ports.
    pub fn new(ports: WeatherImportPorts) -> Self {
        let WeatherImportPorts {
            weather,
            locations,
            observations,
            metrics,
        } = ports;
        Self {
            weather,
            locations,
            observations,
            metrics,
        }
    }

    /// Fetch the current reading for `location` and append it as an
    /// observation.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationFetchError`] when the provider call, its decoding,
    /// or the insert fails.
    pub async fn fetch_and_store(
        &self,
        location: &Location,
    ) -> Result<Observation, ObservationFetchError> {
        let reading = self
            .weather
            .current(&location.coordinates)
            .await
            .map_err(|error| ObservationFetchError::new(location.name.as_str(), error))?;

        self.observations
            .insert(NewObservation {
                location_id: location.id,
                reading,
            })
            .await
            .map_err(|error| ObservationFetchError::new(location.name.as_str(), error))
    }

    async fn record_success(&self, location: &Location) {
        if let Err(error) = self.metrics.record_success(&location.name).await {
            debug!(error = %error, "import success metric dropped");
        }
    }

    async fn record_failure(&self, location: &Location, kind: ImportFailureKind) {
        if let Err(error) = self.metrics.record_failure(&location.name, kind).await {
            debug!(error = %error, "import failure metric dropped");
        }
    }
}

fn map_snapshot_error(error: LocationRepositoryError) -> Error {
    match error {
        LocationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("location store unavailable: {message}"))
        }
        other => Error::internal(other.to_string()),
    }
}

#[async_trait]
impl WeatherImport for WeatherImportRunner {
    async fn run_batch(&self) -> Result<ImportBatchSummary, Error> {
        let snapshot = self
            .locations
            .list_tracked()
            .await
            .map_err(map_snapshot_error)?;
        if snapshot.is_empty() {
            return Ok(ImportBatchSummary::default());
        }

        info!(count = snapshot.len(), "starting weather import batch");
        let mut summary = ImportBatchSummary {
            attempted: snapshot.len(),
            succeeded: 0,
        };

        for location in &snapshot {
            match self.fetch_and_store(location).await {
                Ok(observation) => {
                    summary.succeeded += 1;
                    debug!(
                        location_id = %location.id,
                        observation_id = %observation.id,
                        "stored weather observation"
                    );
                    self.record_success(location).await;
                }
                Err(error) => {
                    warn!(
                        location_id = %location.id,
                        name = %location.name,
                        error = %error,
                        "weather import failed for location"
                    );
                    self.record_failure(location, error.kind()).await;
                }
            }
        }

        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            "finished weather import batch"
        );
        Ok(summary)
    }
}
