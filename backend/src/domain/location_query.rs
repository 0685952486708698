//! Read-side service for tracked locations and their latest observation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    LocationRepository, LocationRepositoryError, LocationTrackingQuery, ObservationRepository,
    ObservationRepositoryError,
};
use crate::domain::{Error, Location, LocationId, Observation};

/// Query service backed by the location and observation stores.
#[derive(Clone)]
pub struct LocationQueryService {
    locations: Arc<dyn LocationRepository>,
    observations: Arc<dyn ObservationRepository>,
}

impl LocationQueryService {
    /// Create a query service from its driven ports.
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        observations: Arc<dyn ObservationRepository>,
    ) -> Self {
        Self {
            locations,
            observations,
        }
    }
}

fn map_location_error(error: LocationRepositoryError) -> Error {
    warn!(error = %error, "location store read failed");
    match error {
        LocationRepositoryError::Connection { .. } => {
            Error::service_unavailable("location store unavailable")
        }
        _ => Error::internal(error.to_string()),
    }
}

fn map_observation_error(error: ObservationRepositoryError) -> Error {
    warn!(error = %error, "observation store read failed");
    match error {
        ObservationRepositoryError::Connection { .. } => {
            Error::service_unavailable("observation store unavailable")
        }
        ObservationRepositoryError::Query { .. } => Error::internal(error.to_string()),
    }
}

#[async_trait]
impl LocationTrackingQuery for LocationQueryService {
    async fn list_tracked(&self) -> Result<Vec<Location>, Error> {
        self.locations
            .list_tracked()
            .await
            .map_err(map_location_error)
    }

    async fn location(&self, id: LocationId) -> Result<Location, Error> {
        self.locations
            .find_by_id(id)
            .await
            .map_err(map_location_error)?
            .ok_or_else(|| Error::not_found(format!("city {id} does not exist")))
    }

    async fn latest_observation(&self, id: LocationId) -> Result<Observation, Error> {
        let location = self.location(id).await?;
        self.observations
            .latest_for_location(location.id)
            .await
            .map_err(map_observation_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "no weather data recorded for city \"{}\"",
                    location.name
                ))
            })
    }
}
