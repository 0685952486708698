//! Location tracking service.
//!
//! Resolves free-text city names to canonical locations through the
//! geocoding port and toggles tracking on stored locations. Only the first
//! geocoding candidate is considered.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

pub use self::error::{LocationLookup, LocationTrackingError};
use crate::domain::ports::{
    GeocodingCandidate, GeocodingSource, LocationRepository, LocationRepositoryError,
    LocationTrackingCommand,
};
use crate::domain::{CityName, Location, LocationId, NewLocation};

/// Tracking service backed by a geocoder and a location store.
#[derive(Clone)]
pub struct LocationTrackingService {
    geocoder: Arc<dyn GeocodingSource>,
    locations: Arc<dyn LocationRepository>,
}

impl LocationTrackingService {
    /// Create a service from its driven ports.
    pub fn new(geocoder: Arc<dyn GeocodingSource>, locations: Arc<dyn LocationRepository>) -> Self {
        Self {
            geocoder,
            locations,
        }
    }

    async fn resolve(&self, name: &CityName) -> Result<GeocodingCandidate, LocationTrackingError> {
        let candidates = self.geocoder.lookup(name).await.map_err(|error| {
            warn!(query = %name, error = %error, "geocoding lookup failed");
            LocationTrackingError::ResolutionFailed {
                name: name.to_string(),
                message: error.to_string(),
            }
        })?;

        candidates.into_iter().next().ok_or_else(|| {
            LocationTrackingError::LocationNotFound(LocationLookup::Name(name.to_string()))
        })
    }

    async fn insert_tracked(
        &self,
        candidate: GeocodingCandidate,
    ) -> Result<Location, LocationTrackingError> {
        let new_location = NewLocation {
            name: candidate.name,
            tracking_enabled: true,
            coordinates: candidate.coordinates,
            country_code: candidate.country_code,
        };
        match self.locations.insert(new_location).await {
            Ok(location) => Ok(location),
            // A concurrent resolution of the same name won the insert.
            Err(LocationRepositoryError::DuplicateName { name }) => {
                Err(LocationTrackingError::AlreadyTracked { name })
            }
            Err(other) => Err(map_repository_error(other)),
        }
    }
}

fn map_repository_error(error: LocationRepositoryError) -> LocationTrackingError {
    warn!(error = %error, "location store operation failed");
    LocationTrackingError::Persistence {
        message: error.to_string(),
    }
}

#[async_trait]
impl LocationTrackingCommand for LocationTrackingService {
    async fn track(&self, raw_name: &str) -> Result<Location, LocationTrackingError> {
        let name = CityName::new(raw_name)?;
        let candidate = self.resolve(&name).await?;

        let existing = self
            .locations
            .find_by_name(&candidate.name)
            .await
            .map_err(map_repository_error)?;

        let location = match existing {
            Some(location) if location.tracking_enabled => {
                return Err(LocationTrackingError::AlreadyTracked {
                    name: location.name,
                });
            }
            Some(mut location) => {
                location.tracking_enabled = true;
                self.locations
                    .save(&location)
                    .await
                    .map_err(map_repository_error)?;
                location
            }
            None => self.insert_tracked(candidate).await?,
        };

        info!(
            location_id = %location.id,
            name = %location.name,
            "enabled tracking for location"
        );
        Ok(location)
    }

    async fn untrack(&self, id: LocationId) -> Result<Location, LocationTrackingError> {
        let mut location = self
            .locations
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or(LocationTrackingError::LocationNotFound(LocationLookup::Id(id)))?;

        if !location.tracking_enabled {
            return Err(LocationTrackingError::AlreadyUntracked {
                name: location.name,
            });
        }

        location.tracking_enabled = false;
        self.locations
            .save(&location)
            .await
            .map_err(map_repository_error)?;

        info!(
            location_id = %location.id,
            name = %location.name,
            "disabled tracking for location"
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests;
