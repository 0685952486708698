//! Port for append-only observation persistence.

use async_trait::async_trait;

use crate::domain::{LocationId, NewObservation, Observation, ObservationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by observation repository adapters.
    pub enum ObservationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "observation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "observation repository query failed: {message}",
    }
}

/// Port for observation storage.
///
/// Observations are never updated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Append one observation and return it with its assigned identifier.
    async fn insert(
        &self,
        observation: NewObservation,
    ) -> Result<Observation, ObservationRepositoryError>;

    /// Return the observation with the greatest timestamp for a location.
    ///
    /// Ties on timestamp resolve to the most recently inserted row.
    async fn latest_for_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Observation>, ObservationRepositoryError>;
}

/// Fixture implementation that accepts writes and stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureObservationRepository;

#[async_trait]
impl ObservationRepository for FixtureObservationRepository {
    async fn insert(
        &self,
        observation: NewObservation,
    ) -> Result<Observation, ObservationRepositoryError> {
        Ok(observation.with_id(ObservationId::new(1)))
    }

    async fn latest_for_location(
        &self,
        _location_id: LocationId,
    ) -> Result<Option<Observation>, ObservationRepositoryError> {
        Ok(None)
    }
}
