//! Driving port for reading tracked locations and their latest weather.

use async_trait::async_trait;

use crate::domain::{Error, Location, LocationId, Observation};

/// Domain use-case port for location and observation reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationTrackingQuery: Send + Sync {
    /// List every tracked location.
    async fn list_tracked(&self) -> Result<Vec<Location>, Error>;

    /// Fetch one location regardless of its tracking flag.
    async fn location(&self, id: LocationId) -> Result<Location, Error>;

    /// Fetch the most recent observation for a location.
    ///
    /// Fails with a not-found error when the location is unknown or has no
    /// observations yet.
    async fn latest_observation(&self, id: LocationId) -> Result<Observation, Error>;
}

/// Fixture query with no data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationTrackingQuery;

#[async_trait]
impl LocationTrackingQuery for FixtureLocationTrackingQuery {
    async fn list_tracked(&self) -> Result<Vec<Location>, Error> {
        Ok(Vec::new())
    }

    async fn location(&self, id: LocationId) -> Result<Location, Error> {
        Err(Error::not_found(format!("city {id} does not exist")))
    }

    async fn latest_observation(&self, id: LocationId) -> Result<Observation, Error> {
        Err(Error::not_found(format!("city {id} does not exist")))
    }
}
