//! Port for location persistence.
//!
//! Names are unique across all locations. Adapters must reject a second
//! insert for an existing name with
//! [`LocationRepositoryError::DuplicateName`] so concurrent resolutions of the
//! same city cannot create two rows.

use async_trait::async_trait;

use crate::domain::{Location, LocationId, NewLocation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location repository adapters.
    pub enum LocationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "location repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "location repository query failed: {message}",
        /// A location with this canonical name already exists.
        DuplicateName { name: String } =>
            "location named {name} already exists",
        /// The location to update does not exist.
        Missing { id: i64 } =>
            "location {id} does not exist",
    }
}

/// Port for location storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Fetch a location by its canonical name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, LocationRepositoryError>;

    /// Fetch a location by identifier.
    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LocationRepositoryError>;

    /// List every location with tracking enabled, ordered by identifier.
    async fn list_tracked(&self) -> Result<Vec<Location>, LocationRepositoryError>;

    /// Insert a new location and return it with its assigned identifier.
    async fn insert(&self, location: NewLocation) -> Result<Location, LocationRepositoryError>;

    /// Persist the mutable state of an existing location.
    async fn save(&self, location: &Location) -> Result<(), LocationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups find nothing and writes are accepted and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLocationRepository;

#[async_trait]
impl LocationRepository for FixtureLocationRepository {
    async fn find_by_name(&self, _name: &str) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _id: LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(None)
    }

    async fn list_tracked(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, location: NewLocation) -> Result<Location, LocationRepositoryError> {
        Ok(location.with_id(LocationId::new(1)))
    }

    async fn save(&self, _location: &Location) -> Result<(), LocationRepositoryError> {
        Ok(())
    }
}
