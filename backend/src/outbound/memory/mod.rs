//! In-process repository adapters.
//!
//! Used when no database URL is configured and by integration tests. State is
//! lost on restart; name uniqueness and latest-observation ordering match the
//! PostgreSQL adapters.

mod location_repository;
mod observation_repository;

pub use location_repository::InMemoryLocationRepository;
pub use observation_repository::InMemoryObservationRepository;
