//! Driving port for enabling and disabling location tracking.
//!
//! Both transitions are guarded: enabling a tracked location or disabling an
//! untracked one is rejected rather than silently accepted.

use async_trait::async_trait;

use crate::domain::{Location, LocationId, LocationLookup, LocationTrackingError};

/// Driving port consumed by HTTP handlers and tooling.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationTrackingCommand: Send + Sync {
    /// Resolve `raw_name` through the geocoder and enable tracking for the
    /// canonical location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationTrackingError`] describing the rejected outcome.
    async fn track(&self, raw_name: &str) -> Result<Location, LocationTrackingError>;

    /// Disable tracking for the location with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LocationTrackingError`] describing the rejected outcome.
    async fn untrack(&self, id: LocationId) -> Result<Location, LocationTrackingError>;
}

/// Fixture command that never resolves a name or finds an identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLocationTrackingCommand;

#[async_trait]
impl LocationTrackingCommand for FixtureLocationTrackingCommand {
    async fn track(&self, raw_name: &str) -> Result<Location, LocationTrackingError> {
        Err(LocationTrackingError::LocationNotFound(LocationLookup::Name(
            raw_name.to_owned(),
        )))
    }

    async fn untrack(&self, id: LocationId) -> Result<Location, LocationTrackingError> {
        Err(LocationTrackingError::LocationNotFound(LocationLookup::Id(id)))
    }
}
