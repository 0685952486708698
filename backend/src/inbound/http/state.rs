//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLocationTrackingCommand, FixtureLocationTrackingQuery, LocationTrackingCommand,
    LocationTrackingQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Enable and disable tracking.
    pub tracking: Arc<dyn LocationTrackingCommand>,
    /// Read tracked cities and their latest weather.
    pub locations: Arc<dyn LocationTrackingQuery>,
}

impl HttpState {
    /// Construct state from the two driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use weather_backend::domain::ports::{
    ///     FixtureLocationTrackingCommand, FixtureLocationTrackingQuery,
    /// };
    /// use weather_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLocationTrackingCommand),
    ///     Arc::new(FixtureLocationTrackingQuery),
    /// );
    /// let _tracking = state.tracking.clone();
    /// ```
    pub fn new(
        tracking: Arc<dyn LocationTrackingCommand>,
        locations: Arc<dyn LocationTrackingQuery>,
    ) -> Self {
        Self {
            tracking,
            locations,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLocationTrackingCommand),
            Arc::new(FixtureLocationTrackingQuery),
        )
    }
}
