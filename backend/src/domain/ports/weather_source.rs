//! Driven port for fetching the current weather at a position.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Coordinates, WeatherReading};

define_port_error! {
    /// Errors surfaced while calling the weather provider.
    pub enum WeatherSourceError {
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "weather transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } =>
            "weather timeout: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } =>
            "weather provider rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "weather response decode failed: {message}",
    }
}

/// Port for reading current conditions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch one reading for `coordinates`.
    async fn current(&self, coordinates: &Coordinates) -> Result<WeatherReading, WeatherSourceError>;
}

/// Fixture implementation that always reports a provider timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureWeatherSource;

#[async_trait]
impl WeatherSource for FixtureWeatherSource {
    async fn current(
        &self,
        _coordinates: &Coordinates,
    ) -> Result<WeatherReading, WeatherSourceError> {
        Err(WeatherSourceError::timeout("fixture weather source has no data"))
    }
}
