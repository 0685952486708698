//! Driven port for resolving free-text city names to coordinates.
//!
//! Candidates are returned best match first; the domain only ever uses the
//! first one.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CityName, Coordinates};

/// One match returned by the geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingCandidate {
    /// Provider-normalised spelling of the place name.
    pub name: String,
    /// Position of the match.
    pub coordinates: Coordinates,
    /// ISO 3166 alpha-2 country code, when reported.
    pub country_code: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the geocoding provider.
    pub enum GeocodingSourceError {
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "geocoding transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } =>
            "geocoding timeout: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } =>
            "geocoding provider rejected request: {message}",
        /// The response body was not a well-formed candidate list.
        Decode { message: String } =>
            "geocoding response decode failed: {message}",
    }
}

/// Port for looking up city names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    /// Return the ordered candidate list for `name`; empty means no match.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use weather_backend::domain::CityName;
    /// use weather_backend::domain::ports::{FixtureGeocodingSource, GeocodingSource};
    ///
    /// let source = FixtureGeocodingSource;
    /// let candidates = source.lookup(&CityName::new("tallinn")?).await?;
    /// assert!(candidates.is_empty());
    /// ```
    async fn lookup(&self, name: &CityName) -> Result<Vec<GeocodingCandidate>, GeocodingSourceError>;
}

/// Fixture implementation that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGeocodingSource;

#[async_trait]
impl GeocodingSource for FixtureGeocodingSource {
    async fn lookup(
        &self,
        _name: &CityName,
    ) -> Result<Vec<GeocodingCandidate>, GeocodingSourceError> {
        Ok(Vec::new())
    }
}
