//! Weather observations recorded by the import job.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LocationId;

/// Opaque store-assigned identifier for an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationId(i64);

impl ObservationId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time reading returned by the weather provider.
///
/// Every measurement is independently optional. Units follow the provider's
/// metric contract: Celsius, metres per second, integer percent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherReading {
    /// Provider-reported observation time.
    pub observed_at: DateTime<Utc>,
    /// Air temperature in degrees Celsius.
    pub air_temperature: Option<f64>,
    /// Wind speed in metres per second.
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<i32>,
    /// Provider icon token such as `01d`.
    pub condition_code: Option<String>,
}

/// Observation awaiting its first insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObservation {
    /// Owning location.
    pub location_id: LocationId,
    /// Reading to persist.
    pub reading: WeatherReading,
}

/// Immutable persisted weather observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Store-assigned identity.
    pub id: ObservationId,
    /// Owning location.
    pub location_id: LocationId,
    /// Provider-reported observation time.
    pub observed_at: DateTime<Utc>,
    /// Air temperature in degrees Celsius.
    pub air_temperature: Option<f64>,
    /// Wind speed in metres per second.
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<i32>,
    /// Provider icon token such as `01d`.
    pub condition_code: Option<String>,
}

impl NewObservation {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: ObservationId) -> Observation {
        let WeatherReading {
            observed_at,
            air_temperature,
            wind_speed,
            humidity,
            condition_code,
        } = self.reading;
        Observation {
            id,
            location_id: self.location_id,
            observed_at,
            air_temperature,
            wind_speed,
            humidity,
            condition_code,
        }
    }
}
