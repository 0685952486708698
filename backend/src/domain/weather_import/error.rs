//! Per-location failure raised while importing one observation.

use crate::domain::ports::{ImportFailureKind, ObservationRepositoryError, WeatherSourceError};

/// Underlying cause of an [`ObservationFetchError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObservationFetchCause {
    /// The weather provider call or its decoding failed.
    #[error(transparent)]
    Source(#[from] WeatherSourceError),
    /// The observation could not be stored.
    #[error(transparent)]
    Persistence(#[from] ObservationRepositoryError),
}

/// Failure to fetch and store weather for one location.
///
/// The batch runner logs and counts these; they never fail the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to import weather data for \"{location_name}\": {cause}")]
pub struct ObservationFetchError {
    /// Canonical name of the affected location.
    pub location_name: String,
    /// What went wrong.
    pub cause: ObservationFetchCause,
}

impl ObservationFetchError {
    /// Build an error for `location_name`.
    pub fn new(location_name: impl Into<String>, cause: impl Into<ObservationFetchCause>) -> Self {
        Self {
            location_name: location_name.into(),
            cause: cause.into(),
        }
    }

    /// Metrics label for this failure.
    pub fn kind(&self) -> ImportFailureKind {
        match &self.cause {
            ObservationFetchCause::Source(
                WeatherSourceError::Transport { .. } | WeatherSourceError::Timeout { .. },
            ) => ImportFailureKind::Transport,
            ObservationFetchCause::Source(WeatherSourceError::Status { .. }) => {
                ImportFailureKind::ProviderStatus
            }
            ObservationFetchCause::Source(WeatherSourceError::Decode { .. }) => {
                ImportFailureKind::Decode
            }
            ObservationFetchCause::Persistence(_) => ImportFailureKind::Persistence,
        }
    }
}
