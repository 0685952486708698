//! Outcomes rejected by the location tracking service.

use std::fmt;

use serde_json::json;

use crate::domain::{CityNameValidationError, Error, LocationId};

/// How a missing location was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationLookup {
    /// The geocoder returned no candidates for this query.
    Name(String),
    /// No stored location has this identifier.
    Id(LocationId),
}

impl fmt::Display for LocationLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "no city named \"{name}\" exists"),
            Self::Id(id) => write!(f, "city {id} does not exist"),
        }
    }
}

/// Typed failure for tracking commands.
///
/// Each variant maps to one outcome the caller can act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationTrackingError {
    /// The raw name failed basic formatting checks.
    #[error("malformed city name: {0}")]
    InvalidName(#[from] CityNameValidationError),
    /// Geocoding found nothing, or the identifier is unknown.
    #[error("{0}")]
    LocationNotFound(LocationLookup),
    /// The geocoding call or its response failed.
    #[error("could not resolve city \"{name}\": {message}")]
    ResolutionFailed {
        /// Raw query that was being resolved.
        name: String,
        /// Underlying cause.
        message: String,
    },
    /// Tracking is already enabled.
    #[error("city \"{name}\" is already being tracked")]
    AlreadyTracked {
        /// Canonical name of the location.
        name: String,
    },
    /// Tracking is already disabled.
    #[error("city \"{name}\" is already not being tracked")]
    AlreadyUntracked {
        /// Canonical name of the location.
        name: String,
    },
    /// The location store failed.
    #[error("location store unavailable: {message}")]
    Persistence {
        /// Underlying cause.
        message: String,
    },
}

impl From<LocationTrackingError> for Error {
    fn from(value: LocationTrackingError) -> Self {
        let message = value.to_string();
        match value {
            LocationTrackingError::InvalidName(_) => {
                Self::invalid_request(message).with_details(json!({ "field": "name" }))
            }
            LocationTrackingError::LocationNotFound(_) => Self::not_found(message),
            LocationTrackingError::ResolutionFailed { name, .. } => {
                Self::failed_dependency(format!("could not resolve city \"{name}\""))
                    .with_details(json!({ "name": name }))
            }
            LocationTrackingError::AlreadyTracked { name }
            | LocationTrackingError::AlreadyUntracked { name } => {
                Self::conflict(message).with_details(json!({ "name": name }))
            }
            LocationTrackingError::Persistence { .. } => {
                Self::service_unavailable("location store unavailable")
            }
        }
    }
}
