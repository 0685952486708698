//! Domain primitives, services, and ports.
//!
//! Purpose: define the tracked-location model, the observation model, and the
//! services that resolve locations and import weather. Nothing here depends
//! on HTTP, SQL, or a specific weather provider.
//!
//! Public surface:
//! - `Location`, `Observation` and their identifiers and value types.
//! - `LocationTrackingService` (resolve and toggle tracking).
//! - `LocationQueryService` (read side).
//! - `WeatherImportRunner` (batch import).
//! - `Error`/`ErrorCode` for transport-agnostic failures.

pub mod error;
pub mod location;
pub mod location_query;
pub mod location_tracking;
pub mod observation;
pub mod ports;
pub mod weather_import;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::location::{
    CityName, CityNameValidationError, Coordinates, CoordinatesValidationError, Location,
    LocationId, NewLocation,
};
pub use self::location_query::LocationQueryService;
pub use self::location_tracking::{LocationLookup, LocationTrackingError, LocationTrackingService};
pub use self::observation::{NewObservation, Observation, ObservationId, WeatherReading};
pub use self::weather_import::{
    ObservationFetchCause, ObservationFetchError, WeatherImportPorts, WeatherImportRunner,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
