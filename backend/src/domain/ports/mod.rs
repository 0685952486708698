//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`GeocodingSource`, `WeatherSource`, repositories, metrics)
//! are implemented by outbound adapters. Driving ports
//! (`LocationTrackingCommand`, `LocationTrackingQuery`, `WeatherImport`) are
//! consumed by HTTP handlers, the scheduler, and the CLI.

mod macros;
pub(crate) use macros::define_port_error;

mod geocoding_source;
mod import_metrics;
mod location_repository;
mod location_tracking_command;
mod location_tracking_query;
mod observation_repository;
mod weather_import;
mod weather_source;

#[cfg(test)]
pub use geocoding_source::MockGeocodingSource;
pub use geocoding_source::{
    FixtureGeocodingSource, GeocodingCandidate, GeocodingSource, GeocodingSourceError,
};
#[cfg(test)]
pub use import_metrics::MockImportMetrics;
pub use import_metrics::{ImportFailureKind, ImportMetrics, ImportMetricsError, NoOpImportMetrics};
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{
    FixtureLocationRepository, LocationRepository, LocationRepositoryError,
};
#[cfg(test)]
pub use location_tracking_command::MockLocationTrackingCommand;
pub use location_tracking_command::{FixtureLocationTrackingCommand, LocationTrackingCommand};
#[cfg(test)]
pub use location_tracking_query::MockLocationTrackingQuery;
pub use location_tracking_query::{FixtureLocationTrackingQuery, LocationTrackingQuery};
#[cfg(test)]
pub use observation_repository::MockObservationRepository;
pub use observation_repository::{
    FixtureObservationRepository, ObservationRepository, ObservationRepositoryError,
};
#[cfg(test)]
pub use weather_import::MockWeatherImport;
pub use weather_import::{ImportBatchSummary, WeatherImport};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{FixtureWeatherSource, WeatherSource, WeatherSourceError};
