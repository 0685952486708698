//! Adapter wiring shared by the server and the import binary.
//!
//! Stores are PostgreSQL-backed when a database URL is configured, otherwise
//! in-memory. Providers always talk to OpenWeather and need an API key.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppSettings, ConfigError};
use crate::domain::ports::{
    GeocodingSource, ImportMetrics, LocationRepository, ObservationRepository, WeatherSource,
};
use crate::domain::{
    LocationQueryService, LocationTrackingService, WeatherImportPorts, WeatherImportRunner,
};
use crate::outbound::memory::{InMemoryLocationRepository, InMemoryObservationRepository};
use crate::outbound::openweather::{OpenWeatherCurrentSource, OpenWeatherGeocodingSource};
use crate::outbound::persistence::{
    DbPool, DieselLocationRepository, DieselObservationRepository, MigrationError, PoolConfig,
    PoolError, run_migrations,
};

/// Failures while assembling adapters.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A setting is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The connection pool could not be created.
    #[error("database pool: {0}")]
    Pool(#[from] PoolError),
    /// Schema migrations failed.
    #[error("database migrations: {0}")]
    Migrations(#[from] MigrationError),
    /// An HTTP client could not be built.
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Location and observation stores.
#[derive(Clone)]
pub struct Stores {
    /// Location store.
    pub locations: Arc<dyn LocationRepository>,
    /// Observation store.
    pub observations: Arc<dyn ObservationRepository>,
}

impl Stores {
    /// Fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            locations: Arc::new(InMemoryLocationRepository::new()),
            observations: Arc::new(InMemoryObservationRepository::new()),
        }
    }

    /// Stores over an existing pool.
    pub fn diesel(pool: DbPool) -> Self {
        Self {
            locations: Arc::new(DieselLocationRepository::new(pool.clone())),
            observations: Arc::new(DieselObservationRepository::new(pool)),
        }
    }

    /// Build stores from settings, migrating the schema first when a database
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when migrations or pool creation fail.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, BootstrapError> {
        let Some(url) = settings.database_url() else {
            warn!("no database configured; tracked cities are kept in memory");
            return Ok(Self::in_memory());
        };
        let applied = run_migrations(url).await?;
        info!(applied, "database schema ready");
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await?;
        Ok(Self::diesel(pool))
    }
}

/// Geocoding and weather providers.
#[derive(Clone)]
pub struct Providers {
    /// Name resolver.
    pub geocoder: Arc<dyn GeocodingSource>,
    /// Current-conditions source.
    pub weather: Arc<dyn WeatherSource>,
}

impl Providers {
    /// Build OpenWeather clients from settings.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] when the key or URLs are unusable
    /// and [`BootstrapError::Client`] when a client cannot be built.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, BootstrapError> {
        let api_key = settings.api_key()?;
        let timeout = settings.request_timeout()?;
        let geocoder =
            OpenWeatherGeocodingSource::new(settings.geocoding_url()?, api_key, timeout)?;
        let weather = OpenWeatherCurrentSource::new(settings.weather_url()?, api_key, timeout)?;
        Ok(Self {
            geocoder: Arc::new(geocoder),
            weather: Arc::new(weather),
        })
    }
}

/// Domain services sharing one set of stores.
#[derive(Clone)]
pub struct Services {
    /// Resolve and toggle tracking.
    pub tracking: Arc<LocationTrackingService>,
    /// Read side for cities and weather.
    pub query: Arc<LocationQueryService>,
    /// Batch importer.
    pub import: Arc<WeatherImportRunner>,
}

impl Services {
    /// Wire services over the given adapters.
    pub fn new(stores: &Stores, providers: &Providers, metrics: Arc<dyn ImportMetrics>) -> Self {
        let tracking = LocationTrackingService::new(
            providers.geocoder.clone(),
            stores.locations.clone(),
        );
        let query =
            LocationQueryService::new(stores.locations.clone(), stores.observations.clone());
        let import = WeatherImportRunner::new(
            WeatherImportPorts::new(
                providers.weather.clone(),
                stores.locations.clone(),
                stores.observations.clone(),
            )
            .with_metrics(metrics),
        );
        Self {
            tracking: Arc::new(tracking),
            query: Arc::new(query),
            import: Arc::new(import),
        }
    }
}
