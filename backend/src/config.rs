//! Application settings loaded via OrthoConfig.
//!
//! Values come from `WEATHER_*` environment variables, an optional
//! configuration file, and command-line flags. Unset values fall back to the
//! defaults below; accessors validate on read so binaries fail fast with a
//! clear message.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::scheduler::{ImportSchedule, ScheduleError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_IMPORT_CRON: &str = "0 */15 * * * *";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Errors raised when a configured value is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required value is missing or blank.
    #[error("{name} must be set")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },
    /// A value failed to parse.
    #[error("{name} is invalid: {message}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Parser diagnostic.
        message: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            name,
            message: message.to_string(),
        }
    }
}

impl From<ScheduleError> for ConfigError {
    fn from(value: ScheduleError) -> Self {
        Self::invalid("WEATHER_IMPORT_CRON", value)
    }
}

/// Runtime settings for the server and the import binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEATHER")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. In-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 8)]
    pub db_max_connections: u32,
    /// OpenWeather API key.
    pub openweather_api_key: Option<String>,
    /// Geocoding endpoint override.
    pub geocoding_url: Option<String>,
    /// Current-weather endpoint override.
    pub weather_url: Option<String>,
    /// Per-request timeout for provider calls, in seconds.
    #[ortho_config(default = 5)]
    pub request_timeout_secs: u64,
    /// Cron expression for the import schedule.
    pub import_cron: Option<String>,
    /// Comma-separated browser origins allowed to call the API.
    pub allowed_origins: Option<String>,
}

impl AppSettings {
    /// Listener address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|error| ConfigError::invalid("WEATHER_BIND_ADDR", error))
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, at least one.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.max(1)
    }

    /// Provider API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when unset or blank.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.openweather_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing {
                name: "WEATHER_OPENWEATHER_API_KEY",
            })
    }

    /// Geocoding endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value is not a URL.
    pub fn geocoding_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "WEATHER_GEOCODING_URL",
            self.geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL),
        )
    }

    /// Current-weather endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value is not a URL.
    pub fn weather_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "WEATHER_WEATHER_URL",
            self.weather_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL),
        )
    }

    /// Provider request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        match self.request_timeout_secs {
            0 => Err(ConfigError::invalid(
                "WEATHER_REQUEST_TIMEOUT_SECS",
                "timeout must be at least one second",
            )),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Parsed import schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the cron expression is invalid.
    pub fn import_schedule(&self) -> Result<ImportSchedule, ConfigError> {
        Ok(ImportSchedule::parse(
            self.import_cron.as_deref().unwrap_or(DEFAULT_IMPORT_CRON),
        )?)
    }

    /// Browser origins allowed by the CORS policy, normalised to
    /// `scheme://host[:port]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an entry is not an http(s)
    /// origin, and [`ConfigError::Missing`] when the list is blank.
    pub fn allowed_origins(&self) -> Result<Vec<String>, ConfigError> {
        const NAME: &str = "WEATHER_ALLOWED_ORIGINS";
        let origins = self
            .allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                let url = parse_url(NAME, origin)?;
                if url.path() != "/" || url.query().is_some() {
                    return Err(ConfigError::invalid(
                        NAME,
                        format!("{origin} is not a bare origin"),
                    ));
                }
                Ok(url.origin().ascii_serialization())
            })
            .collect::<Result<Vec<_>, _>>()?;
        if origins.is_empty() {
            return Err(ConfigError::Missing { name: NAME });
        }
        Ok(origins)
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|error| ConfigError::invalid(name, error))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::invalid(
            name,
            format!("unsupported scheme {other}"),
        )),
    }
}
