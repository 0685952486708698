//! Reqwest-backed adapter for the OpenWeather current-weather API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::decode_reading;
use super::http::{build_client, fetch_body};
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::domain::{Coordinates, WeatherReading};

/// Weather adapter issuing `GET {endpoint}?units=metric&lat=..&lon=..&appid=..`.
///
/// Metric units are always requested, so temperatures are Celsius and wind
/// speeds metres per second.
pub struct OpenWeatherCurrentSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenWeatherCurrentSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherCurrentSource {
    async fn current(
        &self,
        coordinates: &Coordinates,
    ) -> Result<WeatherReading, WeatherSourceError> {
        let latitude = coordinates.latitude().to_string();
        let longitude = coordinates.longitude().to_string();
        let request = self.client.get(self.endpoint.clone()).query(&[
            ("units", "metric"),
            ("lat", latitude.as_str()),
            ("lon", longitude.as_str()),
            ("appid", self.api_key.as_str()),
        ]);
        let body = fetch_body(request).await?;
        decode_reading(&body).map_err(WeatherSourceError::decode)
    }
}
