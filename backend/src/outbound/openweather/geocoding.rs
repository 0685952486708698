//! Reqwest-backed geocoding adapter for the OpenWeather direct geocoding API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::decode_candidates;
use super::http::{build_client, fetch_body};
use crate::domain::CityName;
use crate::domain::ports::{GeocodingCandidate, GeocodingSource, GeocodingSourceError};

/// Number of candidates requested; only the best match is ever used.
const CANDIDATE_LIMIT: &str = "1";

/// Geocoding adapter issuing `GET {endpoint}?q=..&limit=1&appid=..`.
pub struct OpenWeatherGeocodingSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenWeatherGeocodingSource {
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
impl GeocodingSource for OpenWeatherGeocodingSource {
    async fn lookup(
        &self,
        name: &CityName,
    ) -> Result<Vec<GeocodingCandidate>, GeocodingSourceError> {
        let request = self.client.get(self.endpoint.clone()).query(&[
            ("q", name.as_str()),
            ("limit", CANDIDATE_LIMIT),
            ("appid", self.api_key.as_str()),
        ]);
        let body = fetch_body(request).await?;
        decode_candidates(&body).map_err(GeocodingSourceError::decode)
    }
}
