//! Transport helpers shared by the OpenWeather adapters.
//!
//! Each adapter converts [`ProviderFailure`] into its own port error, so the
//! timeout and status classification lives in one place.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::domain::ports::{GeocodingSourceError, WeatherSourceError};

const USER_AGENT: &str = concat!("weather-backend/", env!("CARGO_PKG_VERSION"));

/// Failure observed before a response body could be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ProviderFailure {
    Transport(String),
    Timeout(String),
    Status(String),
}

impl From<ProviderFailure> for GeocodingSourceError {
    fn from(value: ProviderFailure) -> Self {
        match value {
            ProviderFailure::Transport(message) => Self::transport(message),
            ProviderFailure::Timeout(message) => Self::timeout(message),
            ProviderFailure::Status(message) => Self::status(message),
        }
    }
}

impl From<ProviderFailure> for WeatherSourceError {
    fn from(value: ProviderFailure) -> Self {
        match value {
            ProviderFailure::Transport(message) => Self::transport(message),
            ProviderFailure::Timeout(message) => Self::timeout(message),
            ProviderFailure::Status(message) => Self::status(message),
        }
    }
}

pub(super) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Send `request` and return the body of a successful response.
pub(super) async fn fetch_body(request: RequestBuilder) -> Result<Vec<u8>, ProviderFailure> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

// The request URL carries the API key, so it is stripped from messages.
fn map_transport_error(error: reqwest::Error) -> ProviderFailure {
    let timed_out = error.is_timeout();
    let message = error.without_url().to_string();
    if timed_out {
        ProviderFailure::Timeout(message)
    } else {
        ProviderFailure::Transport(message)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProviderFailure {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderFailure::Timeout(message)
        }
        _ => ProviderFailure::Status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
