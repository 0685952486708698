//! City tracking endpoints.
//!
//! ```text
//! GET    /api/v1/cities
//! POST   /api/v1/cities {"name":"tallinn"}
//! GET    /api/v1/cities/{id}
//! DELETE /api/v1/cities/{id}
//! GET    /api/v1/cities/{id}/weather
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Location, LocationId, Observation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const FLAG_HREF_BASE: &str = "https://flagcdn.com/h60";
const ICON_HREF_BASE: &str = "https://openweathermap.org/img/wn";

/// Request body for `POST /api/v1/cities`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackCityRequest {
    /// Free-text city name, resolved through the geocoder.
    #[schema(example = "tallinn")]
    pub name: String,
}

/// A city known to the service.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Provider-normalised name.
    #[schema(example = "Tallinn")]
    pub name: String,
    /// Latitude in decimal degrees.
    #[schema(example = 59.4372155)]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[schema(example = 24.7453688)]
    pub longitude: f64,
    /// Flag image for the country, when the country is known.
    #[schema(example = "https://flagcdn.com/h60/ee.png")]
    pub flag_href: Option<String>,
}

impl From<Location> for CityResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id.as_i64(),
            flag_href: location
                .country_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| format!("{FLAG_HREF_BASE}/{}.png", code.to_lowercase())),
            name: location.name,
            latitude: location.coordinates.latitude(),
            longitude: location.coordinates.longitude(),
        }
    }
}

/// Latest stored weather for a city.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    /// Provider-reported observation time, in UTC epoch seconds.
    #[schema(example = 1_661_870_592)]
    pub timestamp: i64,
    /// Air temperature in degrees Celsius.
    #[schema(example = 29.48)]
    pub air_temp: Option<f64>,
    /// Wind speed in metres per second.
    #[schema(example = 3.62)]
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent.
    #[schema(example = 64)]
    pub humidity: Option<i32>,
    /// Condition icon, when the provider reported one.
    #[schema(example = "https://openweathermap.org/img/wn/01d@2x.png")]
    pub icon_href: Option<String>,
}

impl From<Observation> for WeatherResponse {
    fn from(observation: Observation) -> Self {
        Self {
            timestamp: observation.observed_at.timestamp(),
            air_temp: observation.air_temperature,
            wind_speed: observation.wind_speed,
            humidity: observation.humidity,
            icon_href: observation
                .condition_code
                .map(|code| format!("{ICON_HREF_BASE}/{code}@2x.png")),
        }
    }
}

/// Register the city endpoints and their extractor error handlers.
///
/// Malformed JSON bodies and non-numeric identifiers are reported as
/// `invalid_request` errors rather than Actix's plain-text defaults.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "field": "body" }))
            .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid city id: {err}"))
            .with_details(json!({ "field": "id" }))
            .into()
    }))
    .service(list_cities)
    .service(track_city)
    .service(get_city)
    .service(untrack_city)
    .service(get_city_weather);
}

/// List every tracked city.
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses(
        (status = 200, description = "Tracked cities", body = [CityResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CityResponse>>> {
    let cities = state.locations.list_tracked().await?;
    Ok(web::Json(cities.into_iter().map(CityResponse::from).collect()))
}

/// Resolve a city name and enable tracking for it.
#[utoipa::path(
    post,
    path = "/api/v1/cities",
    request_body = TrackCityRequest,
    responses(
        (
            status = 201,
            description = "Tracking enabled",
            headers(("Location" = String, description = "URL of the tracked city")),
            body = CityResponse
        ),
        (status = 400, description = "Malformed city name", body = ErrorSchema),
        (status = 404, description = "Geocoder found no match", body = ErrorSchema),
        (status = 409, description = "City is already tracked", body = ErrorSchema),
        (status = 424, description = "Geocoder failed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "trackCity"
)]
#[post("/cities")]
pub async fn track_city(
    state: web::Data<HttpState>,
    payload: web::Json<TrackCityRequest>,
) -> ApiResult<HttpResponse> {
    let location = state.tracking.track(&payload.name).await?;
    let href = format!("/api/v1/cities/{}", location.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, href))
        .json(CityResponse::from(location)))
}

/// Fetch one city by identifier, tracked or not.
#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    params(("id" = i64, Path, description = "City identifier")),
    responses(
        (status = 200, description = "City", body = CityResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{id}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CityResponse>> {
    let id = LocationId::new(path.into_inner());
    let location = state.locations.location(id).await?;
    Ok(web::Json(location.into()))
}

/// Disable tracking for a city. Past observations are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    params(("id" = i64, Path, description = "City identifier")),
    responses(
        (status = 204, description = "Tracking disabled"),
        (status = 404, description = "Unknown city", body = ErrorSchema),
        (status = 409, description = "City is not tracked", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "untrackCity"
)]
#[delete("/cities/{id}")]
pub async fn untrack_city(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .tracking
        .untrack(LocationId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Latest stored weather for a city.
#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}/weather",
    params(("id" = i64, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Latest observation", body = WeatherResponse),
        (status = 404, description = "Unknown city or no data yet", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCityWeather"
)]
#[get("/cities/{id}/weather")]
pub async fn get_city_weather(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<WeatherResponse>> {
    let id = LocationId::new(path.into_inner());
    let observation = state.locations.latest_observation(id).await?;
    Ok(web::Json(observation.into()))
}

#[cfg(test)]
#[path = "cities_tests.rs"]
mod tests;
