//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the city endpoints, the health checks, and the
//! response schemas. The document is served by Swagger UI in debug builds and
//! exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::cities::{CityResponse, TrackCityRequest, WeatherResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather city tracker API",
        description = "Track cities by name and read their latest imported weather."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::track_city,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::cities::untrack_city,
        crate::inbound::http::cities::get_city_weather,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TrackCityRequest,
        CityResponse,
        WeatherResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "cities", description = "Tracked cities and their weather"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
