//! Cross-origin policy for the browser frontend.

use actix_cors::Cors;
use actix_web::http::Method;

/// Seconds a browser may cache a preflight answer.
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for `allowed_origins`.
///
/// Only the methods the city endpoints use are allowed. Credentials are
/// supported, so origins are listed explicitly rather than wildcarded.
#[must_use]
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    allowed_origins.iter().fold(
        Cors::default()
            .allowed_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_any_header()
            .supports_credentials()
            .max_age(PREFLIGHT_MAX_AGE_SECS),
        |cors, origin| cors.allowed_origin(origin),
    )
}
