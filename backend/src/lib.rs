//! Weather city tracker backend.
//!
//! Tracks cities resolved through a geocoder and periodically imports their
//! current weather. Layout follows ports and adapters: `domain` holds models,
//! services, and ports; `inbound` drives them (HTTP, scheduler); `outbound`
//! implements them (OpenWeather, PostgreSQL, in-memory, Prometheus).

pub mod bootstrap;
pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
