//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::web;
use weather_backend::inbound::http::state::HttpState;

#[cfg(feature = "metrics")]
use prometheus::Registry;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) allowed_origins: Vec<String>,
    #[cfg(feature = "metrics")]
    pub(crate) registry: Registry,
}

impl ServerConfig {
    /// Configuration serving `http_state` on `bind_addr` to browsers from
    /// `allowed_origins`.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        http_state: HttpState,
        allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
            allowed_origins,
            #[cfg(feature = "metrics")]
            registry: Registry::new(),
        }
    }

    /// Export HTTP metrics through `registry` alongside any collectors
    /// already registered on it.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }
}
