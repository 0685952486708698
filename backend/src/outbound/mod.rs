//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **openweather**: reqwest clients for geocoding and current weather
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs and tests
//! - **metrics**: Prometheus-backed import counters (feature-gated)
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod openweather;
pub mod persistence;
