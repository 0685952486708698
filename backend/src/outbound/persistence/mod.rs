//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and map
//! database failures onto the port error enums. Connections come from a
//! `bb8` pool via `diesel-async`.
//!
//! ```ignore
//! use weather_backend::outbound::persistence::{
//!     DbPool, DieselLocationRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("postgres://localhost/weather").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/weather")).await?;
//! let locations = DieselLocationRepository::new(pool.clone());
//! ```

mod diesel_location_repository;
mod diesel_observation_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_location_repository::DieselLocationRepository;
pub use diesel_observation_repository::DieselObservationRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
