//! PostgreSQL-backed `LocationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{Location, LocationId, NewLocation};

use super::error_mapping::{DieselFailure, classify_diesel_error, pool_message};
use super::models::{LocationRow, LocationUpdate, NewLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::locations;

/// Diesel-backed implementation of the `LocationRepository` port.
///
/// The unique constraint on `locations.name` surfaces as
/// [`LocationRepositoryError::DuplicateName`].
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LocationRepositoryError {
    LocationRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> LocationRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => LocationRepositoryError::connection(message),
        DieselFailure::Query(message) => LocationRepositoryError::query(message),
        DieselFailure::UniqueViolation => LocationRepositoryError::query("unique constraint violated"),
    }
}

fn row_to_location(row: LocationRow) -> Result<Location, LocationRepositoryError> {
    let id = row.id;
    Location::try_from(row).map_err(|error| {
        LocationRepositoryError::query(format!("location {id} has invalid coordinates: {error}"))
    })
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LocationRow> = locations::table
            .filter(locations::name.eq(name))
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LocationRow> = locations::table
            .find(id.as_i64())
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn list_tracked(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LocationRow> = locations::table
            .filter(locations::tracking_enabled.eq(true))
            .order(locations::id.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_location).collect()
    }

    async fn insert(&self, location: NewLocation) -> Result<Location, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: LocationRow = diesel::insert_into(locations::table)
            .values(NewLocationRow::from(&location))
            .returning(LocationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::UniqueViolation => {
                    LocationRepositoryError::duplicate_name(location.name.as_str())
                }
                DieselFailure::Connection(message) => LocationRepositoryError::connection(message),
                DieselFailure::Query(message) => LocationRepositoryError::query(message),
            })?;

        row_to_location(row)
    }

    async fn save(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = LocationUpdate {
            tracking_enabled: location.tracking_enabled,
            updated_at: Utc::now(),
        };
        let affected = diesel::update(locations::table.find(location.id.as_i64()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(LocationRepositoryError::missing(location.id.as_i64()));
        }
        Ok(())
    }
}
