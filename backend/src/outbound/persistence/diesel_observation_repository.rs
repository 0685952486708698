//! PostgreSQL-backed `ObservationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ObservationRepository, ObservationRepositoryError};
use crate::domain::{LocationId, NewObservation, Observation};

use super::error_mapping::{DieselFailure, classify_diesel_error, pool_message};
use super::models::{NewObservationRow, ObservationRow};
use super::pool::{DbPool, PoolError};
use super::schema::observations;

/// Diesel-backed implementation of the `ObservationRepository` port.
#[derive(Clone)]
pub struct DieselObservationRepository {
    pool: DbPool,
}

impl DieselObservationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ObservationRepositoryError {
    ObservationRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ObservationRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ObservationRepositoryError::connection(message),
        DieselFailure::Query(message) => ObservationRepositoryError::query(message),
        DieselFailure::UniqueViolation => {
            ObservationRepositoryError::query("unique constraint violated")
        }
    }
}

#[async_trait]
impl ObservationRepository for DieselObservationRepository {
    async fn insert(
        &self,
        observation: NewObservation,
    ) -> Result<Observation, ObservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ObservationRow = diesel::insert_into(observations::table)
            .values(NewObservationRow::from(&observation))
            .returning(ObservationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn latest_for_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Observation>, ObservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ObservationRow> = observations::table
            .filter(observations::location_id.eq(location_id.as_i64()))
            .order((observations::observed_at.desc(), observations::id.desc()))
            .select(ObservationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Observation::from))
    }
}
