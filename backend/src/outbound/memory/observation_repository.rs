//! Append-only `ObservationRepository` held in a tokio `RwLock`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ObservationRepository, ObservationRepositoryError};
use crate::domain::{LocationId, NewObservation, Observation, ObservationId};

/// In-memory observation log.
#[derive(Debug, Default)]
pub struct InMemoryObservationRepository {
    rows: RwLock<Vec<Observation>>,
}

impl InMemoryObservationRepository {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObservationRepository for InMemoryObservationRepository {
    async fn insert(
        &self,
        observation: NewObservation,
    ) -> Result<Observation, ObservationRepositoryError> {
        let mut rows = self.rows.write().await;
        let id = i64::try_from(rows.len())
            .map_err(|_| ObservationRepositoryError::query("observation log is full"))?
            + 1;
        let stored = observation.with_id(ObservationId::new(id));
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn latest_for_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Observation>, ObservationRepositoryError> {
        let rows = self.rows.read().await;
        // Later inserts win ties because ids increase with position.
        Ok(rows
            .iter()
            .filter(|row| row.location_id == location_id)
            .max_by_key(|row| (row.observed_at, row.id))
            .cloned())
    }
}
