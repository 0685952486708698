//! `LocationRepository` backed by a `BTreeMap` behind a tokio `RwLock`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{Location, LocationId, NewLocation};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Location>,
}

/// In-memory location store. Identifiers start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryLocationRepository {
    state: RwLock<State>,
}

impl InMemoryLocationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, LocationRepositoryError> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|row| row.name == name).cloned())
    }

    async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, LocationRepositoryError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id.as_i64()).cloned())
    }

    async fn list_tracked(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|row| row.tracking_enabled)
            .cloned()
            .collect())
    }

    async fn insert(&self, location: NewLocation) -> Result<Location, LocationRepositoryError> {
        let mut state = self.state.write().await;
        if state.rows.values().any(|row| row.name == location.name) {
            return Err(LocationRepositoryError::duplicate_name(location.name));
        }
        state.next_id += 1;
        let stored = location.with_id(LocationId::new(state.next_id));
        state.rows.insert(stored.id.as_i64(), stored.clone());
        Ok(stored)
    }

    async fn save(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut state = self.state.write().await;
        let Some(row) = state.rows.get_mut(&location.id.as_i64()) else {
            return Err(LocationRepositoryError::missing(location.id.as_i64()));
        };
        row.tracking_enabled = location.tracking_enabled;
        Ok(())
    }
}
