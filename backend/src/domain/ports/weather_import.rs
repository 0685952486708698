//! Driving port for one weather import cycle.
//!
//! Schedulers and the one-shot CLI call this port; neither needs to know how
//! locations are iterated.

use async_trait::async_trait;

use crate::domain::Error;

/// Counts reported by one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportBatchSummary {
    /// Locations in the tracked snapshot.
    pub attempted: usize,
    /// Locations whose observation was stored.
    pub succeeded: usize,
}

impl ImportBatchSummary {
    /// Number of locations that failed.
    pub const fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.succeeded)
    }
}

/// Port for running a full import cycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherImport: Send + Sync {
    /// Import one observation for every tracked location.
    ///
    /// # Errors
    ///
    /// Fails only when the tracked snapshot cannot be read. Per-location
    /// failures are logged and counted instead.
    async fn run_batch(&self) -> Result<ImportBatchSummary, Error>;
}
