//! Domain port surface for weather import counters.
//!
//! Recording failures never influence the batch outcome; callers discard the
//! returned error after logging it.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording import metrics.
    pub enum ImportMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } =>
            "import metrics exporter failed: {message}",
    }
}

/// Failure reason labels for a single location's import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportFailureKind {
    /// The provider could not be reached or timed out.
    Transport,
    /// The provider rejected the request.
    ProviderStatus,
    /// The provider response could not be decoded.
    Decode,
    /// The observation could not be written.
    Persistence,
}

impl ImportFailureKind {
    /// Stable label value for exporters.
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::ProviderStatus => "provider_status",
            Self::Decode => "decode",
            Self::Persistence => "persistence",
        }
    }
}

/// Metrics recording port for per-location import outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportMetrics: Send + Sync {
    /// Record one stored observation for `location_name`.
    async fn record_success(&self, location_name: &str) -> Result<(), ImportMetricsError>;

    /// Record one failed import for `location_name`.
    async fn record_failure(
        &self,
        location_name: &str,
        kind: ImportFailureKind,
    ) -> Result<(), ImportMetricsError>;
}

/// Metrics implementation that drops every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpImportMetrics;

#[async_trait]
impl ImportMetrics for NoOpImportMetrics {
    async fn record_success(&self, _location_name: &str) -> Result<(), ImportMetricsError> {
        Ok(())
    }

    async fn record_failure(
        &self,
        _location_name: &str,
        _kind: ImportFailureKind,
    ) -> Result<(), ImportMetricsError> {
        Ok(())
    }
}
