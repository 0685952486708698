//! Prometheus adapter for per-location weather import counters.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{ImportFailureKind, ImportMetrics, ImportMetricsError};

/// Prometheus-backed recorder for import outcomes.
///
/// Stored observations are counted in `weather_import_observations_total`
/// and failures in `weather_import_failures_total`, both labelled by city.
pub struct PrometheusImportMetrics {
    observations_total: CounterVec,
    failures_total: CounterVec,
}

impl PrometheusImportMetrics {
    /// Create and register counters with the provided registry.
    ///
    /// # Errors
    ///
    /// Returns an error when Prometheus rejects metric registration.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let observations_total = CounterVec::new(
            Opts::new(
                "weather_import_observations_total",
                "Observations stored by the import job, by city",
            ),
            &["location"],
        )?;
        let failures_total = CounterVec::new(
            Opts::new(
                "weather_import_failures_total",
                "Failed imports by city and reason",
            ),
            &["location", "reason"],
        )?;
        registry.register(Box::new(observations_total.clone()))?;
        registry.register(Box::new(failures_total.clone()))?;
        Ok(Self {
            observations_total,
            failures_total,
        })
    }
}

#[async_trait]
impl ImportMetrics for PrometheusImportMetrics {
    async fn record_success(&self, location_name: &str) -> Result<(), ImportMetricsError> {
        self.observations_total
            .get_metric_with_label_values(&[location_name])
            .map_err(|error| ImportMetricsError::export(error.to_string()))?
            .inc();
        Ok(())
    }

    async fn record_failure(
        &self,
        location_name: &str,
        kind: ImportFailureKind,
    ) -> Result<(), ImportMetricsError> {
        self.failures_total
            .get_metric_with_label_values(&[location_name, kind.as_label()])
            .map_err(|error| ImportMetricsError::export(error.to_string()))?
            .inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Counter coverage for import outcomes.

    use super::*;
    use rstest::rstest;

    fn make_metrics() -> (Registry, PrometheusImportMetrics) {
        let registry = Registry::new();
        let metrics =
            PrometheusImportMetrics::new(&registry).expect("metric registration should succeed");
        (registry, metrics)
    }

    #[tokio::test]
    async fn registers_both_families() {
        let (registry, metrics) = make_metrics();
        metrics.record_success("Tallinn").await.expect("record");
        metrics
            .record_failure("Tartu", ImportFailureKind::Decode)
            .await
            .expect("record");

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.name().to_owned())
            .collect();
        assert!(names.contains(&"weather_import_observations_total".to_owned()));
        assert!(names.contains(&"weather_import_failures_total".to_owned()));
    }

    #[rstest]
    #[case::transport(ImportFailureKind::Transport)]
    #[case::status(ImportFailureKind::ProviderStatus)]
    #[case::decode(ImportFailureKind::Decode)]
    #[case::persistence(ImportFailureKind::Persistence)]
    #[tokio::test]
    async fn failures_are_labelled_by_reason(#[case] kind: ImportFailureKind) {
        let (_registry, metrics) = make_metrics();

        metrics
            .record_failure("Tallinn", kind)
            .await
            .expect("recording failure should not fail");

        let counter = metrics
            .failures_total
            .with_label_values(&["Tallinn", kind.as_label()]);
        assert_eq!(counter.get() as u64, 1);
    }

    #[tokio::test]
    async fn successes_accumulate_per_city() {
        let (_registry, metrics) = make_metrics();
        metrics.record_success("Tallinn").await.expect("record");
        metrics.record_success("Tallinn").await.expect("record");

        let counter = metrics.observations_total.with_label_values(&["Tallinn"]);
        assert_eq!(counter.get() as u64, 2);
    }
}
