//! Cron-driven trigger for weather import batches.
//!
//! The scheduler sleeps until the next cron occurrence, runs one batch to
//! completion, then computes the following occurrence from the current time.
//! Batches therefore never overlap; occurrences that elapse while a batch is
//! still running are skipped. A failed batch is logged and the loop carries
//! on. Shutdown is observed between batches through a `watch` channel.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{ImportBatchSummary, WeatherImport};

/// Errors raised while parsing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The expression is not a valid cron expression.
    #[error("invalid cron expression {expression:?}: {message}")]
    InvalidExpression {
        /// Expression as supplied.
        expression: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Parsed cron schedule.
///
/// Accepts the six-field form (`sec min hour dom month dow`) and the common
/// five-field form, which is pinned to second zero.
///
/// # Examples
/// ```
/// use weather_backend::inbound::scheduler::ImportSchedule;
///
/// let schedule = ImportSchedule::parse("*/15 * * * *").expect("valid cron");
/// assert_eq!(schedule.expression(), "0 */15 * * * *");
/// ```
#[derive(Debug, Clone)]
pub struct ImportSchedule {
    expression: String,
    schedule: cron::Schedule,
}

impl ImportSchedule {
    /// Parse a cron expression.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidExpression`] when the expression does
    /// not parse.
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let normalised = normalize_cron_expr(expression);
        let schedule = cron::Schedule::from_str(&normalised).map_err(|error| {
            ScheduleError::InvalidExpression {
                expression: expression.to_owned(),
                message: error.to_string(),
            }
        })?;
        Ok(Self {
            expression: normalised,
            schedule,
        })
    }

    /// Normalised six-field expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First occurrence strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&now).next()
    }

    /// Time to wait from `now` until the next occurrence.
    pub fn delay_from(&self, now: DateTime<Utc>) -> Option<Duration> {
        let next = self.next_after(now)?;
        Some((next - now).to_std().unwrap_or(Duration::ZERO))
    }
}

fn normalize_cron_expr(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_owned()
    }
}

/// Sleep abstraction so the loop can be driven without real time passing.
#[async_trait]
pub trait SchedulerSleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl SchedulerSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Periodic import trigger.
pub struct ImportScheduler {
    schedule: ImportSchedule,
    import: Arc<dyn WeatherImport>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn SchedulerSleeper>,
}

impl ImportScheduler {
    /// Create a scheduler using the system clock and tokio timers.
    pub fn new(schedule: ImportSchedule, import: Arc<dyn WeatherImport>) -> Self {
        Self {
            schedule,
            import,
            clock: Arc::new(DefaultClock),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the sleeper.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn SchedulerSleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run until `shutdown` carries `true` or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(schedule = %self.schedule.expression(), "weather import scheduler started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            let now = self.clock.utc();
            let Some(delay) = self.schedule.delay_from(now) else {
                warn!(schedule = %self.schedule.expression(), "schedule has no further occurrences");
                break;
            };
            debug!(delay_secs = delay.as_secs(), "waiting for next import");

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                () = self.sleeper.sleep(delay) => {}
            }

            self.tick().await;
        }
        info!("weather import scheduler stopped");
    }

    /// Run one batch, logging its outcome. Failures never propagate.
    pub async fn tick(&self) -> Option<ImportBatchSummary> {
        match self.import.run_batch().await {
            Ok(summary) if summary.attempted == 0 => {
                debug!("scheduled weather import found no tracked cities");
                Some(summary)
            }
            Ok(summary) => {
                info!(
                    attempted = summary.attempted,
                    succeeded = summary.succeeded,
                    failed = summary.failed(),
                    "scheduled weather import finished"
                );
                Some(summary)
            }
            Err(err) => {
                error!(code = ?err.code(), error = %err, "scheduled weather import failed");
                None
            }
        }
    }
}
