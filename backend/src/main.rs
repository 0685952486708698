//! Backend entry-point: wires the city endpoints, health checks, OpenAPI
//! docs, and the weather import scheduler.

mod server;

use std::sync::Arc;

use actix_web::{rt, web};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use weather_backend::bootstrap::{Providers, Services, Stores};
use weather_backend::config::AppSettings;
use weather_backend::domain::ports::ImportMetrics;
use weather_backend::inbound::http::health::HealthState;
use weather_backend::inbound::http::state::HttpState;
use weather_backend::inbound::scheduler::ImportScheduler;

#[cfg(not(feature = "metrics"))]
use weather_backend::domain::ports::NoOpImportMetrics;
#[cfg(feature = "metrics")]
use weather_backend::outbound::metrics::PrometheusImportMetrics;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let schedule = settings.import_schedule()?;
    let allowed_origins = settings.allowed_origins()?;

    let stores = Stores::from_settings(&settings)
        .await
        .wrap_err("failed to prepare stores")?;
    let providers = Providers::from_settings(&settings).wrap_err("failed to build providers")?;

    #[cfg(feature = "metrics")]
    let registry = prometheus::Registry::new();
    #[cfg(feature = "metrics")]
    let import_metrics: Arc<dyn ImportMetrics> = Arc::new(
        PrometheusImportMetrics::new(&registry).wrap_err("failed to register import metrics")?,
    );
    #[cfg(not(feature = "metrics"))]
    let import_metrics: Arc<dyn ImportMetrics> = Arc::new(NoOpImportMetrics);

    let services = Services::new(&stores, &providers, import_metrics);
    let http_state = HttpState::new(services.tracking.clone(), services.query.clone());
    let config = ServerConfig::new(bind_addr, http_state, allowed_origins);
    #[cfg(feature = "metrics")]
    let config = config.with_registry(registry);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = ImportScheduler::new(schedule, services.import.clone());
    let scheduler_task = rt::spawn(async move { scheduler.run(shutdown_rx).await });

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "http server listening");

    let handle = server.handle();
    let signal_health = health_state.clone();
    rt::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown signal received");
        signal_health.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await?;
    health_state.mark_unhealthy();
    shutdown_tx.send_replace(true);
    if let Err(error) = scheduler_task.await {
        warn!(%error, "scheduler task ended abnormally");
    }
    info!("shutdown complete");
    Ok(())
}
