//! Run one weather import batch over every tracked city and exit.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use weather_backend::bootstrap::{Providers, Services, Stores};
use weather_backend::config::AppSettings;
use weather_backend::domain::ports::{NoOpImportMetrics, WeatherImport};

/// `import-weather` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-weather",
    about = "Fetch and store current weather for every tracked city once",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `WEATHER_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Exit with an error when any city fails to import.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let mut settings = AppSettings::load_from_iter([OsString::from("import-weather")])
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    if args.database_url.is_some() {
        settings.database_url = args.database_url;
    }
    if settings.database_url().is_none() {
        warn!("no database configured; the batch will see no tracked cities");
    }

    let stores = Stores::from_settings(&settings)
        .await
        .wrap_err("failed to prepare stores")?;
    let providers = Providers::from_settings(&settings).wrap_err("failed to build providers")?;
    let services = Services::new(&stores, &providers, Arc::new(NoOpImportMetrics));

    let summary = services
        .import
        .run_batch()
        .await
        .map_err(|err| eyre!("import batch failed: {err}"))?;
    info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed(),
        "weather import finished"
    );

    if args.strict && summary.failed() > 0 {
        return Err(eyre!(
            "{} of {} cities failed to import",
            summary.failed(),
            summary.attempted
        ));
    }
    Ok(())
}
