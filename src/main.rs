//! Payroll engine HTTP server.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, DEFAULT_SETTINGS_FILE};

/// Environment variable naming the YAML settings file.
const ENV_SETTINGS: &str = "PAYROLL_SETTINGS";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings_path =
        std::env::var(ENV_SETTINGS).unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
    let loader = ConfigLoader::load(&settings_path)
        .and_then(|loader| loader.with_overrides(|key| std::env::var(key).ok()))
        .with_context(|| format!("loading settings from {}", settings_path))?;
    let settings = loader.settings();

    let state = AppState::load(loader.rate_store(), settings.consumption_tax_treatment);
    state.tables().validate().context("validating tax tables")?;
    let rates = state.rates();
    info!(
        rates_file = %settings.rates_file.display(),
        cbs_rate = %rates.cbs_rate,
        ibs_rate = %rates.ibs_rate,
        treatment = ?settings.consumption_tax_treatment,
        "Payroll engine configured"
    );

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    info!(address = %address, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
