// File: services/ledgerbridge_backend/src/main.rs
use ledgerbridge_backend::build_app;
use ledgerbridge_common::{config_error, log_error, log_result, BridgeError, Context};
use ledgerbridge_config::env_vars::{config_path_to_env_var, legacy_env_var, redact_secrets};
use ledgerbridge_config::{load_config, AppConfig};
use ledgerbridge_quickbooks::QuickBooksState;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

fn log_effective_config(config: &AppConfig) {
    match serde_json::to_value(config) {
        Ok(mut value) => {
            redact_secrets(&mut value);
            info!("Effective configuration: {}", value);
        }
        Err(e) => warn!("Could not serialize configuration for logging: {}", e),
    }
}

async fn run() -> Result<(), BridgeError> {
    let config = log_result(
        load_config().map_err(config_error),
        "Configuration loaded",
        "Failed to load config",
    )?;
    log_effective_config(&config);

    if config.quickbooks.refresh_token.is_none() {
        let path = "quickbooks.refresh_token";
        warn!(
            "Neither {} nor {} is set; /refresh will report an error",
            legacy_env_var(path).unwrap_or("REFRESH_TOKEN"),
            config_path_to_env_var(path)
        );
    }

    let config = Arc::new(config);
    let state = Arc::new(QuickBooksState::from_config(config.clone())?);
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")
}

#[tokio::main]
async fn main() -> ExitCode {
    ledgerbridge_common::logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "Ledgerbridge backend stopped");
            ExitCode::FAILURE
        }
    }
}
