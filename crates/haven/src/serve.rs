// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `haven serve` command implementation.
//!
//! Wires the persona and knowledge context, the OpenAI provider, and the
//! interaction log into the HTTP gateway, then serves until a shutdown
//! signal arrives.

use std::sync::Arc;

use haven_config::model::HavenConfig;
use haven_context::ContextEngine;
use haven_core::{HavenError, HealthStatus, PluginAdapter};
use haven_gateway::{start_server, AppState, ServerConfig};
use haven_openai::OpenAiProvider;
use haven_sheets::build_logger;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `haven serve` command.
pub async fn run_serve(config: HavenConfig) -> Result<(), HavenError> {
    init_tracing(&config.server.log_level);

    info!("starting haven serve");

    let context = ContextEngine::new(&config.persona, &config.knowledge).await?;
    let provider = Arc::new(OpenAiProvider::new(&config.openai)?);
    let interaction_log = build_logger(&config.sheets)?;

    log_health(provider.name(), provider.health_check().await);
    log_health(interaction_log.name(), interaction_log.health_check().await);

    if config.server.admin_token.is_none() {
        warn!("server.admin_token is not set, analytics endpoints will reject every request");
    }

    let state = AppState::new(&config, context, provider.clone(), interaction_log.clone());
    let cancel = shutdown::install_signal_handler();

    start_server(&ServerConfig::from(&config), state, cancel).await?;

    provider.shutdown().await?;
    interaction_log.shutdown().await?;
    info!("haven stopped");
    Ok(())
}

fn log_health(adapter: &str, result: Result<HealthStatus, HavenError>) {
    match result {
        Ok(HealthStatus::Healthy) => info!(adapter, "adapter ready"),
        Ok(status) => warn!(adapter, ?status, "adapter not fully healthy"),
        Err(e) => warn!(adapter, error = %e, "adapter health check failed"),
    }
}

/// Initializes the tracing subscriber with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("haven={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
