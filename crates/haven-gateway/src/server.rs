// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use haven_context::ContextEngine;
use haven_core::{HavenError, InteractionLogAdapter, ProviderAdapter};
use haven_cost::UsageTracker;
use haven_router::MessageRouter;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, AuthConfig};
use crate::{chat, handlers};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<MessageRouter>,
    pub context: Arc<ContextEngine>,
    pub provider: Arc<dyn ProviderAdapter>,
    pub interaction_log: Arc<dyn InteractionLogAdapter>,
    pub usage: Arc<UsageTracker>,
    /// Guards the analytics routes.
    pub auth: AuthConfig,
    /// Prefix for badge share links.
    pub public_base_url: Arc<str>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the full route table.
///
/// Public:
/// - POST /api/chat
/// - GET /api/crisis-resources
/// - GET /api/badges/{badge_id}
/// - GET /api/badges/{badge_id}/share/{user_id}
/// - GET /api/users/{user_id}
/// - GET /health
///
/// Bearer-authenticated:
/// - GET /api/analytics
/// - GET /api/analytics/history
/// - GET /api/history/users/{user_id}
/// - GET /api/history/sessions/{session_id}
pub fn build_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/chat", post(chat::post_chat))
        .route("/api/crisis-resources", get(handlers::get_crisis_resources))
        .route("/api/badges/{badge_id}", get(handlers::get_badge))
        .route(
            "/api/badges/{badge_id}/share/{user_id}",
            get(handlers::get_badge_share),
        )
        .route("/api/users/{user_id}", get(handlers::get_user))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/api/analytics", get(handlers::get_analytics))
        .route("/api/analytics/history", get(handlers::get_history_analytics))
        .route("/api/history/users/{user_id}", get(handlers::get_user_history))
        .route(
            "/api/history/sessions/{session_id}",
            get(handlers::get_session_history),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), HavenError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HavenError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Haven gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| HavenError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Haven gateway stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
