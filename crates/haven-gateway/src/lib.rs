// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Haven chat service.
//!
//! Every chat message is classified before anything else happens. Crisis,
//! exercise, and business messages get a canned reply immediately; the rest
//! are completed by the language-model provider. Each turn is recorded in the
//! in-process usage tracker and handed to the interaction log in the
//! background.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod handlers;
pub mod server;

use std::sync::Arc;
use std::time::Instant;

use haven_config::HavenConfig;
use haven_context::ContextEngine;
use haven_core::{InteractionLogAdapter, ProviderAdapter};
use haven_cost::UsageTracker;
use haven_router::MessageRouter;

pub use auth::AuthConfig;
pub use chat::{ChatErrorResponse, ChatRequest, ChatResponse, PROVIDER_FAILURE_MESSAGE};
pub use server::{build_router, start_server, AppState, ServerConfig};

impl AppState {
    /// Wires the shared state from config and the two external adapters.
    pub fn new(
        config: &HavenConfig,
        context: ContextEngine,
        provider: Arc<dyn ProviderAdapter>,
        interaction_log: Arc<dyn InteractionLogAdapter>,
    ) -> Self {
        Self {
            router: Arc::new(MessageRouter::new(config.routing.clone(), &config.openai)),
            context: Arc::new(context),
            provider,
            interaction_log,
            usage: Arc::new(UsageTracker::new(&config.cost)),
            auth: AuthConfig {
                bearer_token: config.server.admin_token.clone(),
            },
            public_base_url: Arc::from(config.server.public_base_url.as_str()),
            start_time: Instant::now(),
        }
    }
}

impl From<&HavenConfig> for ServerConfig {
    fn from(config: &HavenConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
        }
    }
}
