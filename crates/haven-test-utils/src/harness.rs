// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full gateway with a mock provider and an
//! in-memory interaction log, then drives requests through the axum router
//! with `tower::ServiceExt::oneshot`. No sockets, no external services.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use haven_config::HavenConfig;
use haven_context::ContextEngine;
use haven_core::{HavenError, InteractionRecord};
use haven_gateway::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

use crate::memory_log::MemoryLog;
use crate::mock_provider::MockProvider;

/// Admin token used when [`TestHarnessBuilder::with_admin_token`] is not called.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: HavenConfig,
    provider: MockProvider,
    log: MemoryLog,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = HavenConfig::default();
        config.server.admin_token = Some(TEST_ADMIN_TOKEN.to_string());
        Self {
            config,
            provider: MockProvider::new(),
            log: MemoryLog::new(),
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.provider = MockProvider::with_responses(responses);
        self
    }

    /// Make every provider call fail.
    pub fn with_failing_provider(mut self) -> Self {
        self.provider = MockProvider::failing("mock provider failure");
        self
    }

    /// Replace the interaction log.
    pub fn with_log(mut self, log: MemoryLog) -> Self {
        self.log = log;
        self
    }

    /// Set or clear the analytics bearer token.
    pub fn with_admin_token(mut self, token: Option<&str>) -> Self {
        self.config.server.admin_token = token.map(str::to_string);
        self
    }

    /// Set a custom base persona prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.config.persona.system_prompt = Some(prompt.to_string());
        self
    }

    /// Adjust any other config field before the stack is built.
    pub fn with_config(mut self, edit: impl FnOnce(&mut HavenConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, HavenError> {
        let context = ContextEngine::new(&self.config.persona, &self.config.knowledge).await?;
        let provider = Arc::new(self.provider);
        let log = Arc::new(self.log);
        let state = AppState::new(&self.config, context, provider.clone(), log.clone());

        Ok(TestHarness {
            app: build_router(state.clone()),
            state,
            provider,
            log,
        })
    }
}

/// A fully wired gateway backed by mocks.
pub struct TestHarness {
    app: Router,
    pub state: AppState,
    pub provider: Arc<MockProvider>,
    pub log: Arc<MemoryLog>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send one request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// POST a JSON body to /api/chat.
    pub async fn chat(&self, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_default();
        self.send(request).await
    }

    /// GET a path, optionally with a bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap_or_default()).await
    }

    /// GET an admin path with the default test token.
    pub async fn get_admin(&self, path: &str) -> (StatusCode, Value) {
        self.get(path, Some(TEST_ADMIN_TOKEN)).await
    }

    /// Waits for background log writes.
    pub async fn logged(&self, count: usize) -> Vec<InteractionRecord> {
        self.log.wait_for(count, Duration::from_secs(2)).await
    }
}
