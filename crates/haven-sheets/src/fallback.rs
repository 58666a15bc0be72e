// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log-only interaction sink used when no spreadsheet is configured.

use async_trait::async_trait;
use haven_core::{
    AdapterType, HavenError, HealthStatus, InteractionLogAdapter, InteractionRecord,
    PluginAdapter,
};
use tracing::{debug, info};

use crate::row::ANONYMOUS_USER;

/// Writes each interaction to the tracing log and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

#[async_trait]
impl PluginAdapter for TracingLog {
    fn name(&self) -> &str {
        "tracing-log"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::InteractionLog
    }

    async fn health_check(&self) -> Result<HealthStatus, HavenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HavenError> {
        Ok(())
    }
}

#[async_trait]
impl InteractionLogAdapter for TracingLog {
    async fn append(&self, record: InteractionRecord) -> Result<(), HavenError> {
        info!(
            user_id = record.user_id.as_deref().unwrap_or(ANONYMOUS_USER),
            response_type = %record.response_type,
            crisis_level = record.crisis_level.as_deref().unwrap_or_default(),
            exercise_type = record.exercise_type.as_deref().unwrap_or_default(),
            tokens_used = record.tokens_used,
            response_time_ms = record.response_time_ms,
            "chat interaction"
        );
        debug!(message = %record.message, response = %record.response, "chat interaction text");
        Ok(())
    }

    async fn records(&self) -> Result<Vec<InteractionRecord>, HavenError> {
        Ok(Vec::new())
    }

    async fn user_history(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<InteractionRecord>, HavenError> {
        Ok(Vec::new())
    }

    async fn session_history(
        &self,
        _session_id: &str,
    ) -> Result<Vec<InteractionRecord>, HavenError> {
        Ok(Vec::new())
    }
}
