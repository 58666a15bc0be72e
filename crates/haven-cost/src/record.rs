// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-call cost records for language-model completions.

use haven_core::TokenUsage;
use serde::Serialize;
use tracing::info;

use crate::pricing::{calculate_cost, get_pricing};

/// A single priced completion call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    /// Unique record identifier (UUID v4).
    pub id: String,
    pub session_id: Option<String>,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub cost_usd: f64,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

impl CostRecord {
    /// Prices `usage` against `model` and logs the result.
    pub fn price(session_id: Option<&str>, model: &str, usage: &TokenUsage) -> Self {
        let cost_usd = calculate_cost(usage, &get_pricing(model));
        let record = Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.map(str::to_string),
            model: model.to_string(),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            cost_usd,
            created_at: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        };

        info!(
            model = record.model.as_str(),
            prompt_tokens = record.prompt_tokens,
            completion_tokens = record.completion_tokens,
            cost_usd = record.cost_usd,
            "completion cost recorded"
        );
        record
    }

    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}
