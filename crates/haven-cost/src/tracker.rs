// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process usage analytics.
//!
//! The tracker keeps running totals for the lifetime of the process: request
//! counts per response type, tokens, response time, and spend. Canned replies
//! are credited with the provider tokens they avoided. Totals reset on
//! restart; the spreadsheet log is the durable record.

use std::sync::Mutex;

use haven_config::model::CostConfig;
use haven_core::ResponseType;
use serde::Serialize;
use tracing::debug;

/// Request counts per response type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResponseTypeCounts {
    pub crisis: u64,
    pub exercise: u64,
    pub business: u64,
    pub openai: u64,
    pub error: u64,
}

impl ResponseTypeCounts {
    fn bump(&mut self, response_type: ResponseType) {
        let slot = match response_type {
            ResponseType::Crisis => &mut self.crisis,
            ResponseType::Exercise => &mut self.exercise,
            ResponseType::Business => &mut self.business,
            ResponseType::Openai => &mut self.openai,
            ResponseType::Error => &mut self.error,
        };
        *slot += 1;
    }

    pub fn canned(&self) -> u64 {
        self.crisis + self.exercise + self.business
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSavings {
    pub estimated_tokens_saved: u64,
    pub estimated_cost_saved: f64,
}

/// Full analytics state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub total_requests: u64,
    pub response_types: ResponseTypeCounts,
    pub total_tokens_used: u64,
    pub total_response_time: u64,
    pub average_tokens_per_request: u64,
    pub average_response_time: u64,
    pub total_cost_usd: f64,
    pub cost_savings: CostSavings,
}

/// Human-readable digest of a [`UsageSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_requests: u64,
    /// "openai/total (pct%)".
    pub openai_usage: String,
    /// Dollar amount with two decimals, e.g. "$0.05".
    pub cost_savings: String,
    pub tokens_saved: u64,
    /// Rounded milliseconds, e.g. "120ms".
    pub average_response_time: String,
}

impl UsageSnapshot {
    pub fn summary(&self) -> UsageSummary {
        let openai_pct = if self.total_requests == 0 {
            0
        } else {
            rounded_ratio(self.response_types.openai * 100, self.total_requests)
        };
        UsageSummary {
            total_requests: self.total_requests,
            openai_usage: format!(
                "{}/{} ({openai_pct}%)",
                self.response_types.openai, self.total_requests
            ),
            cost_savings: format!("${:.2}", self.cost_savings.estimated_cost_saved),
            tokens_saved: self.cost_savings.estimated_tokens_saved,
            average_response_time: format!("{}ms", self.average_response_time),
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    requests: u64,
    response_types: ResponseTypeCounts,
    tokens: u64,
    response_time_ms: u64,
    cost_usd: f64,
}

/// Thread-safe running totals shared across request handlers.
#[derive(Debug)]
pub struct UsageTracker {
    totals: Mutex<Totals>,
    tokens_per_reply: u32,
    savings_cost_per_token: f64,
}

impl UsageTracker {
    pub fn new(config: &CostConfig) -> Self {
        Self {
            totals: Mutex::new(Totals::default()),
            tokens_per_reply: config.tokens_per_reply,
            savings_cost_per_token: config.savings_cost_per_token,
        }
    }

    /// Record one finished request.
    pub fn record(
        &self,
        response_type: ResponseType,
        tokens_used: u32,
        response_time_ms: u64,
        cost_usd: f64,
    ) {
        let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        totals.requests += 1;
        totals.response_types.bump(response_type);
        totals.tokens += u64::from(tokens_used);
        totals.response_time_ms += response_time_ms;
        totals.cost_usd += cost_usd;

        debug!(
            total_requests = totals.requests,
            %response_type,
            tokens_used,
            response_time_ms,
            "usage analytics updated"
        );
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        let (average_tokens_per_request, average_response_time) = if totals.requests == 0 {
            (0, 0)
        } else {
            (
                rounded_ratio(totals.tokens, totals.requests),
                rounded_ratio(totals.response_time_ms, totals.requests),
            )
        };

        let estimated_tokens_saved =
            totals.response_types.canned() * u64::from(self.tokens_per_reply);
        UsageSnapshot {
            total_requests: totals.requests,
            response_types: totals.response_types,
            total_tokens_used: totals.tokens,
            total_response_time: totals.response_time_ms,
            average_tokens_per_request,
            average_response_time,
            total_cost_usd: totals.cost_usd,
            cost_savings: CostSavings {
                estimated_tokens_saved,
                estimated_cost_saved: estimated_tokens_saved as f64 * self.savings_cost_per_token,
            },
        }
    }
}

/// Integer division rounded half up.
fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    (numerator * 2 + denominator) / (denominator * 2)
}
