// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation over logged interactions.

use std::collections::BTreeMap;

use haven_core::InteractionRecord;
use serde::Serialize;

/// Totals over every logged interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalytics {
    pub total_conversations: usize,
    pub response_types: BTreeMap<String, u64>,
    pub crisis_levels: BTreeMap<String, u64>,
    pub exercise_types: BTreeMap<String, u64>,
    /// Mean over rows that used tokens, rounded.
    pub average_tokens: u64,
    /// Mean over rows with a recorded time, rounded.
    pub average_response_time: u64,
}

fn rounded_mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        (total * 2 + count) / (count * 2)
    }
}

pub fn summarize(records: &[InteractionRecord]) -> HistoryAnalytics {
    let mut analytics = HistoryAnalytics {
        total_conversations: records.len(),
        ..HistoryAnalytics::default()
    };
    let (mut tokens, mut token_rows) = (0u64, 0u64);
    let (mut time_ms, mut timed_rows) = (0u64, 0u64);

    for record in records {
        *analytics
            .response_types
            .entry(record.response_type.to_string())
            .or_default() += 1;
        if let Some(level) = record.crisis_level.as_deref().filter(|l| !l.is_empty()) {
            *analytics.crisis_levels.entry(level.to_string()).or_default() += 1;
        }
        if let Some(kind) = record.exercise_type.as_deref().filter(|k| !k.is_empty()) {
            *analytics.exercise_types.entry(kind.to_string()).or_default() += 1;
        }
        if record.tokens_used > 0 {
            tokens += u64::from(record.tokens_used);
            token_rows += 1;
        }
        // Divides by timed rows, not token rows, so canned replies count.
        if record.response_time_ms > 0 {
            time_ms += record.response_time_ms;
            timed_rows += 1;
        }
    }

    analytics.average_tokens = rounded_mean(tokens, token_rows);
    analytics.average_response_time = rounded_mean(time_ms, timed_rows);
    analytics
}
