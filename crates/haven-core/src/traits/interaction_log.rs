// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction log trait for append-only conversation logging backends.

use async_trait::async_trait;

use crate::error::HavenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::InteractionRecord;

/// Adapter for interaction logging backends (spreadsheet, tracing, memory).
///
/// Callers treat failures as non-fatal: a chat reply is never held back
/// because a log write failed.
#[async_trait]
pub trait InteractionLogAdapter: PluginAdapter {
    /// Appends one interaction record.
    async fn append(&self, record: InteractionRecord) -> Result<(), HavenError>;

    /// Reads back every stored record, oldest first.
    ///
    /// Write-only backends return an empty list.
    async fn records(&self) -> Result<Vec<InteractionRecord>, HavenError>;

    /// The `limit` most recent records for one user, newest first.
    async fn user_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<InteractionRecord>, HavenError>;

    /// Every record of one session in chronological order.
    async fn session_history(
        &self,
        session_id: &str,
    ) -> Result<Vec<InteractionRecord>, HavenError>;
}

/// Keeps one user's records, newest first, capped at `limit`.
///
/// Records without a user id never match.
pub fn select_user_history(
    records: Vec<InteractionRecord>,
    user_id: &str,
    limit: usize,
) -> Vec<InteractionRecord> {
    let mut history: Vec<_> = records
        .into_iter()
        .filter(|r| r.user_id.as_deref() == Some(user_id))
        .collect();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history.truncate(limit);
    history
}

/// Keeps one session's records, oldest first.
pub fn select_session_history(
    records: Vec<InteractionRecord>,
    session_id: &str,
) -> Vec<InteractionRecord> {
    let mut history: Vec<_> = records
        .into_iter()
        .filter(|r| r.session_id.as_deref() == Some(session_id))
        .collect();
    history.sort_by_key(|r| r.timestamp);
    history
}
