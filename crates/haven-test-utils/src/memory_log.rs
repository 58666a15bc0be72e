// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory interaction log for assertions on logged rows.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use haven_core::{
    select_session_history, select_user_history, AdapterType, HavenError, HealthStatus,
    InteractionLogAdapter, InteractionRecord, PluginAdapter,
};

/// Captures appended records. Can be told to fail every append.
pub struct MemoryLog {
    records: Arc<Mutex<Vec<InteractionRecord>>>,
    notify: Arc<Notify>,
    fail_appends: bool,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            fail_appends: false,
        }
    }

    /// A log whose appends always fail, for checking that failures stay silent.
    pub fn failing() -> Self {
        Self {
            fail_appends: true,
            ..Self::new()
        }
    }

    /// Pre-populated log, as if read back from storage.
    pub fn with_records(records: Vec<InteractionRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::new()
        }
    }

    pub async fn logged(&self) -> Vec<InteractionRecord> {
        self.records.lock().await.clone()
    }

    /// Waits until at least `count` records exist or `timeout` passes.
    ///
    /// Appends happen on spawned tasks, so callers poll instead of reading
    /// right after the response.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<InteractionRecord> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            {
                let records = self.records.lock().await;
                if records.len() >= count {
                    return records.clone();
                }
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.logged().await;
            }
        }
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MemoryLog {
    fn name(&self) -> &str {
        "memory-log"
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
impl InteractionLogAdapter for MemoryLog {
    async fn append(&self, record: InteractionRecord) -> Result<(), HavenError> {
        if self.fail_appends {
            return Err(HavenError::storage(std::io::Error::other("log unavailable")));
        }
        self.records.lock().await.push(record);
        self.notify.notify_waiters();
        Ok(())
    }

    async fn records(&self) -> Result<Vec<InteractionRecord>, HavenError> {
        if self.fail_appends {
            return Err(HavenError::storage(std::io::Error::other("log unavailable")));
        }
        Ok(self.logged().await)
    }

    async fn user_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<InteractionRecord>, HavenError> {
        Ok(select_user_history(self.records().await?, user_id, limit))
    }

    async fn session_history(
        &self,
        session_id: &str,
    ) -> Result<Vec<InteractionRecord>, HavenError> {
        Ok(select_session_history(self.records().await?, session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::ResponseType;

    fn record(message: &str) -> InteractionRecord {
        InteractionRecord {
            timestamp: chrono::Utc::now(),
            user_id: None,
            session_id: None,
            message: message.to_string(),
            response: "ok".to_string(),
            response_type: ResponseType::Openai,
            crisis_level: None,
            exercise_type: None,
            tokens_used: 30,
            response_time_ms: 5,
            user_agent: None,
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn wait_for_sees_spawned_append() {
        let log = Arc::new(MemoryLog::new());
        let writer = log.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            writer.append(record("later")).await.unwrap();
        });
        let records = log.wait_for(1, Duration::from_secs(2)).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "later");
    }

    #[tokio::test]
    async fn wait_for_times_out_with_what_it_has() {
        let log = MemoryLog::new();
        assert!(log.wait_for(1, Duration::from_millis(20)).await.is_empty());
    }

    #[tokio::test]
    async fn failing_log_rejects_appends() {
        let log = MemoryLog::failing();
        assert!(log.append(record("x")).await.is_err());
        assert!(log.records().await.is_err());
        assert!(log.user_history("u1", 5).await.is_err());
        assert!(log.session_history("s1").await.is_err());
    }

    #[tokio::test]
    async fn history_reads_filter_and_order() {
        let base = chrono::Utc::now();
        let at = |secs: i64, user: &str, session: &str, message: &str| InteractionRecord {
            timestamp: base + chrono::Duration::seconds(secs),
            user_id: Some(user.to_string()),
            session_id: Some(session.to_string()),
            ..record(message)
        };
        let log = MemoryLog::with_records(vec![
            at(30, "u1", "s1", "third"),
            at(10, "u1", "s1", "first"),
            at(20, "u2", "s2", "other"),
            at(40, "u1", "s3", "fourth"),
        ]);

        let user: Vec<_> = log.user_history("u1", 2).await.unwrap();
        let user: Vec<_> = user.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(user, vec!["fourth", "third"]);

        let session = log.session_history("s1").await.unwrap();
        let session: Vec<_> = session.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(session, vec!["first", "third"]);
    }
}
