// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Sheets values API client.

use std::time::Duration;

use async_trait::async_trait;
use haven_config::model::SheetsConfig;
use haven_core::{
    select_session_history, select_user_history, AdapterType, HavenError, HealthStatus,
    InteractionLogAdapter, InteractionRecord, PluginAdapter,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::row::{from_row, to_row};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a [Value]; 1],
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    status: Option<String>,
    message: String,
}

/// Interaction log that appends one row per chat to a spreadsheet range.
#[derive(Debug, Clone)]
pub struct SheetsLogger {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
}

impl SheetsLogger {
    /// Builds a logger from config. Requires `spreadsheet_id` and
    /// `access_token`; validation enforces both when sheets are enabled.
    pub fn new(config: &SheetsConfig) -> Result<Self, HavenError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| HavenError::Config("sheets.spreadsheet_id is not set".into()))?;
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| HavenError::Config("sheets.access_token is not set".into()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| HavenError::Config(format!("invalid sheets token header value: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(HavenError::storage)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            range: config.range.clone(),
        })
    }

    /// `{base}/spreadsheets/{id}/values/{range}{suffix}` with the range
    /// percent-encoded as a single path segment.
    fn values_url(&self, suffix: &str) -> Result<Url, HavenError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| HavenError::Config(format!("invalid sheets.base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| HavenError::Config("sheets.base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{}{suffix}", self.range));
        Ok(url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, HavenError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<GoogleErrorResponse>(&body) {
            Ok(err) => format!(
                "Sheets API error ({}): {}",
                err.error.status.as_deref().unwrap_or("UNKNOWN"),
                err.error.message
            ),
            Err(_) => format!("Sheets API returned {status}: {body}"),
        };
        Err(HavenError::Storage {
            source: message.into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SheetsLogger {
    fn name(&self) -> &str {
        "sheets"
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
        debug!("sheets logger shutting down");
        Ok(())
    }
}

#[async_trait]
impl InteractionLogAdapter for SheetsLogger {
    async fn append(&self, record: InteractionRecord) -> Result<(), HavenError> {
        let mut url = self.values_url(":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let row = to_row(&record);
        let response = self
            .client
            .post(url)
            .json(&AppendBody { values: [&row] })
            .send()
            .await
            .map_err(HavenError::storage)?;
        Self::check(response).await?;

        info!(
            response_type = %record.response_type,
            conversation_type = record.conversation_type(),
            "interaction logged to spreadsheet"
        );
        Ok(())
    }

    async fn records(&self) -> Result<Vec<InteractionRecord>, HavenError> {
        let url = self.values_url("")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(HavenError::storage)?;
        let range: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(HavenError::storage)?;

        let mut records = Vec::with_capacity(range.values.len());
        for (index, row) in range.values.iter().enumerate() {
            match from_row(row) {
                Ok(record) => records.push(record),
                // Header rows land here too.
                Err(e) if index == 0 => debug!(error = %e, "skipping first row"),
                Err(e) => warn!(row = index + 1, error = %e, "skipping unreadable row"),
            }
        }
        debug!(rows = range.values.len(), parsed = records.len(), "spreadsheet rows read");
        Ok(records)
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
