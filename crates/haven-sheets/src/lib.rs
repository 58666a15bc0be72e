// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction logging backends for Haven.
//!
//! [`SheetsLogger`] appends a flat row per chat to a Google Sheets range and
//! reads the rows back for analytics. [`TracingLog`] is the fallback when no
//! spreadsheet is configured.

pub mod analytics;
pub mod client;
pub mod fallback;
pub mod row;

use std::sync::Arc;

use haven_config::model::SheetsConfig;
use haven_core::{HavenError, InteractionLogAdapter};
use tracing::info;

pub use analytics::{summarize, HistoryAnalytics};
pub use client::SheetsLogger;
pub use fallback::TracingLog;

/// Picks the spreadsheet logger when enabled, otherwise the tracing fallback.
pub fn build_logger(config: &SheetsConfig) -> Result<Arc<dyn InteractionLogAdapter>, HavenError> {
    if config.enabled {
        let logger = SheetsLogger::new(config)?;
        info!(range = config.range.as_str(), "spreadsheet interaction log enabled");
        Ok(Arc::new(logger))
    } else {
        info!("spreadsheet logging disabled, interactions go to the tracing log");
        Ok(Arc::new(TracingLog))
    }
}
