// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat A:O row layout for interaction records.
//!
//! | col | field |
//! |-----|-------|
//! | A | timestamp (RFC 3339) |
//! | B | user id, "anonymous" when absent |
//! | C | message |
//! | D | response |
//! | E | response type |
//! | F | crisis level |
//! | G | exercise type |
//! | H | tokens used |
//! | I | response time (ms) |
//! | J | session id |
//! | K | user agent |
//! | L | ip address |
//! | M, N | reserved, written blank |
//! | O | conversation type |

use chrono::{DateTime, SecondsFormat, Utc};
use haven_core::{InteractionRecord, ResponseType};
use serde_json::Value;

/// Placeholder written to column B for unauthenticated users.
pub const ANONYMOUS_USER: &str = "anonymous";

pub const COLUMN_COUNT: usize = 15;

const TIMESTAMP: usize = 0;
const USER_ID: usize = 1;
const MESSAGE: usize = 2;
const RESPONSE: usize = 3;
const RESPONSE_TYPE: usize = 4;
const CRISIS_LEVEL: usize = 5;
const EXERCISE_TYPE: usize = 6;
const TOKENS_USED: usize = 7;
const RESPONSE_TIME: usize = 8;
const SESSION_ID: usize = 9;
const USER_AGENT: usize = 10;
const IP_ADDRESS: usize = 11;

fn text(value: Option<&str>) -> Value {
    Value::String(value.unwrap_or_default().to_string())
}

/// Flattens a record into one spreadsheet row.
pub fn to_row(record: &InteractionRecord) -> Vec<Value> {
    vec![
        Value::String(
            record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Value::String(
            record
                .user_id
                .clone()
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        ),
        Value::String(record.message.clone()),
        Value::String(record.response.clone()),
        Value::String(record.response_type.to_string()),
        text(record.crisis_level.as_deref()),
        text(record.exercise_type.as_deref()),
        Value::from(record.tokens_used),
        Value::from(record.response_time_ms),
        text(record.session_id.as_deref()),
        text(record.user_agent.as_deref()),
        text(record.ip_address.as_deref()),
        text(None),
        text(None),
        Value::String(record.conversation_type().to_string()),
    ]
}

/// Why a row could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("unparseable timestamp {0:?}")]
    BadTimestamp(String),
    #[error("unknown response type {0:?}")]
    UnknownResponseType(String),
}

// The values API returns strings for everything under FORMATTED_VALUE, but
// numbers may come back raw.
fn cell(row: &[Value], index: usize) -> String {
    match row.get(index) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn optional(row: &[Value], index: usize) -> Option<String> {
    Some(cell(row, index)).filter(|s| !s.is_empty())
}

fn number<T: std::str::FromStr + Default>(row: &[Value], index: usize) -> T {
    cell(row, index).trim().parse().unwrap_or_default()
}

/// Rebuilds a record from a row. Short rows are padded with blanks.
pub fn from_row(row: &[Value]) -> Result<InteractionRecord, RowError> {
    let raw_timestamp = cell(row, TIMESTAMP);
    let timestamp = DateTime::parse_from_rfc3339(raw_timestamp.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| RowError::BadTimestamp(raw_timestamp.clone()))?;

    let raw_type = cell(row, RESPONSE_TYPE);
    let response_type: ResponseType = raw_type
        .trim()
        .parse()
        .map_err(|_| RowError::UnknownResponseType(raw_type.clone()))?;

    Ok(InteractionRecord {
        timestamp,
        user_id: optional(row, USER_ID).filter(|id| id != ANONYMOUS_USER),
        session_id: optional(row, SESSION_ID),
        message: cell(row, MESSAGE),
        response: cell(row, RESPONSE),
        response_type,
        crisis_level: optional(row, CRISIS_LEVEL),
        exercise_type: optional(row, EXERCISE_TYPE),
        tokens_used: number(row, TOKENS_USED),
        response_time_ms: number(row, RESPONSE_TIME),
        user_agent: optional(row, USER_AGENT),
        ip_address: optional(row, IP_ADDRESS),
    })
}
