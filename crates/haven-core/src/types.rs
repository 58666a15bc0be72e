// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the provider adapters, and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    InteractionLog,
}

/// Speaker of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One prior turn of the conversation, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Display preferences chosen by the user during onboarding.
///
/// These only shape the system prompt; they never affect classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Tone selector, e.g. `motherly` or `calm-centering`.
    pub mood: Option<String>,
    /// Trait list, e.g. `["empathetic", "practical"]`.
    pub qualities: Vec<String>,
    /// Name the assistant should use when addressing the user.
    pub preferred_name: Option<String>,
}

/// Token counts reported by the provider for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A single-shot completion request to a language-model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub model: String,
    pub system_prompt: String,
    /// Prior turns, already truncated to the configured history window.
    pub history: Vec<ChatTurn>,
    pub message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A completed provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
}

/// How a chat reply was produced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseType {
    Crisis,
    Exercise,
    Business,
    Openai,
    Error,
}

impl ResponseType {
    /// Whether the reply came from a canned table rather than the provider.
    pub fn is_canned(&self) -> bool {
        matches!(self, Self::Crisis | Self::Exercise | Self::Business)
    }
}

/// One logged chat interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub message: String,
    pub response: String,
    pub response_type: ResponseType,
    pub crisis_level: Option<String>,
    pub exercise_type: Option<String>,
    pub tokens_used: u32,
    pub response_time_ms: u64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl InteractionRecord {
    /// Coarse conversation bucket used by the spreadsheet layout.
    pub fn conversation_type(&self) -> &'static str {
        if self.crisis_level.is_some() {
            "crisis"
        } else {
            "standard"
        }
    }
}
