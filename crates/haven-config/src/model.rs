// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Haven chat service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Haven configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HavenConfig {
    /// HTTP listener and admin settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Language-model API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Message routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Assistant persona and system prompt settings.
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Knowledge base lookup settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Spreadsheet interaction log settings.
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Cost estimation settings.
    #[serde(default)]
    pub cost: CostConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bearer token guarding the analytics endpoints. `None` locks them.
    #[serde(default)]
    pub admin_token: Option<String>,

    /// Public base URL used when building badge share links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            admin_token: None,
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

/// Language-model API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat completions API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model used for pass-through messages.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on 429/5xx responses before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

/// Message routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Number of most recent history turns forwarded to the provider.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    10
}

/// Assistant persona configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaConfig {
    /// Name the assistant introduces itself with.
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Mood used when the user has not picked one.
    #[serde(default = "default_mood")]
    pub default_mood: String,

    /// Qualities used when the user has not picked any.
    #[serde(default = "default_qualities")]
    pub default_qualities: Vec<String>,

    /// Inline base prompt. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the base prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            default_mood: default_mood(),
            default_qualities: default_qualities(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_persona_name() -> String {
    "Haven".to_string()
}

fn default_mood() -> String {
    "balanced-mix".to_string()
}

fn default_qualities() -> Vec<String> {
    vec!["empathetic".to_string(), "non-judgmental".to_string()]
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Path to a CSV export of the knowledge base.
    #[serde(default)]
    pub path: Option<String>,

    /// URL of a published CSV export, fetched once at startup.
    /// With neither `path` nor `url` set, lookups are disabled.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of matching rows injected into the prompt.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    5
}

/// Spreadsheet interaction log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsConfig {
    /// Whether interactions are appended to the spreadsheet.
    /// When off, interactions are only written to the tracing log.
    #[serde(default)]
    pub enabled: bool,

    /// Target spreadsheet identifier.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// A1 range rows are appended to.
    #[serde(default = "default_sheets_range")]
    pub range: String,

    /// OAuth bearer token for the Sheets API.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL of the Sheets API.
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            spreadsheet_id: None,
            range: default_sheets_range(),
            access_token: None,
            base_url: default_sheets_base_url(),
        }
    }
}

fn default_sheets_range() -> String {
    "Google_Haven_Data!A:O".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

/// Cost estimation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Average tokens a provider reply would have used, for savings estimates.
    #[serde(default = "default_tokens_per_reply")]
    pub tokens_per_reply: u32,

    /// USD per token used when estimating savings from canned replies.
    #[serde(default = "default_savings_cost_per_token")]
    pub savings_cost_per_token: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            tokens_per_reply: default_tokens_per_reply(),
            savings_cost_per_token: default_savings_cost_per_token(),
        }
    }
}

fn default_tokens_per_reply() -> u32 {
    500
}

fn default_savings_cost_per_token() -> f64 {
    0.00003
}
