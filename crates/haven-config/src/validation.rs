// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, value ranges, and settings that only make
//! sense together.

use crate::diagnostic::ConfigError;
use crate::model::HavenConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HavenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if let Some(token) = &config.server.admin_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "server.admin_token must not be blank when set".to_string(),
        });
    }

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.model must not be empty".to_string(),
        });
    }

    if config.openai.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.max_tokens must be at least 1".to_string(),
        });
    }

    let temperature = config.openai.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!("openai.temperature must be between 0 and 2, got {temperature}"),
        });
    }

    if config.routing.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.history_limit must be at least 1".to_string(),
        });
    }

    if config.knowledge.max_entries == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.max_entries must be at least 1".to_string(),
        });
    }

    if config.knowledge.path.is_some() && config.knowledge.url.is_some() {
        errors.push(ConfigError::Validation {
            message: "knowledge.path and knowledge.url are mutually exclusive".to_string(),
        });
    }
    if let Some(url) = &config.knowledge.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("knowledge.url must be an http(s) URL, got {url:?}"),
            });
        }
    }

    if config.sheets.enabled {
        if config.sheets.spreadsheet_id.as_deref().is_none_or(|s| s.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: "sheets.spreadsheet_id is required when sheets.enabled = true"
                    .to_string(),
            });
        }
        if config.sheets.access_token.as_deref().is_none_or(|s| s.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: "sheets.access_token is required when sheets.enabled = true"
                    .to_string(),
            });
        }
    }

    if config.sheets.range.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "sheets.range must not be empty".to_string(),
        });
    }

    let per_token = config.cost.savings_cost_per_token;
    if per_token < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!("cost.savings_cost_per_token must be non-negative, got {per_token}"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
