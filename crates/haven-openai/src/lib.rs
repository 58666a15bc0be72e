// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for Haven.
//!
//! Implements [`ProviderAdapter`] over the chat-completions endpoint. Only
//! messages the router lets through reach this crate.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use haven_config::model::OpenAiConfig;
use haven_core::{
    AdapterType, HavenError, HealthStatus, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::{ClientSettings, OpenAiClient};
use crate::types::{ApiMessage, ChatCompletionRequest, ChatCompletionResponse};

/// Environment variable consulted when `openai.api_key` is unset.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI chat-completions provider.
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig) -> Result<Self, HavenError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = OpenAiClient::new(
            &api_key,
            ClientSettings {
                base_url: config.base_url.clone(),
                timeout: Duration::from_secs(config.timeout_secs),
                max_retries: config.max_retries,
            },
        )?;

        info!(
            model = config.model.as_str(),
            endpoint = client.endpoint(),
            "OpenAI provider initialized"
        );
        Ok(Self { client })
    }
}

/// Builds the message list: system prompt, then history, then the new message.
fn to_chat_request(request: &ProviderRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ApiMessage::new("system", request.system_prompt.as_str()));
    messages.extend(
        request
            .history
            .iter()
            .map(|turn| ApiMessage::new(turn.role.to_string(), turn.content.as_str())),
    );
    messages.push(ApiMessage::new("user", request.message.as_str()));

    ChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

fn to_provider_response(response: ChatCompletionResponse) -> Result<ProviderResponse, HavenError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| HavenError::provider("OpenAI response contained no choices"))?;
    let usage = response.usage.unwrap_or_default();

    Ok(ProviderResponse {
        content: choice.message.content.unwrap_or_default(),
        model: response.model,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        },
    })
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HavenError> {
        // No probe call; a completion would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HavenError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HavenError> {
        let api_request = to_chat_request(&request);
        let response = self.client.complete(&api_request).await?;
        to_provider_response(response)
    }
}

fn resolve_api_key(config_key: Option<&str>) -> Result<String, HavenError> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Ok(key.to_string());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            HavenError::Config(format!(
                "OpenAI API key not found. Set openai.api_key in config or {API_KEY_ENV} environment variable."
            ))
        })
}
