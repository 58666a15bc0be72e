// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POST /api/chat: classify, then reply from the canned tables or the model.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use haven_core::{
    ChatTurn, HavenError, InteractionLogAdapter, InteractionRecord, PluginAdapter,
    ProviderAdapter, ResponseType, UserPreferences,
};
use haven_cost::CostRecord;
use haven_router::responses::CRISIS_REPLY_OPTIONS;
use haven_router::{Category, ClassificationRequest, Detection, PassThrough, RouteDecision};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::handlers::ErrorResponse;
use crate::server::AppState;

/// Fixed message returned when the provider call fails.
pub const PROVIDER_FAILURE_MESSAGE: &str = "Failed to get response from Haven";

static CRISIS_OPTIONS: &[&str] = &CRISIS_REPLY_OPTIONS;

/// Request body for POST /api/chat.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default)]
    pub user_preferences: Option<UserPreferences>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for a successful chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub response_type: ResponseType,
    pub tokens_used: u32,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    /// Milliseconds from request arrival to reply.
    pub response_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<Detection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<&'static str>,
    /// Literal replies the client may offer after a crisis response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_options: Option<&'static [&'static str]>,
}

/// Body of the 500 returned when the provider fails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatErrorResponse {
    pub error: &'static str,
    pub response_type: ResponseType,
    pub tokens_used: u32,
    pub cost: f64,
    pub response_time: u64,
}

/// Request metadata copied into the interaction log.
#[derive(Debug, Clone, Default)]
struct ClientInfo {
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl ClientInfo {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };
        Self {
            user_agent: header("user-agent").map(str::to_string),
            ip_address: header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .or_else(|| header("x-real-ip"))
                .map(|v| v.trim().to_string()),
        }
    }
}

fn response_type_for(category: Category) -> ResponseType {
    match category {
        Category::Crisis => ResponseType::Crisis,
        Category::Exercise => ResponseType::Exercise,
        Category::Business => ResponseType::Business,
        Category::None => ResponseType::Openai,
    }
}

fn bad_request(error: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();

    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected chat request body");
            return bad_request(format!("Invalid request body: {}", rejection.body_text()));
        }
    };
    let Some(message) = body.message.clone().filter(|m| !m.trim().is_empty()) else {
        return bad_request("Message is required");
    };
    let client = ClientInfo::from_headers(&headers);

    let mut request = ClassificationRequest::new(&message).with_history(&body.conversation_history);
    if let Some(prefs) = body.user_preferences.as_ref() {
        request = request.with_preferences(prefs);
    }

    match state.router.route(&request) {
        RouteDecision::Canned(detection) => {
            let response = canned_reply(detection, elapsed_ms(start));
            finish(&state, &body, &message, client, &response);
            Json(response).into_response()
        }
        RouteDecision::PassThrough(params) => {
            match complete(&state, &body, &message, &params).await {
                Ok(mut response) => {
                    response.response_time = elapsed_ms(start);
                    finish(&state, &body, &message, client, &response);
                    Json(response).into_response()
                }
                Err(e) => {
                    let response_time = elapsed_ms(start);
                    error!(error = %e, "provider completion failed");
                    state.usage.record(ResponseType::Error, 0, response_time, 0.0);
                    spawn_log(
                        &state,
                        InteractionRecord {
                            timestamp: Utc::now(),
                            user_id: Some("unknown".into()),
                            session_id: Some("unknown".into()),
                            message: "Error occurred".into(),
                            response: e.to_string(),
                            response_type: ResponseType::Error,
                            crisis_level: None,
                            exercise_type: None,
                            tokens_used: 0,
                            response_time_ms: response_time,
                            user_agent: client.user_agent,
                            ip_address: client.ip_address,
                        },
                    );
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ChatErrorResponse {
                            error: PROVIDER_FAILURE_MESSAGE,
                            response_type: ResponseType::Error,
                            tokens_used: 0,
                            cost: 0.0,
                            response_time,
                        }),
                    )
                        .into_response()
                }
            }
        }
    }
}

fn canned_reply(detection: Detection, response_time: u64) -> ChatResponse {
    let policy = detection.response;
    let reply_options = detection.crisis_tier().map(|_| CRISIS_OPTIONS);
    ChatResponse {
        message: policy.map(|p| p.body).unwrap_or_default().to_string(),
        response_type: response_type_for(detection.category),
        tokens_used: 0,
        cost: 0.0,
        model_used: None,
        response_time,
        title: policy.map(|p| p.title),
        follow_up: policy.and_then(|p| p.follow_up),
        redirect_url: policy.and_then(|p| p.redirect_url),
        reply_options,
        detection: Some(detection),
    }
}

async fn complete(
    state: &AppState,
    body: &ChatRequest,
    message: &str,
    params: &PassThrough,
) -> Result<ChatResponse, HavenError> {
    let provider_request = state.context.assemble(
        message,
        &body.conversation_history,
        body.user_preferences.as_ref(),
        params,
    );
    let completion = state.provider.complete(provider_request).await?;
    let cost = CostRecord::price(body.session_id.as_deref(), &params.model, &completion.usage);

    Ok(ChatResponse {
        message: completion.content,
        response_type: ResponseType::Openai,
        tokens_used: completion.usage.total(),
        cost: cost.cost_usd,
        model_used: Some(params.model.clone()),
        response_time: 0,
        detection: None,
        title: None,
        follow_up: None,
        redirect_url: None,
        reply_options: None,
    })
}

/// Updates analytics and hands the interaction to the log without waiting.
fn finish(
    state: &AppState,
    body: &ChatRequest,
    message: &str,
    client: ClientInfo,
    response: &ChatResponse,
) {
    state.usage.record(
        response.response_type,
        response.tokens_used,
        response.response_time,
        response.cost,
    );
    info!(
        response_type = %response.response_type,
        tokens_used = response.tokens_used,
        response_time_ms = response.response_time,
        "chat reply sent"
    );

    let detection = response.detection.as_ref();
    spawn_log(
        state,
        InteractionRecord {
            timestamp: Utc::now(),
            user_id: body.user_id.clone(),
            session_id: body.session_id.clone(),
            message: message.to_string(),
            response: response.message.clone(),
            response_type: response.response_type,
            crisis_level: detection
                .and_then(Detection::crisis_tier)
                .map(|tier| tier.to_string()),
            exercise_type: detection
                .and_then(Detection::exercise_kind)
                .map(|kind| kind.to_string()),
            tokens_used: response.tokens_used,
            response_time_ms: response.response_time,
            user_agent: client.user_agent,
            ip_address: client.ip_address,
        },
    );
}

fn spawn_log(state: &AppState, record: InteractionRecord) {
    let log = state.interaction_log.clone();
    tokio::spawn(async move {
        if let Err(e) = log.append(record).await {
            warn!(logger = log.name(), error = %e, "failed to log interaction");
        }
    });
}
