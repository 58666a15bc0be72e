// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup, analytics, and health handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use haven_core::{HavenError, InteractionLogAdapter, InteractionRecord};
use haven_cost::{UsageSnapshot, UsageSummary};
use haven_router::{CrisisResources, CRISIS_RESOURCES};
use haven_sheets::{summarize, HistoryAnalytics};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, BadgeShare};
use crate::server::AppState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn not_found(error: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/crisis-resources
pub async fn get_crisis_resources() -> Json<CrisisResources> {
    Json(CRISIS_RESOURCES)
}

/// GET /api/badges/{badge_id}
pub async fn get_badge(Path(badge_id): Path<String>) -> Response {
    match catalog::badge(&badge_id) {
        Some(badge) => Json(badge).into_response(),
        None => not_found("Badge not found"),
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(Path(user_id): Path<String>) -> Response {
    match catalog::user(&user_id) {
        Some(user) => Json(user).into_response(),
        None => not_found("User not found"),
    }
}

/// GET /api/badges/{badge_id}/share/{user_id}
pub async fn get_badge_share(
    State(state): State<AppState>,
    Path((badge_id, user_id)): Path<(String, String)>,
) -> Response {
    let Some(badge) = catalog::badge(&badge_id) else {
        return not_found("Badge not found");
    };
    let Some(user) = catalog::user(&user_id) else {
        return not_found("User not found");
    };
    Json(BadgeShare::new(&state.public_base_url, badge, user)).into_response()
}

/// Response body for GET /api/analytics.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: UsageSnapshot,
    pub summary: UsageSummary,
}

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let analytics = state.usage.snapshot();
    let summary = analytics.summary();
    Json(AnalyticsResponse {
        success: true,
        analytics,
        summary,
    })
}

/// Response body for GET /api/analytics/history.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub analytics: HistoryAnalytics,
}

#[derive(Debug, Serialize)]
struct FailureResponse {
    success: bool,
    error: String,
}

fn storage_failure(e: HavenError) -> Response {
    tracing::error!(error = %e, "failed to read interaction history");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse {
            success: false,
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// GET /api/analytics/history
pub async fn get_history_analytics(State(state): State<AppState>) -> Response {
    match state.interaction_log.records().await {
        Ok(records) => Json(HistoryResponse {
            success: true,
            analytics: summarize(&records),
        })
        .into_response(),
        Err(e) => storage_failure(e),
    }
}

/// Query parameters for GET /api/history/users/{user_id}.
#[derive(Debug, Deserialize)]
pub struct UserHistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    10
}

/// Response body for the per-user and per-session history reads.
#[derive(Debug, Serialize)]
pub struct InteractionsResponse {
    pub success: bool,
    pub interactions: Vec<InteractionRecord>,
}

/// GET /api/history/users/{user_id}?limit=N
pub async fn get_user_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<UserHistoryQuery>,
) -> Response {
    match state
        .interaction_log
        .user_history(&user_id, query.limit)
        .await
    {
        Ok(interactions) => Json(InteractionsResponse {
            success: true,
            interactions,
        })
        .into_response(),
        Err(e) => storage_failure(e),
    }
}

/// GET /api/history/sessions/{session_id}
pub async fn get_session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.interaction_log.session_history(&session_id).await {
        Ok(interactions) => Json(InteractionsResponse {
            success: true,
            interactions,
        })
        .into_response(),
        Err(e) => storage_failure(e),
    }
}
