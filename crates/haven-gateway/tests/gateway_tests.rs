// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the HTTP gateway against mock adapters.

use axum::http::StatusCode;
use haven_core::{ChatRole, ResponseType};
use haven_test_utils::{MemoryLog, TestHarness, TEST_ADMIN_TOKEN};
use serde_json::json;

async fn harness() -> TestHarness {
    TestHarness::builder().build().await.unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness().await;
    let (status, body) = h.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptimeSecs"].is_u64());
}

#[tokio::test]
async fn crisis_message_gets_canned_reply_without_provider_call() {
    let h = harness().await;
    let (status, body) = h
        .chat(json!({"message": "I want to kill myself", "userId": "u1", "sessionId": "s1"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseType"], "crisis");
    assert_eq!(body["tokensUsed"], 0);
    assert_eq!(body["cost"], 0.0);
    assert_eq!(body["detection"]["level"], "immediate");
    assert_eq!(body["detection"]["matchedKeyword"], "kill myself");
    assert_eq!(body["title"], "🚨 Crisis Support Needed");
    assert!(body["message"].as_str().unwrap().contains("988"));
    assert_eq!(body["replyOptions"].as_array().unwrap().len(), 3);
    assert!(body.get("modelUsed").is_none());
    assert_eq!(h.provider.call_count().await, 0);

    let logged = h.logged(1).await;
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].response_type, ResponseType::Crisis);
    assert_eq!(logged[0].crisis_level.as_deref(), Some("immediate"));
    assert_eq!(logged[0].user_id.as_deref(), Some("u1"));
    assert_eq!(logged[0].session_id.as_deref(), Some("s1"));
}

#[tokio::test]
async fn exercise_request_is_canned() {
    let h = harness().await;
    let (status, body) = h.chat(json!({"message": "Can we do some breathing?"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseType"], "exercise");
    assert_eq!(body["detection"]["type"], "breathing");
    assert!(body.get("replyOptions").is_none());
    assert_eq!(h.provider.call_count().await, 0);

    let logged = h.logged(1).await;
    assert_eq!(logged[0].exercise_type.as_deref(), Some("breathing"));
}

#[tokio::test]
async fn business_question_carries_redirect() {
    let h = harness().await;
    let (status, body) = h.chat(json!({"message": "What's your pricing?"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseType"], "business");
    assert_eq!(body["redirectUrl"], "/pricing");
}

#[tokio::test]
async fn ordinary_message_is_completed_by_provider() {
    let h = TestHarness::builder()
        .with_mock_responses(vec!["That sounds like a lovely day.".into()])
        .with_system_prompt("You are a test companion.")
        .build()
        .await
        .unwrap();

    let (status, body) = h
        .chat(json!({
            "message": "I went for a walk today",
            "conversationHistory": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello!"}
            ],
            "userPreferences": {"mood": "best-friend", "preferredName": "Jo"}
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "That sounds like a lovely day.");
    assert_eq!(body["responseType"], "openai");
    assert_eq!(body["tokensUsed"], 30);
    assert_eq!(body["modelUsed"], "gpt-4o-mini");
    assert!(body["cost"].as_f64().unwrap() > 0.0);
    assert!(body.get("detection").is_none());

    let requests = h.provider.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.message, "I went for a walk today");
    assert_eq!(request.history.len(), 2);
    assert_eq!(request.history[1].role, ChatRole::Assistant);
    assert!(request.system_prompt.starts_with("You are a test companion."));
    assert!(request.system_prompt.contains("The user prefers to be called: Jo"));

    let logged = h.logged(1).await;
    assert_eq!(logged[0].response_type, ResponseType::Openai);
    assert_eq!(logged[0].tokens_used, 30);
}

#[tokio::test]
async fn hedged_crisis_message_goes_to_provider() {
    let h = harness().await;
    let (_, body) = h.chat(json!({"message": "I'm worried I might hurt myself"})).await;
    assert_eq!(body["responseType"], "openai");
    assert_eq!(body["message"], "mock response");
    assert_eq!(h.provider.call_count().await, 1);
}

#[tokio::test]
async fn provider_failure_returns_error_payload() {
    let h = TestHarness::builder()
        .with_failing_provider()
        .build()
        .await
        .unwrap();

    let (status, body) = h.chat(json!({"message": "tell me something nice"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to get response from Haven");
    assert_eq!(body["responseType"], "error");
    assert_eq!(body["tokensUsed"], 0);

    let logged = h.logged(1).await;
    assert_eq!(logged[0].response_type, ResponseType::Error);
    assert_eq!(logged[0].message, "Error occurred");
    assert!(logged[0].response.contains("mock provider failure"));

    let (_, analytics) = h.get_admin("/api/analytics").await;
    assert_eq!(analytics["analytics"]["responseTypes"]["error"], 1);
}

#[tokio::test]
async fn missing_or_blank_message_is_rejected() {
    let h = harness().await;
    for body in [json!({}), json!({"message": "   "})] {
        let (status, body) = h.chat(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }
    assert_eq!(h.provider.call_count().await, 0);
}

#[tokio::test]
async fn log_failure_does_not_affect_reply() {
    let h = TestHarness::builder()
        .with_log(MemoryLog::failing())
        .build()
        .await
        .unwrap();
    let (status, body) = h.chat(json!({"message": "I keep cutting myself"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseType"], "crisis");
}

#[tokio::test]
async fn analytics_requires_bearer_token() {
    let h = harness().await;
    let (status, _) = h.get("/api/analytics", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = h.get("/api/analytics", Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = h.get("/api/analytics", Some(TEST_ADMIN_TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn analytics_locked_when_no_token_configured() {
    let h = TestHarness::builder()
        .with_admin_token(None)
        .build()
        .await
        .unwrap();
    let (status, _) = h.get("/api/analytics/history", Some("anything")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn analytics_counts_canned_and_model_replies() {
    let h = harness().await;
    h.chat(json!({"message": "I want to die"})).await;
    h.chat(json!({"message": "let's try meditation"})).await;
    h.chat(json!({"message": "how was your weekend"})).await;

    let (status, body) = h.get_admin("/api/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let analytics = &body["analytics"];
    assert_eq!(analytics["totalRequests"], 3);
    assert_eq!(analytics["responseTypes"]["crisis"], 1);
    assert_eq!(analytics["responseTypes"]["exercise"], 1);
    assert_eq!(analytics["responseTypes"]["openai"], 1);
    assert_eq!(analytics["totalTokensUsed"], 30);
    assert_eq!(analytics["costSavings"]["estimatedTokensSaved"], 1000);
    assert_eq!(body["summary"]["openaiUsage"], "1/3 (33%)");
}

#[tokio::test]
async fn history_analytics_summarizes_logged_rows() {
    let h = harness().await;
    h.chat(json!({"message": "I keep cutting myself"})).await;
    h.chat(json!({"message": "anything fun to do tonight"})).await;
    h.logged(2).await;

    let (status, body) = h.get_admin("/api/analytics/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["analytics"]["totalConversations"], 2);
    assert_eq!(body["analytics"]["crisisLevels"]["immediate"], 1);
    assert_eq!(body["analytics"]["averageTokens"], 30);
}

#[tokio::test]
async fn history_analytics_reports_storage_failure() {
    let h = TestHarness::builder()
        .with_log(MemoryLog::failing())
        .build()
        .await
        .unwrap();
    let (status, body) = h.get_admin("/api/analytics/history").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn crisis_resources_are_public() {
    let h = harness().await;
    let (status, body) = h.get("/api/crisis-resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suicideLine"], "988");
    assert_eq!(body["websites"]["nami"], "https://www.nami.org/help");
}

#[tokio::test]
async fn badge_and_user_lookups() {
    let h = harness().await;
    let (status, badge) = h.get("/api/badges/growth-seeker", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(badge["name"], "Growth Seeker");

    let (status, user) = h.get("/api/users/user_67890", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["displayName"], "Sarah Chen");

    let (status, body) = h.get("/api/badges/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Badge not found");

    let (status, body) = h.get("/api/users/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn badge_share_builds_link_from_public_base_url() {
    let h = TestHarness::builder()
        .with_config(|c| c.server.public_base_url = "https://haven.example".into())
        .build()
        .await
        .unwrap();
    let (status, body) = h
        .get("/api/badges/growth-seeker/share/user_12345", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["shareUrl"],
        "https://haven.example/share/badge/growth-seeker/user_12345"
    );
    assert!(body["shareText"].as_str().unwrap().contains("\"Growth Seeker\" badge on Haven"));

    let (status, _) = h.get("/api/badges/growth-seeker/share/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn moderate_crisis_reply_is_interactive() {
    let h = harness().await;
    let (status, body) = h.chat(json!({"message": "I have a whole bottle of pills"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responseType"], "crisis");
    assert_eq!(body["detection"]["level"], "moderate");
    assert_eq!(body["detection"]["matchedKeyword"], "pills");
    assert_eq!(body["detection"]["response"]["requiresHuman"], true);
    assert_eq!(body["detection"]["response"]["interactive"], true);
    assert_eq!(body["detection"]["response"]["priority"], "moderate");
    assert_eq!(body["title"], "💙 I'm Here For You");
    assert_eq!(body["followUp"], "What's going on? I'm here to listen.");
    assert!(body.get("redirectUrl").is_none());
    assert_eq!(body["replyOptions"].as_array().unwrap().len(), 3);
    assert_eq!(h.provider.call_count().await, 0);

    let logged = h.logged(1).await;
    assert_eq!(logged[0].crisis_level.as_deref(), Some("moderate"));
}

#[tokio::test]
async fn immediate_crisis_reply_carries_follow_up() {
    let h = harness().await;
    let (_, body) = h.chat(json!({"message": "I keep cutting myself"})).await;
    assert_eq!(body["detection"]["level"], "immediate");
    assert!(body["followUp"].is_string());
    assert!(body.get("redirectUrl").is_none());
    assert_eq!(body["detection"]["response"]["priority"], "immediate");
}

#[tokio::test]
async fn user_and_session_history_reads() {
    let h = harness().await;
    h.chat(json!({"message": "hello there friend", "userId": "u1", "sessionId": "s1"}))
        .await;
    h.chat(json!({"message": "can we do a breathing exercise", "userId": "u1", "sessionId": "s1"}))
        .await;
    h.chat(json!({"message": "hello from elsewhere", "userId": "u2", "sessionId": "s2"}))
        .await;
    h.logged(3).await;

    let (status, body) = h.get_admin("/api/history/users/u1?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let interactions = body["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["userId"], "u1");

    let (status, body) = h.get_admin("/api/history/sessions/s1").await;
    assert_eq!(status, StatusCode::OK);
    let interactions = body["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 2);
    assert!(interactions.iter().all(|i| i["sessionId"] == "s1"));

    let (status, _) = h.get("/api/history/sessions/s1", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_history_reports_storage_failure() {
    let h = TestHarness::builder()
        .with_log(MemoryLog::failing())
        .build()
        .await
        .unwrap();
    let (status, body) = h.get_admin("/api/history/sessions/s1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}
