// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing composition: crisis, then exercise, then business, then pass-through.

use haven_config::model::{OpenAiConfig, RoutingConfig};
use haven_core::{ChatTurn, UserPreferences};
use tracing::info;

use crate::business::detect_business;
use crate::crisis::detect_crisis;
use crate::detection::Detection;
use crate::exercise::detect_exercise;

/// One inbound chat message with its optional context.
///
/// History and preferences travel with the message for the completion call;
/// they never influence classification.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRequest<'a> {
    pub message: &'a str,
    pub history: &'a [ChatTurn],
    pub preferences: Option<&'a UserPreferences>,
}

impl<'a> ClassificationRequest<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            history: &[],
            preferences: None,
        }
    }

    pub fn with_history(mut self, history: &'a [ChatTurn]) -> Self {
        self.history = history;
        self
    }

    pub fn with_preferences(mut self, preferences: &'a UserPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// Completion parameters for a message no canned category claimed.
#[derive(Debug, Clone, PartialEq)]
pub struct PassThrough {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of most recent history turns to forward.
    pub history_limit: usize,
}

/// What the gateway should do with a message.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Reply with the detection's canned response and skip the provider.
    Canned(Detection),
    /// Forward to the language model.
    PassThrough(PassThrough),
}

impl RouteDecision {
    pub fn detection(&self) -> Option<&Detection> {
        match self {
            RouteDecision::Canned(detection) => Some(detection),
            RouteDecision::PassThrough(_) => None,
        }
    }
}

/// Runs the keyword detectors in priority order.
///
/// The model used for pass-through never depends on the detection: crisis
/// messages always short-circuit, so there is no stronger-model branch.
#[derive(Debug, Clone)]
pub struct MessageRouter {
    pass_through: PassThrough,
}

impl MessageRouter {
    pub fn new(config: RoutingConfig, openai: &OpenAiConfig) -> Self {
        let pass_through = PassThrough {
            model: openai.model.clone(),
            max_tokens: openai.max_tokens,
            temperature: openai.temperature,
            history_limit: config.history_limit,
        };
        Self { pass_through }
    }

    /// Classify a message without choosing completion parameters.
    ///
    /// Stops at the first positive detector; a message that trips none of
    /// them yields a negative detection with category `none`.
    /// Classification depends on the message text alone; no configuration
    /// can switch a detector off.
    pub fn classify(&self, message: &str) -> Detection {
        let detectors: [fn(&str) -> Detection; 3] =
            [detect_crisis, detect_exercise, detect_business];
        detectors
            .iter()
            .map(|detect| detect(message))
            .find(|detection| detection.detected)
            .unwrap_or_else(Detection::none)
    }

    /// Route a message to a canned reply or to the language model.
    pub fn route(&self, request: &ClassificationRequest<'_>) -> RouteDecision {
        let detection = self.classify(request.message);

        if detection.detected {
            info!(
                category = %detection.category,
                subtype = detection.subtype.map(|s| s.as_str()).unwrap_or_default(),
                keyword = detection.matched_keyword.unwrap_or_default(),
                "message routed to canned response"
            );
            return RouteDecision::Canned(detection);
        }

        info!(
            model = self.pass_through.model.as_str(),
            history_turns = request.history.len().min(self.pass_through.history_limit),
            "message routed to language model"
        );
        RouteDecision::PassThrough(self.pass_through.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{BusinessTopic, Category, CrisisTier, ExerciseKind};

    fn router() -> MessageRouter {
        MessageRouter::new(RoutingConfig::default(), &OpenAiConfig::default())
    }

    fn route(message: &str) -> RouteDecision {
        router().route(&ClassificationRequest::new(message))
    }

    #[test]
    fn crisis_preempts_exercise() {
        let decision = route("I want to kill myself, what breathing exercise helps?");
        let detection = decision.detection().expect("should be canned");
        assert_eq!(detection.category, Category::Crisis);
        assert_eq!(detection.crisis_tier(), Some(CrisisTier::Immediate));
    }

    #[test]
    fn exercise_preempts_business() {
        // "time" is a business keyword, "breathing" an exercise keyword.
        let decision = route("is now a good time for breathing practice");
        assert_eq!(
            decision.detection().and_then(Detection::exercise_kind),
            Some(ExerciseKind::Breathing)
        );
    }

    #[test]
    fn pricing_question_is_canned_business() {
        let decision = route("What's your pricing for the regular plan?");
        let detection = decision.detection().expect("should be canned");
        assert_eq!(detection.business_topic(), Some(BusinessTopic::Pricing));
        assert_eq!(detection.response.unwrap().redirect_url, Some("/pricing"));
    }

    #[test]
    fn hedged_crisis_falls_through_to_model() {
        let decision = route("I'm worried I might hurt myself");
        let RouteDecision::PassThrough(params) = decision else {
            panic!("expected pass-through, got {decision:?}");
        };
        assert_eq!(params.model, "gpt-4o-mini");
        assert_eq!(params.max_tokens, 200);
        assert_eq!(params.history_limit, 10);
    }

    #[test]
    fn blank_message_passes_through() {
        assert!(matches!(route(""), RouteDecision::PassThrough(_)));
        assert!(matches!(route("    "), RouteDecision::PassThrough(_)));
    }

    #[test]
    fn pass_through_model_follows_config() {
        let openai = OpenAiConfig {
            model: "gpt-4o".to_string(),
            max_tokens: 350,
            ..OpenAiConfig::default()
        };
        let routing = RoutingConfig { history_limit: 4 };
        let router = MessageRouter::new(routing, &openai);
        let decision = router.route(&ClassificationRequest::new("hello there friend"));
        assert_eq!(
            decision,
            RouteDecision::PassThrough(PassThrough {
                model: "gpt-4o".to_string(),
                max_tokens: 350,
                temperature: 0.7,
                history_limit: 4,
            })
        );
    }

    #[test]
    fn crisis_is_canned_under_any_routing_config() {
        let routing = RoutingConfig { history_limit: 1 };
        let openai = OpenAiConfig {
            model: "gpt-4o".to_string(),
            ..OpenAiConfig::default()
        };
        let router = MessageRouter::new(routing, &openai);
        let decision = router.route(&ClassificationRequest::new("I want to kill myself"));
        let RouteDecision::Canned(detection) = decision else {
            panic!("expected canned crisis reply, got {decision:?}");
        };
        assert_eq!(detection.crisis_tier(), Some(CrisisTier::Immediate));
    }

    #[test]
    fn history_and_preferences_do_not_change_classification() {
        let history = vec![ChatTurn::new(
            haven_core::ChatRole::User,
            "I want to kill myself",
        )];
        let prefs = UserPreferences {
            mood: Some("motherly".into()),
            ..UserPreferences::default()
        };
        let request = ClassificationRequest::new("hello there friend")
            .with_history(&history)
            .with_preferences(&prefs);
        assert!(matches!(router().route(&request), RouteDecision::PassThrough(_)));
    }

    #[test]
    #[tracing_test::traced_test]
    fn routing_logs_category() {
        route("I keep cutting myself");
        assert!(logs_contain("message routed to canned response"));
        assert!(logs_contain("crisis"));
    }
}
