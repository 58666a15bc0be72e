// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for Haven's language-model pass-through.
//!
//! Assembles a [`ProviderRequest`] from three zones:
//! - **Persona zone**: base prompt personalized with the user's mood, qualities, and name
//! - **Knowledge zone**: matching knowledge base rows, when a knowledge base is configured
//! - **History zone**: the most recent conversation turns

pub mod history;
pub mod knowledge;
pub mod persona;

use std::path::Path;

use haven_config::model::{KnowledgeConfig, PersonaConfig};
use haven_core::error::HavenError;
use haven_core::types::{ChatTurn, ProviderRequest, UserPreferences};
use haven_router::PassThrough;
use tracing::debug;

pub use history::recent_turns;
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use persona::PersonaPrompt;

/// Builds provider requests for messages the router passed through.
#[derive(Debug, Clone)]
pub struct ContextEngine {
    persona: PersonaPrompt,
    knowledge: Option<KnowledgeBase>,
    max_knowledge_entries: usize,
}

impl ContextEngine {
    /// Loads the persona prompt and, if configured, the knowledge base.
    pub async fn new(
        persona_config: &PersonaConfig,
        knowledge_config: &KnowledgeConfig,
    ) -> Result<Self, HavenError> {
        let persona = PersonaPrompt::new(persona_config).await?;
        let knowledge = match (&knowledge_config.path, &knowledge_config.url) {
            (Some(path), _) => Some(KnowledgeBase::load(Path::new(path)).await?),
            (None, Some(url)) => Some(KnowledgeBase::fetch(url).await?),
            (None, None) => None,
        };
        Ok(Self {
            persona,
            knowledge,
            max_knowledge_entries: knowledge_config.max_entries,
        })
    }

    /// Engine from already-loaded parts.
    pub fn from_parts(
        persona: PersonaPrompt,
        knowledge: Option<KnowledgeBase>,
        max_entries: usize,
    ) -> Self {
        Self {
            persona,
            knowledge,
            max_knowledge_entries: max_entries,
        }
    }

    /// Assembles the completion request for one message.
    pub fn assemble(
        &self,
        message: &str,
        history: &[ChatTurn],
        preferences: Option<&UserPreferences>,
        params: &PassThrough,
    ) -> ProviderRequest {
        let knowledge = self
            .knowledge
            .as_ref()
            .and_then(|kb| kb.context_for(message, self.max_knowledge_entries));
        let system_prompt = self.persona.render(preferences, knowledge.as_deref());
        let history = recent_turns(history, params.history_limit);

        debug!(
            history_turns = history.len(),
            knowledge = knowledge.is_some(),
            prompt_chars = system_prompt.len(),
            "assembled provider request"
        );

        ProviderRequest {
            model: params.model.clone(),
            system_prompt,
            history,
            message: message.to_string(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::ChatRole;

    fn params() -> PassThrough {
        PassThrough {
            model: "gpt-4o-mini".into(),
            max_tokens: 200,
            temperature: 0.7,
            history_limit: 2,
        }
    }

    async fn engine(knowledge: Option<KnowledgeBase>) -> ContextEngine {
        let persona = PersonaPrompt::new(&PersonaConfig::default()).await.unwrap();
        ContextEngine::from_parts(persona, knowledge, 5)
    }

    #[tokio::test]
    async fn assemble_truncates_history_and_copies_params() {
        let history = vec![
            ChatTurn::new(ChatRole::User, "one"),
            ChatTurn::new(ChatRole::Assistant, "two"),
            ChatTurn::new(ChatRole::User, "three"),
        ];
        let request = engine(None)
            .await
            .assemble("how was your day", &history, None, &params());

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 200);
        assert_eq!(request.message, "how was your day");
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].content, "two");
        assert!(request.system_prompt.starts_with("You are Haven"));
        assert!(!request.system_prompt.contains("RELEVANT INFO"));
    }

    #[tokio::test]
    async fn assemble_injects_matching_knowledge() {
        let kb = KnowledgeBase::from_csv("Topic,Answer\nSleep,Keep a steady bedtime\n").unwrap();
        let engine = engine(Some(kb)).await;

        let request = engine.assemble("sleep bedtime", &[], None, &params());
        assert!(
            request
                .system_prompt
                .contains("RELEVANT INFO: Relevant Knowledge Base Information:")
        );
        assert!(request.system_prompt.contains("Answer: Keep a steady bedtime"));

        let request = engine.assemble("hello", &[], None, &params());
        assert!(!request.system_prompt.contains("RELEVANT INFO"));
    }

    #[tokio::test]
    async fn new_without_knowledge_path_skips_loading() {
        let engine = ContextEngine::new(&PersonaConfig::default(), &KnowledgeConfig::default())
            .await
            .unwrap();
        assert!(engine.knowledge.is_none());
    }

    #[tokio::test]
    async fn new_with_missing_knowledge_file_fails() {
        let config = KnowledgeConfig {
            path: Some("/nonexistent/kb.csv".into()),
            ..KnowledgeConfig::default()
        };
        let result = ContextEngine::new(&PersonaConfig::default(), &config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn new_with_knowledge_url_fetches_export() {
        use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Topic,Answer\nSleep,Keep a steady bedtime\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = KnowledgeConfig {
            url: Some(format!("{}/export?format=csv", server.uri())),
            ..KnowledgeConfig::default()
        };
        let engine = ContextEngine::new(&PersonaConfig::default(), &config)
            .await
            .unwrap();
        assert_eq!(engine.knowledge.as_ref().map(KnowledgeBase::len), Some(1));
    }
}
