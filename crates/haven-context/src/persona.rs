// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona zone: loads the base prompt and personalizes it per request.

use haven_config::model::PersonaConfig;
use haven_core::{HavenError, UserPreferences};
use tracing::{info, warn};

/// Communication style text for each selectable mood.
const MOOD_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "motherly",
        "EXTREMELY sweet, nurturing, and caring like a loving mother - use terms like \"sweetheart\", \"honey\", \"dear\", \"love\" frequently",
    ),
    (
        "fatherly",
        "strong, bold, and protective like a supportive father - be direct and encouraging",
    ),
    (
        "faith-centered",
        "wise, spiritual, and faith-based in your guidance - incorporate spiritual wisdom naturally",
    ),
    (
        "best-friend",
        "casual, fun, and understanding like a close friend - be relaxed and supportive",
    ),
    ("wise-mentor", "gentle but transformative, offering wisdom and growth"),
    (
        "solution-coach",
        "practical and action-oriented, focusing on concrete steps forward",
    ),
    (
        "calm-centering",
        "peaceful and grounding, helping with mindfulness and calm",
    ),
    (
        "balanced-mix",
        "warm and supportive with gentle challenges when needed",
    ),
];

/// Mood used when neither the user nor the config names a known one.
const FALLBACK_MOOD: &str = "balanced-mix";

const QUALITY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("empathetic", "deeply understanding and compassionate"),
    ("non-judgmental", "accepting and supportive without criticism"),
    ("encouraging", "motivating and uplifting"),
    ("practical", "offering concrete, actionable advice"),
    ("gentle", "soft and caring in approach"),
    ("challenging", "gently pushing for growth when appropriate"),
];

const STYLE_GUIDELINES: &str = "Keep responses SHORT (2-6 sentences max). Talk like a supportive friend, not a therapist or robot.

Guidelines:
- Be conversational and warm
- Give practical, helpful advice
- Challenge people gently when they need it
- Use \"I\" statements like \"I think\" or \"I've noticed\"
- Sound human and caring, never clinical or robotic
- Keep responses brief and focused";

const SAFETY_LINE: &str =
    "If someone mentions self-harm, immediately provide crisis resources.";

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Description for a mood, falling back to the balanced mix.
pub fn mood_description(mood: &str) -> &'static str {
    lookup(MOOD_DESCRIPTIONS, mood)
        .or_else(|| lookup(MOOD_DESCRIPTIONS, FALLBACK_MOOD))
        .unwrap_or_default()
}

/// Comma-joined quality descriptions. Unknown qualities pass through as-is.
pub fn quality_description(qualities: &[String]) -> String {
    qualities
        .iter()
        .map(|q| lookup(QUALITY_DESCRIPTIONS, q).unwrap_or(q.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Holds the base prompt and the persona defaults.
#[derive(Debug, Clone)]
pub struct PersonaPrompt {
    base_prompt: String,
    default_mood: String,
    default_qualities: Vec<String>,
}

impl PersonaPrompt {
    /// Loads the base prompt from config.
    ///
    /// # Priority
    /// 1. `persona.system_prompt_file`, read from disk
    /// 2. `persona.system_prompt`, inline
    /// 3. "You are {name}, a warm and caring friend who helps people grow emotionally."
    pub async fn new(config: &PersonaConfig) -> Result<Self, HavenError> {
        let base_prompt = load_base_prompt(config).await?;
        Ok(Self {
            base_prompt,
            default_mood: config.default_mood.clone(),
            default_qualities: config.default_qualities.clone(),
        })
    }

    pub fn base_prompt(&self) -> &str {
        &self.base_prompt
    }

    /// Builds the full system prompt for one request.
    pub fn render(&self, preferences: Option<&UserPreferences>, knowledge: Option<&str>) -> String {
        let mood = preferences
            .and_then(|p| p.mood.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.default_mood);
        let qualities = match preferences {
            Some(p) if !p.qualities.is_empty() => p.qualities.as_slice(),
            _ => self.default_qualities.as_slice(),
        };
        let preferred_name = preferences
            .and_then(|p| p.preferred_name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let mut prompt = format!(
            "{}\n\nYour communication style: {}\nYour qualities: {}\n",
            self.base_prompt,
            mood_description(mood),
            quality_description(qualities),
        );
        if let Some(name) = preferred_name {
            prompt.push_str(&format!("The user prefers to be called: {name}\n"));
        }
        prompt.push('\n');
        prompt.push_str(STYLE_GUIDELINES);
        if let Some(info) = knowledge.filter(|k| !k.trim().is_empty()) {
            prompt.push_str(&format!("\n\nRELEVANT INFO: {info}"));
        }
        prompt.push_str("\n\n");
        prompt.push_str(SAFETY_LINE);
        prompt
    }
}

async fn load_base_prompt(config: &PersonaConfig) -> Result<String, HavenError> {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim().to_string();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded base prompt from file");
                    return Ok(trimmed);
                }
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read base prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt
        && !prompt.trim().is_empty()
    {
        return Ok(prompt.trim().to_string());
    }

    Ok(format!(
        "You are {}, a warm and caring friend who helps people grow emotionally.",
        config.name
    ))
}
