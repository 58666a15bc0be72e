// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crisis keyword detection with hedge-word suppression.
//!
//! Tiers are scanned immediate, urgent, then moderate. A keyword hit is
//! discarded when the message also contains a hedge word such as "worried"
//! or "scared", and scanning carries on with the next keyword. Since the
//! hedge check looks at the whole message, a hedged message never produces
//! a crisis detection.
//!
//! This is substring co-occurrence, not semantic analysis. "I'm not just
//! scared, I'm going to do it" is suppressed. That false-negative risk is
//! known and kept for compatibility with existing conversations.

use serde::Serialize;
use tracing::debug;

use crate::detection::{first_match, CrisisTier, Detection, Subtype};
use crate::responses;

const IMMEDIATE_KEYWORDS: &[&str] = &[
    "suicide", "kill myself", "want to die", "end it all", "no reason to live",
    "better off dead", "end my life", "take my life", "self-harm", "cutting",
    "cut myself", "bleeding", "hurt myself", "harm myself", "overdose", "overdosing",
    "take pills", "swallow pills", "poison", "gun", "weapon", "shoot myself",
    "hang myself", "jump off",
];

const URGENT_KEYWORDS: &[&str] = &[
    "suicidal", "thinking of suicide", "planning suicide", "suicide plan",
    "want to end it", "want to die", "no point living", "life not worth living",
    "self-harm", "cutting myself", "hurting myself", "harm myself", "overdose",
    "take pills", "swallow pills", "poison myself",
];

const MODERATE_KEYWORDS: &[&str] = &[
    "suicide", "kill myself", "want to die", "end it all", "self-harm", "cutting",
    "hurt myself", "harm myself", "overdose", "pills", "poison", "jump off",
];

/// Words that signal fear of a topic rather than intent.
pub const HEDGE_WORDS: &[&str] = &[
    "fear", "worried", "concerned", "thinking", "wondering", "afraid", "scared",
    "nervous", "anxious", "stress", "stressed",
];

/// Keyword table for a tier.
pub fn keywords(tier: CrisisTier) -> &'static [&'static str] {
    match tier {
        CrisisTier::Immediate => IMMEDIATE_KEYWORDS,
        CrisisTier::Urgent => URGENT_KEYWORDS,
        CrisisTier::Moderate => MODERATE_KEYWORDS,
    }
}

/// Classify a message against the crisis tables.
pub fn detect_crisis(message: &str) -> Detection {
    let lower = message.to_lowercase();
    let hedge = first_match(&lower, HEDGE_WORDS);

    for tier in CrisisTier::ORDER {
        for &keyword in keywords(tier) {
            if !lower.contains(keyword) {
                continue;
            }
            if let Some(hedge) = hedge {
                debug!(%tier, keyword, hedge, "crisis keyword suppressed by hedge word");
                continue;
            }
            return Detection::positive(
                Subtype::Crisis(tier),
                Some(keyword),
                responses::crisis(tier),
            );
        }
    }

    Detection::none()
}

/// Hotlines and websites offered alongside crisis replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResources {
    pub suicide_line: &'static str,
    pub text_line: &'static str,
    pub veterans_line: &'static str,
    pub lgbtq_line: &'static str,
    pub emergency: &'static str,
    pub websites: CrisisWebsites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisWebsites {
    pub suicide_prevention: &'static str,
    pub crisis_text: &'static str,
    pub nami: &'static str,
}

pub const CRISIS_RESOURCES: CrisisResources = CrisisResources {
    suicide_line: "988",
    text_line: "741741",
    veterans_line: "988 then press 1",
    lgbtq_line: "988 then press 3",
    emergency: "911",
    websites: CrisisWebsites {
        suicide_prevention: "https://988lifeline.org",
        crisis_text: "https://www.crisistextline.org",
        nami: "https://www.nami.org/help",
    },
};
