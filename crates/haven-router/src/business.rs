// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business question detection. Every hit redirects to the plans page.

use crate::detection::{first_match, BusinessTopic, Detection, Subtype};
use crate::responses;

/// Any of these marks the message as a business question.
const BUSINESS_KEYWORDS: &[&str] = &[
    "pricing", "price", "cost", "fee", "payment", "billing", "plan", "package",
    "session", "appointment", "booking", "schedule", "availability", "calendar",
    "time", "duration", "business", "service", "offer", "deal", "discount", "refund",
    "cancellation", "policy", "terms", "agreement", "subscribe", "subscription",
    "membership", "join", "sign up",
];

/// Disambiguation checks, first hit wins.
const TOPIC_RULES: &[(BusinessTopic, &[&str])] = &[
    (BusinessTopic::Pricing, &["price", "cost", "fee", "payment"]),
    (
        BusinessTopic::Scheduling,
        &["schedule", "book", "appointment", "availability", "time"],
    ),
    (BusinessTopic::Policies, &["policy", "term", "refund", "cancellation"]),
    (
        BusinessTopic::Services,
        &["service", "offer", "program", "what do you do"],
    ),
    (BusinessTopic::Contact, &["contact", "email", "phone", "reach", "call"]),
];

/// Classify a message as a business question. Pricing is the fallback topic.
pub fn detect_business(message: &str) -> Detection {
    let lower = message.to_lowercase();
    if first_match(&lower, BUSINESS_KEYWORDS).is_none() {
        return Detection::none();
    }

    let topic = TOPIC_RULES
        .iter()
        .find(|(_, hints)| first_match(&lower, hints).is_some())
        .map_or(BusinessTopic::Pricing, |(topic, _)| *topic);

    Detection::positive(Subtype::Business(topic), None, responses::business(topic))
}
