// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detection result types shared by the three keyword detectors.

use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::{Display, EnumString, IntoStaticStr};

/// Top-level bucket a message is routed into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crisis,
    Exercise,
    Business,
    None,
}

/// Crisis severity, checked in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CrisisTier {
    Immediate,
    Urgent,
    Moderate,
}

impl CrisisTier {
    /// Scan order for keyword tables: most severe first.
    pub const ORDER: [CrisisTier; 3] = [Self::Immediate, Self::Urgent, Self::Moderate];
}

/// Guided exercise offered for an exercise request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Breathing,
    Grounding,
    Journaling,
    Meditation,
    Movement,
}

/// Business question topic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BusinessTopic {
    Pricing,
    Scheduling,
    Policies,
    Services,
    Contact,
}

/// Sub-classification within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtype {
    Crisis(CrisisTier),
    Exercise(ExerciseKind),
    Business(BusinessTopic),
}

impl Subtype {
    pub fn category(&self) -> Category {
        match self {
            Subtype::Crisis(_) => Category::Crisis,
            Subtype::Exercise(_) => Category::Exercise,
            Subtype::Business(_) => Category::Business,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Crisis(tier) => tier.into(),
            Subtype::Exercise(kind) => kind.into(),
            Subtype::Business(topic) => topic.into(),
        }
    }
}

/// Display priority attached to a canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, serde::Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Immediate,
    Urgent,
    Moderate,
    High,
    Medium,
}

/// A pre-written reply returned verbatim instead of calling the language model.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePolicy {
    pub title: &'static str,
    /// Full reply text shown to the user.
    #[serde(rename = "response")]
    pub body: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<&'static str>,
    /// The reply may need a human to follow up.
    pub requires_human: bool,
    /// The client should expect one of the offered reply options next turn.
    pub interactive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<&'static str>,
}

/// Outcome of classifying one message.
///
/// `subtype`, `matched_keyword`, and `response` are only populated when
/// `detected` is true; `matched_keyword` is only set for crisis detections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub detected: bool,
    pub category: Category,
    pub subtype: Option<Subtype>,
    pub matched_keyword: Option<&'static str>,
    pub response: Option<&'static ResponsePolicy>,
}

impl Detection {
    /// A negative result.
    pub const fn none() -> Self {
        Self {
            detected: false,
            category: Category::None,
            subtype: None,
            matched_keyword: None,
            response: None,
        }
    }

    pub(crate) fn positive(
        subtype: Subtype,
        matched_keyword: Option<&'static str>,
        response: &'static ResponsePolicy,
    ) -> Self {
        Self {
            detected: true,
            category: subtype.category(),
            subtype: Some(subtype),
            matched_keyword,
            response: Some(response),
        }
    }

    pub fn crisis_tier(&self) -> Option<CrisisTier> {
        match self.subtype {
            Some(Subtype::Crisis(tier)) => Some(tier),
            _ => None,
        }
    }

    pub fn exercise_kind(&self) -> Option<ExerciseKind> {
        match self.subtype {
            Some(Subtype::Exercise(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn business_topic(&self) -> Option<BusinessTopic> {
        match self.subtype {
            Some(Subtype::Business(topic)) => Some(topic),
            _ => None,
        }
    }
}

// Crisis results carry their tier under `level`, the other categories under `type`.
impl Serialize for Detection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("detected", &self.detected)?;
        map.serialize_entry("category", &self.category)?;
        match self.subtype {
            Some(Subtype::Crisis(tier)) => map.serialize_entry("level", &tier)?,
            Some(Subtype::Exercise(kind)) => map.serialize_entry("type", &kind)?,
            Some(Subtype::Business(topic)) => map.serialize_entry("type", &topic)?,
            None => {}
        }
        if let Some(keyword) = self.matched_keyword {
            map.serialize_entry("matchedKeyword", keyword)?;
        }
        if let Some(response) = self.response {
            map.serialize_entry("response", response)?;
        }
        map.end()
    }
}

/// Returns the first needle found as a substring of `haystack`.
pub(crate) fn first_match(haystack: &str, needles: &[&'static str]) -> Option<&'static str> {
    needles.iter().copied().find(|needle| haystack.contains(needle))
}
