// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guided exercise request detection.

use crate::detection::{first_match, Detection, ExerciseKind, Subtype};
use crate::responses;

/// Any of these marks the message as an exercise request.
const EXERCISE_KEYWORDS: &[&str] = &[
    "exercise", "activity", "practice", "technique", "meditation", "breathing",
    "grounding", "mindfulness", "journaling", "reflection", "worksheet", "tool",
    "skill", "coping", "strategy", "method",
];

/// Disambiguation checks, first hit wins.
const KIND_RULES: &[(ExerciseKind, &[&str])] = &[
    (ExerciseKind::Breathing, &["breath", "inhale", "exhale"]),
    (ExerciseKind::Grounding, &["ground", "present", "here"]),
    (ExerciseKind::Journaling, &["journal", "write", "gratitude"]),
    (ExerciseKind::Meditation, &["meditation", "mindful", "loving"]),
    (ExerciseKind::Movement, &["move", "stretch", "relax"]),
];

/// Classify a message as an exercise request. Breathing is the fallback kind.
pub fn detect_exercise(message: &str) -> Detection {
    let lower = message.to_lowercase();
    if first_match(&lower, EXERCISE_KEYWORDS).is_none() {
        return Detection::none();
    }

    let kind = KIND_RULES
        .iter()
        .find(|(_, hints)| first_match(&lower, hints).is_some())
        .map_or(ExerciseKind::Breathing, |(kind, _)| *kind);

    Detection::positive(Subtype::Exercise(kind), None, responses::exercise(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(message: &str) -> Option<ExerciseKind> {
        detect_exercise(message).exercise_kind()
    }

    #[test]
    fn breathing_request() {
        let detection = detect_exercise("Can you walk me through a breathing exercise?");
        assert!(detection.detected);
        assert_eq!(detection.exercise_kind(), Some(ExerciseKind::Breathing));
        assert!(detection.matched_keyword.is_none());
        assert_eq!(detection.response.unwrap().title, "🫁 Let's Breathe Together");
    }

    #[test]
    fn each_kind_is_reachable() {
        assert_eq!(kind_of("a grounding technique please"), Some(ExerciseKind::Grounding));
        assert_eq!(kind_of("any journaling practice?"), Some(ExerciseKind::Journaling));
        assert_eq!(kind_of("teach me a meditation"), Some(ExerciseKind::Meditation));
        assert_eq!(kind_of("a stretch activity"), Some(ExerciseKind::Movement));
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        // Both breathing and meditation hints; breathing is checked first.
        assert_eq!(
            kind_of("a meditation practice focused on the breath"),
            Some(ExerciseKind::Breathing)
        );
    }

    #[test]
    fn here_hint_matches_inside_other_words() {
        // "where" contains "here", so this resolves to grounding.
        assert_eq!(kind_of("where do I find a coping skill"), Some(ExerciseKind::Grounding));
    }

    #[test]
    fn keyword_without_hint_defaults_to_breathing() {
        assert_eq!(kind_of("give me a coping strategy"), Some(ExerciseKind::Breathing));
    }

    #[test]
    fn hints_alone_do_not_trigger() {
        assert!(!detect_exercise("I need to relax").detected);
        assert!(!detect_exercise("").detected);
        assert!(!detect_exercise("   ").detected);
    }
}
