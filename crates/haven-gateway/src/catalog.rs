// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static badge and user display tables, plus badge share links.

use serde::Serialize;

/// An achievement badge shown on share pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: &'static str,
    pub category: &'static str,
}

/// Public display data for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub avatar: &'static str,
    pub join_date: &'static str,
}

pub const BADGES: &[Badge] = &[
    Badge {
        id: "first-haven-chat",
        name: "First Haven Chat",
        description: "Started your emotional intelligence journey",
        icon: "🌟",
        rarity: "Common",
        category: "Starter",
    },
    Badge {
        id: "first-message",
        name: "First Conversation",
        description: "Send your first message to Haven",
        icon: "💬",
        rarity: "Common",
        category: "Starter",
    },
    Badge {
        id: "3-day-streak",
        name: "3-Day Haven Streak",
        description: "Daily check-ins for three days",
        icon: "🔥",
        rarity: "Common",
        category: "Consistency",
    },
    Badge {
        id: "7-day-streak",
        name: "7-Day Haven Streak",
        description: "Weekly commitment to emotional growth",
        icon: "🔥",
        rarity: "Uncommon",
        category: "Consistency",
    },
    Badge {
        id: "growth-seeker",
        name: "Growth Seeker",
        description: "Embraced personal development journey",
        icon: "🌱",
        rarity: "Uncommon",
        category: "Emotional Growth",
    },
    Badge {
        id: "mindfulness-master",
        name: "Mindfulness Master",
        description: "Developed mindful awareness practices",
        icon: "🧘",
        rarity: "Rare",
        category: "Emotional Growth",
    },
    Badge {
        id: "self-care-champion",
        name: "Self-Care Champion",
        description: "Prioritized personal wellness and care",
        icon: "💖",
        rarity: "Uncommon",
        category: "Wellness",
    },
    Badge {
        id: "gratitude-practitioner",
        name: "Gratitude Practitioner",
        description: "Cultivated daily gratitude practices",
        icon: "🙏",
        rarity: "Uncommon",
        category: "Wellness",
    },
];

const DEFAULT_AVATAR: &str = "👤";

pub const USERS: &[UserProfile] = &[
    UserProfile {
        id: "user_12345",
        display_name: "Alex Johnson",
        avatar: DEFAULT_AVATAR,
        join_date: "2024-01-15",
    },
    UserProfile {
        id: "user_67890",
        display_name: "Sarah Chen",
        avatar: DEFAULT_AVATAR,
        join_date: "2024-02-20",
    },
    UserProfile {
        id: "user_11111",
        display_name: "Michael Rodriguez",
        avatar: DEFAULT_AVATAR,
        join_date: "2024-01-08",
    },
    UserProfile {
        id: "user_22222",
        display_name: "Emily Davis",
        avatar: DEFAULT_AVATAR,
        join_date: "2024-03-10",
    },
    UserProfile {
        id: "user_33333",
        display_name: "David Kim",
        avatar: DEFAULT_AVATAR,
        join_date: "2024-02-05",
    },
];

pub fn badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

pub fn user(id: &str) -> Option<&'static UserProfile> {
    USERS.iter().find(|u| u.id == id)
}

/// Everything a client needs to share an earned badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeShare {
    pub badge: &'static Badge,
    pub user: &'static UserProfile,
    pub share_url: String,
    pub share_text: String,
}

impl BadgeShare {
    pub fn new(base_url: &str, badge: &'static Badge, user: &'static UserProfile) -> Self {
        Self {
            badge,
            user,
            share_url: share_url(base_url, badge.id, user.id),
            share_text: share_text(badge.name, user.display_name),
        }
    }
}

pub fn share_url(base_url: &str, badge_id: &str, user_id: &str) -> String {
    format!(
        "{}/share/badge/{badge_id}/{user_id}",
        base_url.trim_end_matches('/')
    )
}

pub fn share_text(badge_name: &str, display_name: &str) -> String {
    format!(
        "{display_name} just earned the \"{badge_name}\" badge on Haven! 🏆 #EmotionalIntelligence #Haven"
    )
}
