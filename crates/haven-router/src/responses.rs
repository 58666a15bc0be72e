// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned reply tables keyed by category and sub-type.

use crate::detection::{BusinessTopic, CrisisTier, ExerciseKind, Priority, ResponsePolicy};

/// Appends the hotline block and the three reply options to a crisis opener.
macro_rules! crisis_body {
    ($opener:literal) => {
        concat!(
            $opener,
            "

Please reach out for professional help right now:
📞 CALL: 988 (24/7 Crisis Support)
💬 TEXT: HOME to 741741
🌐 CHAT: suicidepreventionlifeline.org

**How would you like to proceed?**

[✅ I'm feeling better now, I've calmed down]
[📞 I contacted help - let me tell you who I reached]
[⚠️ I'm not ready to contact anyone yet, let's keep talking]

You don't have to face this alone."
        )
    };
}

const SEVERE_OPENER_BODY: &str = crisis_body!(
    "🚨 I'm detecting that you might be going through something really serious right now - more than I can handle alone. But I want you to know I'm staying right here with you through all of this."
);

const SEVERE_FOLLOW_UP: &str = "Are you going to call 988? I'm staying right here with you.";

/// The three literal reply options offered by every crisis response.
pub const CRISIS_REPLY_OPTIONS: [&str; 3] = [
    "I'm feeling better now, I've calmed down",
    "I contacted help - let me tell you who I reached",
    "I'm not ready to contact anyone yet, let's keep talking",
];

static CRISIS_IMMEDIATE: ResponsePolicy = ResponsePolicy {
    title: "🚨 Crisis Support Needed",
    body: SEVERE_OPENER_BODY,
    follow_up: Some(SEVERE_FOLLOW_UP),
    requires_human: true,
    interactive: true,
    priority: Some(Priority::Immediate),
    redirect_url: None,
    duration: None,
};

static CRISIS_URGENT: ResponsePolicy = ResponsePolicy {
    title: "🚨 Crisis Support Needed",
    body: SEVERE_OPENER_BODY,
    follow_up: Some(SEVERE_FOLLOW_UP),
    requires_human: true,
    interactive: true,
    priority: Some(Priority::Urgent),
    redirect_url: None,
    duration: None,
};

static CRISIS_MODERATE: ResponsePolicy = ResponsePolicy {
    title: "💙 I'm Here For You",
    body: crisis_body!(
        "I can see you're having a tough time. You don't have to go through this alone. Would you like to call 988? They have people who can help you right now."
    ),
    follow_up: Some("What's going on? I'm here to listen."),
    requires_human: true,
    interactive: true,
    priority: Some(Priority::Moderate),
    redirect_url: None,
    duration: None,
};

static EXERCISE_BREATHING: ResponsePolicy = ResponsePolicy {
    title: "🫁 Let's Breathe Together",
    body: "I'm so glad you want to try breathing exercises - they're such a powerful way to find calm. Let's do this together, okay?

**4-7-8 Breathing (My Favorite):**
1. Find a comfortable spot and close your eyes if you'd like
2. Inhale through your nose for 4 counts (feel your belly expand)
3. Hold your breath for 7 counts (just like a gentle pause)
4. Exhale through your mouth for 8 counts (let everything go)
5. Repeat this 4-5 times, and notice how you feel

**Box Breathing (When You Need Extra Grounding):**
1. Inhale for 4 counts
2. Hold for 4 counts
3. Exhale for 4 counts
4. Hold for 4 counts
5. Repeat for 5-10 minutes

**The magic happens when you really focus on each breath.** Don't worry if your mind wanders - that's totally normal. Just gently bring your attention back to your breath.

This helps calm your nervous system and enhance your emotional wellness. How does it feel? I'm here with you through this.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: None,
    redirect_url: None,
    duration: Some("5-10 minutes"),
};

static EXERCISE_GROUNDING: ResponsePolicy = ResponsePolicy {
    title: "🌍 Let's Ground You Right Now",
    body: "I'm here to help you feel more present and connected. Let's do this together, okay?

**5-4-3-2-1 Grounding (My Go-To):**
Look around and identify:
• 5 things you can see (really notice the details)
• 4 things you can touch (feel the textures)
• 3 things you can hear (even the quiet sounds)
• 2 things you can smell (take a deep breath)
• 1 thing you can taste (maybe your coffee or water)

**Body Scan (When You Need Extra Connection):**
1. Close your eyes and take a deep breath
2. Focus on your toes, then slowly move up your body
3. Notice any tension and imagine it melting away
4. Continue all the way to the top of your head

**This helps you stay present and connected to your body.** Don't rush - take your time with each step. I'm right here with you through this.

How does it feel? I'm here to support you.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: None,
    redirect_url: None,
    duration: Some("3-5 minutes"),
};

static EXERCISE_JOURNALING: ResponsePolicy = ResponsePolicy {
    title: "📝 Let's Explore Your Heart",
    body: "I love that you want to try journaling - it's such a beautiful way to understand yourself better. Let's explore together, okay?

**Emotional Check-in (Start Here):**
1. How am I feeling right now? (1-10 scale, and why?)
2. What triggered these feelings?
3. What do I need right now?
4. What would be helpful for me?

**Gratitude Practice (My Favorite):**
Write down 3 things you're grateful for today, no matter how small. Maybe it's your morning coffee, a kind text from a friend, or even just getting out of bed today.

**Future Self Letter (Powerful One):**
Write a letter to yourself from 6 months in the future, offering advice and encouragement. What would your future self want you to know?

**This helps process emotions and gain perspective.** Don't worry about perfect writing - just let your heart speak. I'm here with you through this wellness journey.

What feels right to start with? I'm here to support you.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: None,
    redirect_url: None,
    duration: Some("10-15 minutes"),
};

static EXERCISE_MEDITATION: ResponsePolicy = ResponsePolicy {
    title: "🧘 Let's Find Your Peace",
    body: "I'm so glad you want to try meditation - it's such a beautiful practice for finding inner peace. Let's do this together, okay?

**Simple Meditation (Start Here):**
1. Find a comfortable seated position (you can even sit on your bed)
2. Close your eyes or soften your gaze
3. Focus on your natural breath (don't try to change it)
4. When thoughts arise (and they will!), gently return to your breath
5. Start with 5 minutes, and gradually increase

**Loving-Kindness Meditation (My Favorite):**
1. Sit comfortably and close your eyes
2. Repeat silently: \"May I be happy, may I be healthy, may I be at peace\"
3. Then extend to others: \"May you be happy, may you be healthy, may you be at peace\"

**This cultivates compassion and inner peace.** Don't worry if your mind wanders - that's totally normal. Just gently bring it back. I'm here with you through this wellness practice.

How does it feel? I'm here to support you.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: None,
    redirect_url: None,
    duration: Some("5-20 minutes"),
};

static EXERCISE_MOVEMENT: ResponsePolicy = ResponsePolicy {
    title: "🏃 Let's Move Together",
    body: "I love that you want to try movement - it's such a powerful way to release tension and feel better. Let's do this together, okay?

**Progressive Muscle Relaxation (My Go-To):**
1. Start with your toes
2. Tense the muscles for 5 seconds (really feel it)
3. Release and feel the relaxation (notice the difference)
4. Move up your body systematically

**Gentle Stretching (When You Need Extra Care):**
• Shoulder rolls (forward and back, feel the release)
• Neck stretches (side to side, be gentle)
• Arm circles (feel the movement)
• Hip circles (let your body guide you)
• Ankle rotations (notice the sensation)

**Walking Meditation (My Favorite):**
Walk slowly, focusing on each step and your surroundings. Feel your feet on the ground, the air on your skin, the sounds around you.

**Movement helps release tension and enhance your emotional wellness.** Don't push yourself - just move in a way that feels good to you. I'm right here with you through this.

How does it feel? I'm here to support you.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: None,
    redirect_url: None,
    duration: Some("10-15 minutes"),
};

/// Every business reply points the user at the plans page.
pub const BUSINESS_REDIRECT_URL: &str = "/pricing";

static BUSINESS_PRICING: ResponsePolicy = ResponsePolicy {
    title: "💚 I'm Here For Your Friendship",
    body: "I'm here for your friendship and emotional support, not payment plans! 💚

For pricing and business stuff, check out our Plans page - it has everything you need.

I'd rather focus on being here for you as your emotional companion. That's what I'm good at - helping you grow and feel better.

What's really on your heart right now? I'm here to listen.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: Some(Priority::High),
    redirect_url: Some(BUSINESS_REDIRECT_URL),
    duration: None,
};

static BUSINESS_SCHEDULING: ResponsePolicy = ResponsePolicy {
    title: "💙 Let's Focus On You",
    body: "I'm here to be your emotional companion, not your scheduler! 💙

For scheduling and booking stuff, check out our pricing page - it has all the details.

I'd rather focus on what's really important - you and how you're feeling. That's what I'm here for.

What's really on your mind right now? I'm here to listen.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: Some(Priority::High),
    redirect_url: Some(BUSINESS_REDIRECT_URL),
    duration: None,
};

static BUSINESS_POLICIES: ResponsePolicy = ResponsePolicy {
    title: "💙 I'm Here For Your Heart",
    body: "I'm here for your heart and emotional wellness, not policy documents! 💙

For business policies and terms, check out our pricing page - it has everything you need.

I'd rather focus on what really matters - you and your emotional wellness. That's what I'm here for.

What's really weighing on your heart right now? I'm here to listen.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: Some(Priority::Medium),
    redirect_url: Some(BUSINESS_REDIRECT_URL),
    duration: None,
};

static BUSINESS_SERVICES: ResponsePolicy = ResponsePolicy {
    title: "💙 I'm Your EI Companion",
    body: "I'm here to be your emotional intelligence companion, not a service catalog! 💙

For detailed service info, check out our pricing page - it has everything you need.

I'd rather focus on what's really important - you and your emotional wellness. That's what I'm here for.

What's really on your heart right now? I'm here to listen.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: Some(Priority::Medium),
    redirect_url: Some(BUSINESS_REDIRECT_URL),
    duration: None,
};

static BUSINESS_CONTACT: ResponsePolicy = ResponsePolicy {
    title: "💙 I'm Right Here With You",
    body: "I'm right here with you as your emotional companion, not a contact directory! 💙

For contact info and office hours, check out our pricing page - it has everything you need.

I'd rather focus on what really matters - you and your emotional wellness. That's what I'm here for.

What's really on your mind right now? I'm here to listen.",
    follow_up: None,
    requires_human: false,
    interactive: false,
    priority: Some(Priority::Medium),
    redirect_url: Some(BUSINESS_REDIRECT_URL),
    duration: None,
};

pub fn crisis(tier: CrisisTier) -> &'static ResponsePolicy {
    match tier {
        CrisisTier::Immediate => &CRISIS_IMMEDIATE,
        CrisisTier::Urgent => &CRISIS_URGENT,
        CrisisTier::Moderate => &CRISIS_MODERATE,
    }
}

pub fn exercise(kind: ExerciseKind) -> &'static ResponsePolicy {
    match kind {
        ExerciseKind::Breathing => &EXERCISE_BREATHING,
        ExerciseKind::Grounding => &EXERCISE_GROUNDING,
        ExerciseKind::Journaling => &EXERCISE_JOURNALING,
        ExerciseKind::Meditation => &EXERCISE_MEDITATION,
        ExerciseKind::Movement => &EXERCISE_MOVEMENT,
    }
}

pub fn business(topic: BusinessTopic) -> &'static ResponsePolicy {
    match topic {
        BusinessTopic::Pricing => &BUSINESS_PRICING,
        BusinessTopic::Scheduling => &BUSINESS_SCHEDULING,
        BusinessTopic::Policies => &BUSINESS_POLICIES,
        BusinessTopic::Services => &BUSINESS_SERVICES,
        BusinessTopic::Contact => &BUSINESS_CONTACT,
    }
}
