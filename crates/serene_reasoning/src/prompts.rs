//! Fixed companion lines and the instruction prompt for remote generation.

use crate::context::DashboardContext;
use crate::session::Stage;
use serene_core::Sentiment;

/// Opening line of the scripted and remote companions.
pub const OPENING: &str = "Hello! I'm your AI wellness companion and psychologist. I can see your mood tracking, sleep patterns, and activities. Tell me about your day and how you're feeling!";

/// Shown whenever the text-generation endpoint cannot produce a reply.
pub const FALLBACK_APOLOGY: &str = "I'm sorry, I'm having trouble connecting right now. Please give me a moment and send your message again.";

pub const ANALYSIS_PROMPT: &str =
    "Thank you for opening up to me. Give me a moment to reflect on everything you've shared...";

pub const PHOTO_REQUEST: &str = "Before we wrap up, would you like to share a photo of something that made you smile today? You can upload it below.";

pub const CLOSING_ACK: &str = "Thank you for checking in today. Our session is complete, but you're welcome to share a photo anytime or start a new check-in whenever you like.";

pub const PHOTO_THANKS: &str = "Thank you for sharing this photo with me! Let me take a look...";

pub const PHOTO_REFLECTIONS: [&str; 5] = [
    "I can see a sense of calm in this image. The colors and composition suggest you're finding moments of peace today. 🌸",
    "This photo radiates positive energy! The lighting and subject matter show that you're appreciating the beauty around you. ✨",
    "There's a contemplative quality to this image that suggests you're taking time for reflection, which is wonderful for mental health. 🌿",
    "The composition of this photo shows creativity and mindfulness - both excellent signs of emotional wellbeing! 🎨",
    "I can sense a story in this image. Whatever you're going through, remember that every moment is part of your unique journey. 🌟",
];

pub const PHOTO_FAREWELL: &str = "It's been wonderful talking with you today. Remember, I'm always here when you need someone to listen. Take care of yourself! 💙🤗";

/// The question asked on entering `stage`.
pub fn stage_prompt(stage: Stage) -> &'static str {
    match stage {
        Stage::Greeting => "Hi, I'm your wellness companion. Let's take a few minutes to check in together. To start, how are you feeling right now?",
        Stage::Feelings => "Thanks for sharing that. Which emotions have stood out for you over the past few days?",
        Stage::Sleep => "How have you been sleeping lately? Do you wake up feeling refreshed?",
        Stage::Habits => "What does a typical day look like for you right now, in terms of meals, movement and screen time?",
        Stage::Activities => "Which activities have you enjoyed or found helpful recently?",
        Stage::Social => "How connected have you felt to friends, family or the people around you?",
        Stage::Analysis => ANALYSIS_PROMPT,
        Stage::Complete => CLOSING_ACK,
    }
}

/// One-sentence read-out for each sentiment bucket.
pub fn analysis_line(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "From what you've shared, you seem to be in a fairly good place right now, with more bright spots than hard ones.",
        Sentiment::Negative => "It sounds like things have been heavy lately, with stress and low moments showing up across several parts of your life.",
        Sentiment::Mixed => "Your days sound like a mix of ups and downs, which is completely normal.",
    }
}

pub fn encouragement(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Keep leaning on the routines that are working for you. Consider writing a short journal note tonight about what went well, so you can come back to it on tougher days.",
        Sentiment::Negative => "Please be gentle with yourself. Try a 5-minute breathing exercise when tension builds, and remember that reaching out to someone you trust, or to a professional, is a sign of strength.",
        Sentiment::Mixed => "Small, steady habits help on uneven days. You might practice a short walk outside each afternoon and notice which moments lift you up.",
    }
}

/// Keyword table of the scripted companion, checked top to bottom.
pub const SCRIPTED_TABLE: [(&str, &str); 10] = [
    (
        "hello",
        "Hello! I'm your AI wellness companion. I can see your mood tracking shows some ups and downs this week. How are you feeling right now?",
    ),
    (
        "feeling",
        "I understand. Looking at your data, your mood average is fluctuating. Can you tell me what's been weighing on your mind lately?",
    ),
    (
        "stressed",
        "Stress can really impact our wellbeing. I notice your sleep hours vary between 5-8 hours. How has your sleep been affecting your stress levels?",
    ),
    (
        "sleep",
        "Sleep is crucial for mental health. Based on your patterns, I'd suggest trying a 5-minute breathing exercise before bed. What activities usually help you relax?",
    ),
    (
        "work",
        "Work stress is very common. Your mood entries show you're actively tracking your wellbeing, which is great! Have you tried taking short breaks during your workday?",
    ),
    (
        "anxious",
        "Anxiety can be overwhelming. I see you've completed some wellness activities - that's excellent progress! Try a 10-minute mindful walk when you feel anxious.",
    ),
    (
        "better",
        "I'm glad you're feeling better! Your commitment to tracking your mood shows real dedication to your mental health. Keep up these positive habits!",
    ),
    (
        "tired",
        "Fatigue affects everything. Your sleep data shows inconsistent patterns. Consider setting a regular bedtime routine and writing down 3 things you're grateful for each night.",
    ),
    (
        "lonely",
        "Loneliness is a valid feeling. Your wellness journey shows you're taking care of yourself. Consider reaching out to a friend or joining a community activity.",
    ),
    (
        "thanks",
        "You're very welcome! Remember, I'm always here to support you. Your progress in tracking your mental health is truly commendable. Take care of yourself! 💙 Let's upload a photo of your beautiful smile.",
    ),
];

fn join_numbers<T: std::fmt::Display>(values: &[T]) -> String {
    if values.is_empty() {
        return "none recorded".to_string();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Instruction sent to the text-generation endpoint for one user message.
pub fn remote_prompt(user_message: &str, ctx: &DashboardContext) -> String {
    let last_mood = match &ctx.last_mood {
        Some(m) => format!("{} ({}/5) on {}", m.value.label(), m.value.get(), m.date),
        None => "none yet".to_string(),
    };
    let completed = if ctx.completed_activities.is_empty() {
        "none yet".to_string()
    } else {
        ctx.completed_activities
            .iter()
            .map(|a| format!("{} ({} times)", a.name, a.count))
            .collect::<Vec<_>>()
            .join("; ")
    };

    format!(
        "You are a warm, supportive wellness companion with a psychologist's training. \
Use the user's dashboard data below to personalise your reply. Keep it to 2-4 sentences, \
acknowledge their feelings, and when it fits suggest one small activity such as a breathing \
exercise, a mindful walk or journaling.

Dashboard data:
- Recent moods (1-5, oldest first): {recent}
- Weekly mood average: {average:.1}
- Total mood entries: {total}
- Last mood: {last_mood}
- Sleep hours over the last week: {sleep}
- Completed activities: {completed}

User message: \"{message}\"",
        recent = join_numbers(&ctx.recent_moods),
        average = ctx.weekly_average,
        total = ctx.total_mood_entries,
        last_mood = last_mood,
        sleep = join_numbers(&ctx.sleep_hours),
        completed = completed,
        message = user_message,
    )
}
