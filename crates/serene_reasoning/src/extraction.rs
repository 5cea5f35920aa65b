//! Turn companion replies into suggested activities.
//!
//! A reply only counts as a suggestion when it contains one of
//! [`SUGGESTION_MARKERS`]. Each topic is added at most once: an existing
//! activity whose name contains the topic keyword blocks a new one.

use anyhow::Result;
use serene_core::{keys, load_json, save_json, Activity, Storage};

pub const SUGGESTION_MARKERS: [&str; 5] = ["try", "suggest", "recommend", "consider", "practice"];

/// Topic keyword and the activity created for it.
pub const TOPICS: [(&str, &str); 3] = [
    ("breathing", "Deep breathing exercise"),
    ("walk", "Take a mindful walk"),
    ("journal", "Write in journal"),
];

pub fn is_suggestion(response: &str) -> bool {
    let lower = response.to_lowercase();
    SUGGESTION_MARKERS.iter().any(|m| lower.contains(m))
}

/// Activities that `response` would add on top of `existing`.
///
/// New ids start above both the largest existing id and `now_ms`, so ids
/// stay unique even when several topics are added at once. Topics that
/// would need an id past `i64::MAX` are skipped.
pub fn new_activities(response: &str, existing: &[Activity], now_ms: i64) -> Vec<Activity> {
    if !is_suggestion(response) {
        return Vec::new();
    }
    let lower = response.to_lowercase();
    let mut next_id = match existing.iter().map(|a| a.id).max() {
        Some(max) => max.checked_add(1).map(|id| id.max(now_ms)),
        None => Some(now_ms.max(0)),
    };

    let mut added = Vec::new();
    for (keyword, name) in TOPICS {
        if !lower.contains(keyword) || existing.iter().any(|a| a.name.contains(keyword)) {
            continue;
        }
        let Some(id) = next_id else {
            tracing::warn!("No activity id left for '{}', skipping", name);
            continue;
        };
        added.push(Activity::new(id, name));
        next_id = id.checked_add(1);
    }
    added
}

/// Apply a reply to the stored activity list.
///
/// Returns the full list after writing it back when the reply was a
/// suggestion (even if nothing new was added), `None` otherwise.
pub async fn extract_into(
    storage: &dyn Storage,
    response: &str,
    now_ms: i64,
) -> Result<Option<Vec<Activity>>> {
    if !is_suggestion(response) {
        return Ok(None);
    }
    let mut activities: Vec<Activity> = load_json(storage, keys::ACTIVITIES)
        .await
        .unwrap_or_default();
    let added = new_activities(response, &activities, now_ms);
    for activity in &added {
        tracing::info!("Suggested new activity: {}", activity.name);
    }
    activities.extend(added);
    save_json(storage, keys::ACTIVITIES, &activities).await?;
    Ok(Some(activities))
}
