//! Read-only snapshot of the dashboard handed to the remote companion.

use serene_core::model::SEED_SLEEP_HOURS;
use serene_core::{keys, load_json, Activity, MoodEntry, Storage};
use serene_memory::weekly_average;

/// Mood values included in `recent_moods`.
const RECENT_MOODS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardContext {
    /// Values of the last seven entries, oldest first.
    pub recent_moods: Vec<u8>,
    /// Mean over the last seven days, one decimal; `0.0` when there is none.
    pub weekly_average: f64,
    pub sleep_hours: Vec<f32>,
    pub completed_activities: Vec<Activity>,
    pub total_mood_entries: usize,
    pub last_mood: Option<MoodEntry>,
}

impl DashboardContext {
    /// Derive the snapshot from already-loaded records.
    pub fn from_parts(
        moods: &[MoodEntry],
        activities: &[Activity],
        sleep_hours: Option<Vec<f32>>,
        now_ms: i64,
    ) -> Self {
        let skip = moods.len().saturating_sub(RECENT_MOODS);
        Self {
            recent_moods: moods[skip..].iter().map(|m| m.value.get()).collect(),
            weekly_average: weekly_average(moods, now_ms),
            sleep_hours: sleep_hours.unwrap_or_else(|| SEED_SLEEP_HOURS.to_vec()),
            completed_activities: activities
                .iter()
                .filter(|a| a.is_completed())
                .cloned()
                .collect(),
            total_mood_entries: moods.len(),
            last_mood: moods.last().cloned(),
        }
    }

    /// Build from storage. Missing or unreadable documents count as empty.
    pub async fn load(storage: &dyn Storage, now_ms: i64) -> Self {
        let moods: Vec<MoodEntry> = load_json(storage, keys::MOODS).await.unwrap_or_default();
        let activities: Vec<Activity> = load_json(storage, keys::ACTIVITIES)
            .await
            .unwrap_or_default();
        let sleep: Option<Vec<f32>> = load_json(storage, keys::SLEEP).await;
        Self::from_parts(&moods, &activities, sleep, now_ms)
    }
}
