//! Append-only mood log and the weekly statistics derived from it.

use anyhow::Result;
use serene_core::model::MILLIS_PER_DAY;
use serene_core::{keys, load_json, save_json, MoodEntry, MoodValue, Storage};
use std::sync::Arc;

/// Entries strictly newer than seven days before `now_ms`.
pub fn weekly_moods(moods: &[MoodEntry], now_ms: i64) -> Vec<&MoodEntry> {
    let week_ago = now_ms - 7 * MILLIS_PER_DAY;
    moods.iter().filter(|m| m.timestamp > week_ago).collect()
}

/// Mean of the last week's values rounded to one decimal, `0.0` when empty.
pub fn weekly_average(moods: &[MoodEntry], now_ms: i64) -> f64 {
    let weekly = weekly_moods(moods, now_ms);
    if weekly.is_empty() {
        return 0.0;
    }
    let sum: f64 = weekly.iter().map(|m| f64::from(m.value.get())).sum();
    (sum / weekly.len() as f64 * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodStats {
    pub weekly_average: f64,
    pub total_entries: usize,
}

pub struct MoodStore {
    storage: Arc<dyn Storage>,
}

impl MoodStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All entries, oldest first.
    pub async fn all(&self) -> Vec<MoodEntry> {
        load_json(self.storage.as_ref(), keys::MOODS)
            .await
            .unwrap_or_default()
    }

    pub async fn record(&self, value: MoodValue, now_ms: i64) -> Result<MoodEntry> {
        let mut moods = self.all().await;
        let entry = MoodEntry::new(value, now_ms);
        moods.push(entry.clone());
        save_json(self.storage.as_ref(), keys::MOODS, &moods).await?;
        tracing::info!("Recorded mood {} ({})", value.get(), value.label());
        Ok(entry)
    }

    /// The last `limit` entries, newest first.
    pub async fn history(&self, limit: usize) -> Vec<MoodEntry> {
        self.all().await.into_iter().rev().take(limit).collect()
    }

    pub async fn stats(&self, now_ms: i64) -> MoodStats {
        let moods = self.all().await;
        MoodStats {
            weekly_average: weekly_average(&moods, now_ms),
            total_entries: moods.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    const NOW: i64 = 1_800_000_000_000;

    fn entry(value: i64, timestamp: i64) -> MoodEntry {
        MoodEntry {
            value: MoodValue::new(value).unwrap(),
            date: String::new(),
            timestamp,
        }
    }

    #[test]
    fn test_weekly_average_empty_is_zero() {
        assert_eq!(weekly_average(&[], NOW), 0.0);
        let old = vec![entry(5, NOW - 8 * MILLIS_PER_DAY)];
        assert_eq!(weekly_average(&old, NOW), 0.0);
    }

    #[test]
    fn test_weekly_average_rounds_to_one_decimal() {
        let moods = vec![entry(4, NOW - 1000), entry(4, NOW - 2000), entry(5, NOW - 3000)];
        // 13 / 3 = 4.333..
        assert_eq!(weekly_average(&moods, NOW), 4.3);
    }

    #[test]
    fn test_week_boundary_is_exclusive() {
        let moods = vec![entry(1, NOW - 7 * MILLIS_PER_DAY), entry(3, NOW - 7 * MILLIS_PER_DAY + 1)];
        assert_eq!(weekly_moods(&moods, NOW).len(), 1);
        assert_eq!(weekly_average(&moods, NOW), 3.0);
    }

    #[tokio::test]
    async fn test_record_and_history() {
        let store = MoodStore::new(Arc::new(InMemoryStore::new()));
        for (i, v) in [2, 3, 5].into_iter().enumerate() {
            store
                .record(MoodValue::new(v).unwrap(), NOW + i as i64)
                .await
                .unwrap();
        }
        let history = store.history(2).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value.get(), 5);
        assert_eq!(history[1].value.get(), 3);

        let stats = store.stats(NOW + 10).await;
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.weekly_average, 3.3);
    }

    #[tokio::test]
    async fn test_malformed_document_reads_as_empty() {
        let storage = Arc::new(InMemoryStore::with_entry(keys::MOODS, "{not json"));
        let store = MoodStore::new(storage);
        assert!(store.all().await.is_empty());
        store.record(MoodValue::new(4).unwrap(), NOW).await.unwrap();
        assert_eq!(store.all().await.len(), 1);
    }
}
