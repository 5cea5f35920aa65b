//! Dashboard operations outside the chat: mood logging, activity
//! completion, the album and sleep hours. Each change is persisted first,
//! then re-rendered, then announced with a toast.

use crate::context::DashboardContext;
use anyhow::Result;
use serene_core::{Activity, MoodEntry, MoodValue, Photo, Presenter, Storage};
use serene_memory::{ActivityLog, Album, MoodStats, MoodStore, SleepLog};
use std::sync::Arc;

/// Entries shown in the mood history list.
pub const HISTORY_LEN: usize = 10;

pub struct Dashboard {
    storage: Arc<dyn Storage>,
    presenter: Arc<dyn Presenter>,
    moods: MoodStore,
    activities: ActivityLog,
    album: Album,
    sleep: SleepLog,
}

impl Dashboard {
    pub fn new(storage: Arc<dyn Storage>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            moods: MoodStore::new(storage.clone()),
            activities: ActivityLog::new(storage.clone()),
            album: Album::new(storage.clone()),
            sleep: SleepLog::new(storage.clone()),
            storage,
            presenter,
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    /// Seed starter activities and draw every panel once.
    pub async fn init(&self) -> Result<()> {
        self.activities.ensure_seeded().await?;
        self.presenter.render_moods(&self.mood_history().await);
        self.presenter.render_activities(&self.activities.list().await);
        self.presenter.render_album(&self.album.photos().await);
        Ok(())
    }

    pub async fn record_mood(&self, value: i64, now_ms: i64) -> Result<MoodEntry> {
        let value = MoodValue::new(value)?;
        let entry = self.moods.record(value, now_ms).await?;
        self.presenter.render_moods(&self.mood_history().await);
        self.presenter.notify("Mood recorded successfully! 🎉");
        Ok(entry)
    }

    /// Newest first.
    pub async fn mood_history(&self) -> Vec<MoodEntry> {
        self.moods.history(HISTORY_LEN).await
    }

    pub async fn mood_stats(&self, now_ms: i64) -> MoodStats {
        self.moods.stats(now_ms).await
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.activities.list().await
    }

    pub async fn complete_activity(&self, id: i64, now_ms: i64) -> Result<Option<Activity>> {
        let done = self.activities.complete(id, now_ms).await?;
        if let Some(activity) = &done {
            self.presenter.render_activities(&self.activities.list().await);
            self.presenter
                .notify(&format!("Great job completing: {}! 🎉", activity.name));
        }
        Ok(done)
    }

    pub async fn add_photo(&self, image: impl Into<String>, now_ms: i64) -> Result<Photo> {
        let photo = self.album.add(image, now_ms).await?;
        self.presenter.render_album(&self.album.photos().await);
        self.presenter.notify("Photo added to your therapy album! 📸");
        Ok(photo)
    }

    pub async fn photos(&self) -> Vec<Photo> {
        self.album.photos().await
    }

    pub async fn sleep_hours(&self) -> Vec<f32> {
        self.sleep.hours().await
    }

    pub async fn record_sleep(&self, hours: f32) -> Result<Vec<f32>> {
        self.sleep.record(hours).await
    }

    pub async fn snapshot(&self, now_ms: i64) -> DashboardContext {
        DashboardContext::load(self.storage.as_ref(), now_ms).await
    }
}
