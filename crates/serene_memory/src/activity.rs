use anyhow::Result;
use serene_core::model::seed_activities;
use serene_core::{keys, load_json, save_json, Activity, Storage};
use std::sync::Arc;

/// Suggested wellbeing activities and their completion counts.
pub struct ActivityLog {
    storage: Arc<dyn Storage>,
}

impl ActivityLog {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Write the starter activities if nothing readable is stored yet.
    pub async fn ensure_seeded(&self) -> Result<()> {
        if load_json::<Vec<Activity>>(self.storage.as_ref(), keys::ACTIVITIES)
            .await
            .is_none()
        {
            tracing::info!("Seeding starter activities");
            self.save(&seed_activities()).await?;
        }
        Ok(())
    }

    pub async fn list(&self) -> Vec<Activity> {
        load_json(self.storage.as_ref(), keys::ACTIVITIES)
            .await
            .unwrap_or_default()
    }

    pub async fn completed(&self) -> Vec<Activity> {
        self.list()
            .await
            .into_iter()
            .filter(Activity::is_completed)
            .collect()
    }

    pub async fn save(&self, activities: &[Activity]) -> Result<()> {
        save_json(self.storage.as_ref(), keys::ACTIVITIES, activities).await
    }

    /// Mark an activity done. Unknown ids leave the log untouched.
    pub async fn complete(&self, id: i64, now_ms: i64) -> Result<Option<Activity>> {
        let mut activities = self.list().await;
        let Some(activity) = activities.iter_mut().find(|a| a.id == id) else {
            tracing::debug!("No activity with id {}", id);
            return Ok(None);
        };
        activity.mark_done(now_ms);
        let done = activity.clone();
        self.save(&activities).await?;
        tracing::info!("Completed '{}' ({} times)", done.name, done.count);
        Ok(Some(done))
    }
}
