use anyhow::Result;
use serene_core::model::SEED_SLEEP_HOURS;
use serene_core::{keys, load_json, save_json, Storage};
use std::sync::Arc;

/// Nights kept in the sleep series.
pub const SLEEP_WINDOW: usize = 7;

pub struct SleepLog {
    storage: Arc<dyn Storage>,
}

impl SleepLog {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stored hours, or the seed week when nothing has been recorded.
    pub async fn hours(&self) -> Vec<f32> {
        load_json(self.storage.as_ref(), keys::SLEEP)
            .await
            .unwrap_or_else(|| SEED_SLEEP_HOURS.to_vec())
    }

    /// Append one night, keeping the last week. The first recorded night
    /// rolls the seed week forward.
    pub async fn record(&self, hours: f32) -> Result<Vec<f32>> {
        let mut series = self.hours().await;
        series.push(hours.clamp(0.0, 24.0));
        if series.len() > SLEEP_WINDOW {
            series.drain(..series.len() - SLEEP_WINDOW);
        }
        save_json(self.storage.as_ref(), keys::SLEEP, &series).await?;
        Ok(series)
    }
}
