use anyhow::Result;
use serene_core::{keys, load_json, save_json, Photo, Storage};
use std::sync::Arc;

/// Photos shared during check-ins.
pub struct Album {
    storage: Arc<dyn Storage>,
}

impl Album {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn add(&self, image: impl Into<String>, now_ms: i64) -> Result<Photo> {
        let mut photos: Vec<Photo> = load_json(self.storage.as_ref(), keys::ALBUM)
            .await
            .unwrap_or_default();
        let photo = Photo::new(image, now_ms);
        photos.push(photo.clone());
        save_json(self.storage.as_ref(), keys::ALBUM, &photos).await?;
        tracing::info!("Album now holds {} photos", photos.len());
        Ok(photo)
    }

    /// Newest first.
    pub async fn photos(&self) -> Vec<Photo> {
        let mut photos: Vec<Photo> = load_json(self.storage.as_ref(), keys::ALBUM)
            .await
            .unwrap_or_default();
        photos.reverse();
        photos
    }
}
