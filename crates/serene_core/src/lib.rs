pub mod config;
pub mod error;
pub mod model;
pub mod sentiment;

pub use config::SereneConfig;
pub use error::CoreError;
pub use model::{Activity, MoodEntry, MoodValue, Photo};
pub use sentiment::Sentiment;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Keys under which the dashboard keeps its JSON documents.
pub mod keys {
    pub const MOODS: &str = "moods";
    pub const ACTIVITIES: &str = "suggestedActivities";
    pub const ALBUM: &str = "therapyAlbum";
    pub const SLEEP: &str = "sleepData";
}

/// Who authored a chat bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Local key-value store of named JSON documents.
///
/// Values are raw strings so that a corrupted document can be detected and
/// treated as missing by [`load_json`] instead of failing the caller.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
}

/// Everything the companion can show to the user.
///
/// Rendering is fire-and-forget; a presenter never reports failure back
/// into the conversation.
pub trait Presenter: Send + Sync {
    fn append_message(&self, role: Role, text: &str);
    fn set_typing(&self, visible: bool);
    fn render_moods(&self, moods: &[MoodEntry]);
    fn render_activities(&self, activities: &[Activity]);
    fn render_album(&self, photos: &[Photo]);
    fn notify(&self, message: &str);
    fn reveal_photo_upload(&self);
}

/// Read a typed document. Missing keys, backend errors and malformed JSON
/// all come back as `None`.
pub async fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Storage read for '{}' failed, treating as empty: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Stored '{}' is not valid JSON, treating as empty: {}", key, e);
            None
        }
    }
}

/// Serialize and write a typed document.
pub async fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, raw).await
}
