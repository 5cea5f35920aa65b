use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("mood value must be between 1 and 5, got {0}")]
    InvalidMood(i64),

    #[error("unknown companion strategy '{0}' (expected scripted, staged or remote)")]
    UnknownStrategy(String),
}
