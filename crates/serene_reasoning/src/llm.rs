use async_trait::async_trait;
use thiserror::Error;

/// Ways a text-generation request can fail. The engine collapses all of
/// them into one apology; the variants exist for logging and tests.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("text generation unavailable: {0}")]
    Unavailable(String),
}

/// Produces a companion reply for a fully formatted prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
