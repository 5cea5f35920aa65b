//! Mock generator: deterministic replies for running without an API key.

use crate::llm::{GenerationError, TextGenerator};

#[derive(Debug, Clone)]
pub struct MockGenerator {
    model: String,
}

impl MockGenerator {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        Ok(format!(
            "(Mock {} response) Thank you for telling me how you feel. When things pile up, try a slow breathing exercise before bed.",
            self.model
        ))
    }
}
