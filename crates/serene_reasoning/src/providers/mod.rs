pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockGenerator;

use crate::llm::TextGenerator;
use anyhow::Result;
use serene_core::config::LlmConfig;
use std::sync::Arc;

/// Build the generator named by `config.provider`.
pub fn create_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::new(config)?)),
        "mock" => Ok(Arc::new(MockGenerator::new(&config.model))),
        other => anyhow::bail!("Unknown LLM provider '{}' (expected gemini or mock)", other),
    }
}
