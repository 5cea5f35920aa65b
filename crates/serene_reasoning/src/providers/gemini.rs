use crate::llm::{GenerationError, TextGenerator};
use crate::retry::{with_retry, RetryConfig};
use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serene_core::config::LlmConfig;
use std::time::Duration;

// Request payload: a single content entry holding a single text part.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

// Response payload
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryConfig,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            retry: RetryConfig::with_attempts(config.max_attempts),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Format(format!("invalid JSON: {}", e)))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| GenerationError::Format("no candidate text".to_string()))
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        let url = self.url();
        let url = url.as_str();
        let client = &self.client;
        let api_key = self.api_key.as_str();
        let request_body = &request_body;

        tracing::debug!("Gemini prompt ({} chars)", prompt.len());

        let response = with_retry(&self.retry, "Gemini", || async move {
            client
                .post(url)
                .query(&[("key", api_key)])
                .json(request_body)
                .send()
                .await
        })
        .await?;

        let body = response.text().await?;
        tracing::debug!(
            "Gemini raw response (first 500 chars): {}",
            body.chars().take(500).collect::<String>()
        );
        extract_text(&body)
    }
}
