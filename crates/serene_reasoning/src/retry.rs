//! Retry with exponential backoff for the text-generation endpoint.
//!
//! Retries on transient failures (429, 408, 5xx, network errors) and fails
//! fast on other client errors.

use crate::llm::GenerationError;
use rand::Rng;
use reqwest::{Response, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

/// Run `operation` until it yields a success status, a non-retryable
/// failure, or attempts run out. The last failure is returned.
pub async fn with_retry<F, Fut>(
    config: &RetryConfig,
    provider_name: &str,
    operation: F,
) -> Result<Response, GenerationError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Response, reqwest::Error>>,
{
    let attempts = config.max_attempts.max(1);
    let mut delay = config.initial_delay;
    let mut last_error = GenerationError::Unavailable("no attempt made".to_string());

    for attempt in 1..=attempts {
        match operation().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    if attempt > 1 {
                        tracing::info!("{} succeeded on attempt {}", provider_name, attempt);
                    }
                    return Ok(response);
                }

                let body = response.text().await.unwrap_or_default();
                let error = GenerationError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(200).collect(),
                };
                if !is_retryable_status(status) {
                    return Err(error);
                }
                tracing::warn!(
                    "{} returned {} on attempt {}/{}",
                    provider_name,
                    status,
                    attempt,
                    attempts
                );
                last_error = error;
            }
            Err(e) => {
                tracing::warn!(
                    "{} network error on attempt {}/{}: {}",
                    provider_name,
                    attempt,
                    attempts,
                    e
                );
                last_error = GenerationError::Network(e);
            }
        }

        if attempt < attempts {
            let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
            tokio::time::sleep(delay + jitter).await;
            delay = Duration::from_secs_f64(
                (delay.as_secs_f64() * config.backoff_factor).min(config.max_delay.as_secs_f64()),
            );
        }
    }

    Err(last_error)
}
