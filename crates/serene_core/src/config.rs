use crate::error::CoreError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SereneConfig {
    pub companion: CompanionConfig,
    pub llm: LlmConfig,
    pub pacing: PacingConfig,
    pub storage: StorageConfig,
}

impl SereneConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SereneConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SERENE_STRATEGY") {
            match v.parse() {
                Ok(strategy) => self.companion.strategy = strategy,
                Err(e) => tracing::warn!("Ignoring SERENE_STRATEGY: {}", e),
            }
        }
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("GEMINI_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("GEMINI_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("SERENE_DB") {
            self.storage.db_path = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Which reply strategy drives the chat panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Keyword lookup table with sequential fallback.
    Scripted,
    /// Fixed questionnaire ending in a sentiment read-out.
    #[default]
    Staged,
    /// Every reply comes from the text-generation endpoint.
    Remote,
}

impl FromStr for StrategyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scripted" => Ok(Self::Scripted),
            "staged" => Ok(Self::Staged),
            "remote" => Ok(Self::Remote),
            other => Err(CoreError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub strategy: StrategyKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `gemini` or `mock`.
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Attempts per request, including the first.
    pub max_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_attempts: 2,
        }
    }
}

/// Simulated typing latency between companion lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub typing_delay_ms: u64,
    pub analysis_delay_ms: u64,
    pub photo_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1500,
            analysis_delay_ms: 2000,
            photo_delay_ms: 2000,
        }
    }
}

impl PacingConfig {
    /// No waiting at all, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            typing_delay_ms: 0,
            analysis_delay_ms: 0,
            photo_delay_ms: 0,
        }
    }

    pub fn typing(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn analysis(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn photo(&self) -> Duration {
        Duration::from_millis(self.photo_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "serene.db".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
