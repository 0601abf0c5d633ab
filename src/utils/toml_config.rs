//! TOML-based configuration for the work-order crew
//!
//! All settings live in `workorder.toml`; every section and field has a
//! default, so a missing file or a partial file is valid. Secrets are never
//! stored in the file itself: providers name the environment variable that
//! holds their key (typically populated from `.env`).
//!
//! ```toml
//! [provider]
//! type = "openai"
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4o-mini"
//!
//! [document]
//! path = "example_home_inspection.pdf"
//!
//! [crew]
//! stage_timeout_secs = 90
//! ```

use crate::llm::{GenerationParams, Provider};
use crate::types::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Root configuration structure loaded from workorder.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkorderConfig {
    /// LLM provider backing both stages
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Sampling parameters
    #[serde(default)]
    pub model: ModelConfig,

    /// The report being queried
    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub crew: CrewSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
    OpenAI {
        /// Environment variable containing API key
        #[serde(default = "default_openai_key_env")]
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        #[serde(default = "default_openai_model")]
        model: String,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Ollama {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

// ============= Model Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    GenerationParams::default().temperature
}

fn default_max_tokens() -> u32 {
    GenerationParams::default().max_tokens
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

// ============= Document Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
}

fn default_document_path() -> PathBuf {
    PathBuf::from("example_home_inspection.pdf")
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

// ============= Retrieval Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between neighbouring chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Maximum excerpts handed to the research stage
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Excerpts scoring below this are dropped
    #[serde(default)]
    pub min_score: f32,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_top_k() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            min_score: 0.0,
        }
    }
}

// ============= Crew Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewSettings {
    /// Upper bound on each stage's wall-clock time
    #[serde(default = "default_stage_timeout")]
    pub stage_timeout_secs: u64,
}

fn default_stage_timeout() -> u64 {
    120
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            stage_timeout_secs: default_stage_timeout(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl FromStr for WorkorderConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: WorkorderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl WorkorderConfig {
    /// Load configuration from a TOML file that must exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist. A file that exists but is invalid is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.provider {
            ProviderConfig::Ollama { base_url, model } => {
                if base_url.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "provider.base_url must not be empty".to_string(),
                    ));
                }
                Self::require_model(model)?;
            }
            ProviderConfig::OpenAI {
                api_key_env, model, ..
            } => {
                Self::validate_env_var(api_key_env)?;
                Self::require_model(model)?;
            }
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "model.temperature must be between 0.0 and 2.0, got {}",
                self.model.temperature
            )));
        }
        if self.model.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "model.max_tokens must be greater than 0".to_string(),
            ));
        }

        let retrieval = &self.retrieval;
        if retrieval.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.chunk_size must be greater than 0".to_string(),
            ));
        }
        if retrieval.chunk_overlap >= retrieval.chunk_size {
            return Err(ConfigError::ValidationError(
                "retrieval.chunk_overlap must be less than retrieval.chunk_size".to_string(),
            ));
        }
        if retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be greater than 0".to_string(),
            ));
        }

        if self.crew.stage_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "crew.stage_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if tracing_subscriber::filter::LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Invalid logging.level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    fn require_model(model: &str) -> Result<(), ConfigError> {
        if model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_env_var(name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Resolve the provider, reading any API key from the environment
    pub fn resolve_provider(&self) -> Result<Provider, ConfigError> {
        match &self.provider {
            ProviderConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                model,
            } => {
                let api_key = std::env::var(api_key_env)
                    .map_err(|_| ConfigError::MissingEnvVar(api_key_env.clone()))?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: api_base.clone(),
                    model: model.clone(),
                })
            }
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
        }
    }

    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.crew.stage_timeout_secs)
    }
}
