//! MentorHub configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main MentorHub configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Plan cache configuration
    pub storage: StorageConfig,

    /// Prompt/grammar selection
    pub planner: PlannerConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// A missing API key is not fatal: the service still runs and serves the
    /// fallback plans. Callers log the error as a warning.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key().map(|_| ())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .mentorhub.yml
        let local_config = PathBuf::from(".mentorhub.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/mentorhub/mentorhub.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mentorhub").join("mentorhub.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Errors are swallowed; the full load reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from(".mentorhub.yml")];
                if let Some(config_dir) = dirs::config_dir() {
                    paths.push(config_dir.join("mentorhub").join("mentorhub.yml"));
                }
                paths
            }
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (only OpenAI-compatible chat completions are supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries for transient upstream failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "meta-llama/Meta-Llama-3-8B-Instruct-Lite".to_string(),
            api_key_env: "TOGETHER_API_KEY".to_string(),
            base_url: "https://api.together.xyz".to_string(),
            max_tokens: 2048,
            timeout_ms: 60_000,
            max_retries: 2,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Plan cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON record per user
    #[serde(rename = "store-dir")]
    pub store_dir: PathBuf,

    /// Days before a cached plan is regenerated
    #[serde(rename = "ttl-days")]
    pub ttl_days: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_dir: planstore::config::default_store_path(),
            ttl_days: planstore::DEFAULT_TTL_DAYS,
        }
    }
}

/// Reply grammar requested from the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyFormat {
    /// Pipe-delimited recommendation lines and `Week N:` schedule lines
    #[default]
    Text,
    /// A JSON array embedded anywhere in the reply
    Json,
}

/// Which recommendation fields are requested and kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSchema {
    /// title, url, why
    Simple,
    /// title, url, platform, duration, level, rating, desc, why
    #[default]
    Extended,
}

impl RecommendationSchema {
    /// Number of pipe-delimited fields a line must carry
    pub fn field_count(self) -> usize {
        match self {
            Self::Simple => 3,
            Self::Extended => 8,
        }
    }
}

/// Prompt/grammar selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Reply grammar
    pub format: ReplyFormat,

    /// Recommendation schema
    pub schema: RecommendationSchema,

    /// Directory with `{name}.pmt` prompt overrides
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: Option<PathBuf>,
}
