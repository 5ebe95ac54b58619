//! Configuration for planstore

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding one JSON file per user
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Days before a record is treated as absent
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

/// Default store location (~/.local/share/mentorhub/user_data on Linux)
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mentorhub").join("user_data"))
        .unwrap_or_else(|| PathBuf::from("user_data"))
}

fn default_ttl_days() -> i64 {
    crate::DEFAULT_TTL_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            ttl_days: default_ttl_days(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config {}", config_path.display()))?;
            let config: Config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("mentorhub").join("planstore.yml")),
            Some(PathBuf::from("planstore.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }
}
