//! Application configuration
//!
//! Configuration loaded from a `.gh-dep.toml` file.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .gh-dep.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Repositories (`owner/name`) to search when none are given on the command line
    #[serde(default)]
    pub repos: Vec<String>,

    /// Additional title patterns, tried before the built-in ones.
    /// Each pattern needs two capture groups: package and version.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Login of the bot that receives merge command comments
    #[serde(default = "default_bot")]
    pub bot: String,

    /// Number of concurrent requests while enriching and executing
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Deadline for a single GitHub API call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default merge method (merge, squash, rebase)
    #[serde(default = "default_merge_method")]
    pub merge_method: String,

    /// Default merge strategy (dependabot, api)
    #[serde(default = "default_merge_strategy")]
    pub merge_strategy: String,
}

fn default_bot() -> String {
    "dependabot".to_string()
}

fn default_workers() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_merge_method() -> String {
    "squash".to_string()
}

fn default_merge_strategy() -> String {
    "dependabot".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            patterns: Vec::new(),
            bot: default_bot(),
            workers: default_workers(),
            request_timeout_secs: default_request_timeout_secs(),
            merge_method: default_merge_method(),
            merge_strategy: default_merge_strategy(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
