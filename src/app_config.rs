use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language the source document is written in (name or ISO code)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language the document is translated into (name or ISO code)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Token budget for one segment of the document
    #[serde(default = "default_split_budget")]
    pub split_budget: u32,

    /// Generation service config
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratorConfig {
    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Model used for forward and back translation
    #[serde(default = "default_translation_model")]
    pub translation_model: String,

    // @field: Model used for the difference analysis
    #[serde(default = "default_comparison_model")]
    pub comparison_model: String,

    // @field: Timeout seconds (local inference can be very slow)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "English".to_string()
}

fn default_target_language() -> String {
    "Chinese".to_string()
}

fn default_split_budget() -> u32 {
    128
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_translation_model() -> String {
    "qwen2.5:14b".to_string()
}

fn default_comparison_model() -> String {
    // A reasoning model works well for the comparison step; its <think>
    // spans are stripped from the response before use
    "hf.co/unsloth/DeepSeek-R1-Distill-Qwen-14B-GGUF:Q6_K".to_string()
}

fn default_timeout_secs() -> u64 {
    3600 // local models can chew on a long segment for a while
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.split_budget == 0 {
            return Err(ConfigError::InvalidSplitBudget(self.split_budget));
        }

        if let Err(e) = Url::parse(&self.generator.endpoint) {
            return Err(ConfigError::InvalidEndpoint {
                url: self.generator.endpoint.clone(),
                reason: e.to_string(),
            });
        }

        if self.generator.translation_model.trim().is_empty() {
            return Err(ConfigError::MissingModel("translation".to_string()));
        }

        if self.generator.comparison_model.trim().is_empty() {
            return Err(ConfigError::MissingModel("comparison".to_string()));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            split_budget: default_split_budget(),
            generator: GeneratorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            endpoint: default_endpoint(),
            translation_model: default_translation_model(),
            comparison_model: default_comparison_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
