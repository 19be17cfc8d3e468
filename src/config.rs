// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ResearchError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tavily rejects requests asking for more than this many results.
pub const MAX_SEARCH_RESULTS_LIMIT: usize = 20;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub model: ModelConfig,
    pub search: SearchConfig,
    pub research: ResearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_search_results: usize,
    #[serde(default)]
    pub topic: SearchTopic,
    #[serde(default)]
    pub search_depth: SearchDepth,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResearchConfig {
    pub max_tokens_per_source: usize,
    pub chars_per_token: usize,
    pub include_raw_content: bool,
    #[serde(default)]
    pub failure_policy: SearchFailurePolicy,
    #[serde(default)]
    pub search_concurrency: Option<usize>,
    #[serde(default)]
    pub default_schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTopic {
    #[default]
    General,
    News,
}

impl SearchTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTopic::General => "general",
            SearchTopic::News => "news",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

/// How the search fan-out treats a failing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailurePolicy {
    /// Any failed query fails the whole run.
    #[default]
    AllOrNothing,
    /// Failed queries are skipped; the run fails only if none succeeded.
    Isolate,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ENRICH_NOTES")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ResearchError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| ResearchError::Config(e.to_string()))?;

        config.apply_env_api_keys();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        dotenv().ok();

        let mut config = Self {
            model: ModelConfig {
                base_url: "https://api.groq.com/openai/v1".to_string(),
                model: "openai/gpt-oss-120b".to_string(),
                api_key: None,
                temperature: Some(0.0),
                timeout_secs: 120,
            },
            search: SearchConfig {
                base_url: "https://api.tavily.com".to_string(),
                api_key: None,
                max_search_results: 3,
                topic: SearchTopic::General,
                search_depth: SearchDepth::Basic,
                timeout_secs: 60,
            },
            research: ResearchConfig {
                max_tokens_per_source: 1000,
                chars_per_token: 4,
                include_raw_content: true,
                failure_policy: SearchFailurePolicy::AllOrNothing,
                search_concurrency: None,
                default_schema: None,
            },
        };

        config.apply_env_api_keys();
        config
    }

    /// Fills missing API keys from the provider's conventional variables.
    fn apply_env_api_keys(&mut self) {
        if self.model.api_key.is_none() {
            self.model.api_key = std::env::var("GROQ_API_KEY").ok();
        }
        if self.search.api_key.is_none() {
            self.search.api_key = std::env::var("TAVILY_API_KEY").ok();
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.model.base_url)?;
        Validator::validate_url(&self.search.base_url)?;

        if self.model.model.trim().is_empty() {
            return Err(ResearchError::Config(
                "model.model must not be empty".to_string(),
            ));
        }

        if self.search.max_search_results == 0
            || self.search.max_search_results > MAX_SEARCH_RESULTS_LIMIT
        {
            return Err(ResearchError::Config(format!(
                "max_search_results must be between 1 and {}",
                MAX_SEARCH_RESULTS_LIMIT
            )));
        }

        if self.research.max_tokens_per_source == 0 {
            return Err(ResearchError::Config(
                "max_tokens_per_source must be greater than 0".to_string(),
            ));
        }

        if self.research.chars_per_token == 0 {
            return Err(ResearchError::Config(
                "chars_per_token must be greater than 0".to_string(),
            ));
        }

        if self.research.search_concurrency == Some(0) {
            return Err(ResearchError::Config(
                "search_concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
