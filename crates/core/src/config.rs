//! Configuration management for CorpusQA.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Built-in defaults
//! - Config file (`corpusqa.yaml`, or the path given via `--config`)
//! - Environment variables
//! - Command-line flags (applied last via [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global options that shape a question-answering
/// session: which generator to talk to, where the document index and web
/// search live, retrieval sizes, and the memory/history windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generator provider (e.g., "ollama", "openai")
    pub provider: String,

    /// Model identifier for the generator
    pub model: String,

    /// API key for the generator provider
    pub api_key: Option<String>,

    /// Custom generator endpoint URL
    pub generator_endpoint: Option<String>,

    /// API key for SerpAPI web search
    pub serpapi_key: Option<String>,

    /// Endpoint of the document retrieval sidecar
    pub index_endpoint: String,

    /// Number of document passages to retrieve per query
    pub top_k: usize,

    /// Number of web results to retrieve per query (1..=10)
    pub web_results: usize,

    /// Number of prior turns embedded into the generation prompt
    pub history_window: usize,

    /// Number of recent entries returned with each response
    pub recent_window: usize,

    /// Conversation log capacity; `None` keeps the full session
    pub memory_capacity: Option<usize>,

    /// Generation deadline in seconds
    pub generation_timeout_secs: u64,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Config file structure (`corpusqa.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    generator: Option<GeneratorConfig>,
    retrieval: Option<RetrievalConfig>,
    session: Option<SessionConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeneratorConfig {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RetrievalConfig {
    index_endpoint: Option<String>,
    top_k: Option<usize>,
    web_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionConfig {
    history_window: Option<usize>,
    recent_window: Option<usize>,
    memory_capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            api_key: None,
            generator_endpoint: None,
            serpapi_key: None,
            index_endpoint: "http://localhost:7820".to_string(),
            top_k: 4,
            web_results: 3,
            history_window: 3,
            recent_window: 3,
            memory_capacity: None,
            generation_timeout_secs: 60,
            temperature: 0.1,
            max_tokens: 400,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `CORPUSQA_CONFIG`: Path to config file
    /// - `CORPUSQA_PROVIDER`: Generator provider
    /// - `CORPUSQA_MODEL`: Model identifier
    /// - `CORPUSQA_API_KEY`: Generator API key
    /// - `CORPUSQA_INDEX_ENDPOINT`: Document retrieval sidecar URL
    /// - `SERPAPI_API_KEY`: Web search API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("CORPUSQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("corpusqa.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("CORPUSQA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("CORPUSQA_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("CORPUSQA_INDEX_ENDPOINT") {
            config.index_endpoint = endpoint;
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("CORPUSQA_API_KEY").ok();
        }

        if config.serpapi_key.is_none() {
            config.serpapi_key = std::env::var("SERPAPI_API_KEY").ok();
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        tracing::debug!(
            "Configuration loaded: provider={}, model={}",
            config.provider,
            config.model
        );

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(gen) = config_file.generator {
            if let Some(provider) = gen.provider {
                result.provider = provider;
            }
            if let Some(model) = gen.model {
                result.model = model;
            }
            if let Some(endpoint) = gen.endpoint {
                result.generator_endpoint = Some(endpoint);
            }
            if let Some(temperature) = gen.temperature {
                result.temperature = temperature;
            }
            if let Some(max_tokens) = gen.max_tokens {
                result.max_tokens = max_tokens;
            }
            if let Some(timeout) = gen.timeout_secs {
                result.generation_timeout_secs = timeout;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(endpoint) = retrieval.index_endpoint {
                result.index_endpoint = endpoint;
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
            if let Some(web_results) = retrieval.web_results {
                result.web_results = web_results;
            }
        }

        if let Some(session) = config_file.session {
            if let Some(window) = session.history_window {
                result.history_window = window;
            }
            if let Some(window) = session.recent_window {
                result.recent_window = window;
            }
            if session.memory_capacity.is_some() {
                result.memory_capacity = session.memory_capacity;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This merges command-line flags with the loaded configuration, giving
    /// precedence to CLI flags over environment variables and the file.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        index_endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(index_endpoint) = index_endpoint {
            self.index_endpoint = index_endpoint;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Generation deadline as a [`Duration`].
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
