//! regvoc Configuration Management
//!
//! Handles configuration from environment variables, TOML config files,
//! and command-line overrides with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction engine configuration
    pub extraction: ExtractionConfig,

    /// RDF output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(strategy) = std::env::var("REGVOC_STRATEGY") {
            config.extraction.strategy = strategy.parse()?;
        }
        if let Ok(workers) = std::env::var("REGVOC_WORKERS") {
            config.extraction.workers = workers.parse().map_err(|_| ConfigError::InvalidValue {
                key: "REGVOC_WORKERS".to_string(),
                value: workers,
            })?;
        }
        if let Ok(max) = std::env::var("REGVOC_MAX_SENTENCE_TOKENS") {
            config.extraction.max_sentence_tokens =
                max.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "REGVOC_MAX_SENTENCE_TOKENS".to_string(),
                    value: max,
                })?;
        }

        if let Ok(namespace) = std::env::var("REGVOC_NAMESPACE") {
            config.output.namespace = namespace;
        }
        if let Ok(geonames) = std::env::var("REGVOC_GEONAMES") {
            config.output.geonames = Some(PathBuf::from(geonames));
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.extraction.strategy != defaults.extraction.strategy {
            self.extraction.strategy = env_config.extraction.strategy;
        }
        if env_config.extraction.workers != defaults.extraction.workers {
            self.extraction.workers = env_config.extraction.workers;
        }
        if env_config.extraction.max_sentence_tokens != defaults.extraction.max_sentence_tokens {
            self.extraction.max_sentence_tokens = env_config.extraction.max_sentence_tokens;
        }
        if env_config.output.namespace != defaults.output.namespace {
            self.output.namespace = env_config.output.namespace;
        }
        if env_config.output.geonames.is_some() {
            self.output.geonames = env_config.output.geonames;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }
}

/// Extraction strategy selecting the parse form the engine walks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Typed-dependency graph heuristics
    #[default]
    Dependency,
    /// Constituency (phrase-structure) tree heuristics
    Constituency,
}

impl std::str::FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dependency" | "dep" => Ok(Self::Dependency),
            "constituency" | "tree" => Ok(Self::Constituency),
            _ => Err(ConfigError::InvalidValue {
                key: "REGVOC_STRATEGY".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dependency => write!(f, "dependency"),
            Self::Constituency => write!(f, "constituency"),
        }
    }
}

/// Extraction engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which parse form to extract from
    pub strategy: Strategy,

    /// Worker pool size (0 = available hardware parallelism)
    pub workers: usize,

    /// Sentences with more tokens than this are skipped before parsing
    pub max_sentence_tokens: usize,

    /// Extra words never used as adjectival qualifiers
    pub stop_words: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Dependency,
            workers: 0,
            max_sentence_tokens: 70,
            stop_words: Vec::new(),
        }
    }
}

impl ExtractionConfig {
    /// Resolve the effective pool size
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// RDF output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Namespace IRI for vocabulary terms and custom predicates
    pub namespace: String,

    /// GeoNames `uri|name` link file
    pub geonames: Option<PathBuf>,

    /// Print every extracted triple
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            namespace: "http://regvoc.example.org/vocab#".to_string(),
            geonames: None,
            verbose: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
