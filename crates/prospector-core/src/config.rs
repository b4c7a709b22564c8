//! Prospector Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with defaults tuned for English news prose.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimum confidence a profile needs to be emitted
///
/// This is the only acceptance threshold in the pipeline; override it through
/// `ExtractionConfig::min_confidence`, never at individual call sites.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Default half-width of a character context window
pub const DEFAULT_WINDOW_CHARS: usize = 150;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProspectorConfig {
    /// Extraction pipeline configuration
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ProspectorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("PROSPECTOR_MIN_CONFIDENCE") {
            config.extraction.min_confidence = parse_env("PROSPECTOR_MIN_CONFIDENCE", value)?;
        }
        if let Ok(value) = std::env::var("PROSPECTOR_WINDOW_CHARS") {
            config.extraction.window =
                WindowStrategy::Chars(parse_env("PROSPECTOR_WINDOW_CHARS", value)?);
        }
        // Sentence windows win when both are set
        if let Ok(value) = std::env::var("PROSPECTOR_WINDOW_SENTENCES") {
            config.extraction.window =
                WindowStrategy::Sentences(parse_env("PROSPECTOR_WINDOW_SENTENCES", value)?);
        }
        if let Ok(value) = std::env::var("PROSPECTOR_QUOTE_SCOPE") {
            config.extraction.quote_scope = value.parse()?;
        }
        if let Ok(value) = std::env::var("PROSPECTOR_DEDUP") {
            config.extraction.dedup_enabled = parse_env("PROSPECTOR_DEDUP", value)?;
        }
        if let Ok(value) = std::env::var("PROSPECTOR_TIME_BUDGET_MS") {
            config.extraction.time_budget_ms = Some(parse_env("PROSPECTOR_TIME_BUDGET_MS", value)?);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(value) = std::env::var("LOG_JSON") {
            config.logging.json_format = parse_env("LOG_JSON", value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = ExtractionConfig::default();

        // Only override if env values differ from defaults
        if env_config.extraction.min_confidence != defaults.min_confidence {
            self.extraction.min_confidence = env_config.extraction.min_confidence;
        }
        if env_config.extraction.window != defaults.window {
            self.extraction.window = env_config.extraction.window;
        }
        if env_config.extraction.quote_scope != defaults.quote_scope {
            self.extraction.quote_scope = env_config.extraction.quote_scope;
        }
        if env_config.extraction.dedup_enabled != defaults.dedup_enabled {
            self.extraction.dedup_enabled = env_config.extraction.dedup_enabled;
        }
        if env_config.extraction.time_budget_ms.is_some() {
            self.extraction.time_budget_ms = env_config.extraction.time_budget_ms;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extraction = &self.extraction;

        if !(0.0..=1.0).contains(&extraction.min_confidence) {
            return Err(ConfigError::InvalidValue {
                key: "min_confidence".to_string(),
                value: extraction.min_confidence.to_string(),
            });
        }
        if let WindowStrategy::Chars(0) = extraction.window {
            return Err(ConfigError::InvalidValue {
                key: "window.chars".to_string(),
                value: "0".to_string(),
            });
        }
        if extraction.quote_min_chars == 0
            || extraction.quote_min_chars > extraction.quote_max_chars
        {
            return Err(ConfigError::InvalidValue {
                key: "quote_min_chars".to_string(),
                value: format!(
                    "{} (max {})",
                    extraction.quote_min_chars, extraction.quote_max_chars
                ),
            });
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// How the neighborhood around an entity is cut out of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStrategy {
    /// Characters on each side of the entity span
    Chars(usize),
    /// Sentences before and after the entity's sentence
    Sentences(usize),
}

impl Default for WindowStrategy {
    fn default() -> Self {
        Self::Chars(DEFAULT_WINDOW_CHARS)
    }
}

/// Text searched for quotes attributed to a person
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteScope {
    /// Only the mention's context window
    #[default]
    Window,
    /// The whole document
    Document,
}

impl std::str::FromStr for QuoteScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "window" => Ok(Self::Window),
            "document" => Ok(Self::Document),
            _ => Err(ConfigError::InvalidValue {
                key: "PROSPECTOR_QUOTE_SCOPE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Extraction pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Context window around each candidate
    pub window: WindowStrategy,

    /// Profiles scoring below this are dropped
    pub min_confidence: f32,

    /// Suppress repeated (name, company) pairs within a session
    pub dedup_enabled: bool,

    /// Where to look for quotes
    pub quote_scope: QuoteScope,

    /// Shortest accepted quote, in characters
    pub quote_min_chars: usize,

    /// Longest accepted quote, in characters
    pub quote_max_chars: usize,

    /// Abort extraction after this many milliseconds
    pub time_budget_ms: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            window: WindowStrategy::default(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            dedup_enabled: true,
            quote_scope: QuoteScope::default(),
            quote_min_chars: 10,
            quote_max_chars: 500,
            time_budget_ms: None,
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

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
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
