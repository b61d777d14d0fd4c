//! Configuration management for the shell
//!
//! Configuration is read from an optional TOML file. Missing sections and
//! fields fall back to defaults; command-line flags override the result.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! ```toml
//! [connection]
//! timeout = 30
//! scheme = "http"
//! query_path = "/api/query"
//!
//! [display]
//! indent = 4
//! color_output = true
//!
//! [history]
//! persist = true
//!
//! [logging]
//! level = "debug"
//!
//! [prompt]
//! text = "ceresdb> "
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection configuration
    pub connection: ConnectionConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// History configuration
    pub history: HistoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Prompt configuration
    pub prompt: PromptConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Per-query timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// URL scheme of the query endpoint (http or https)
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Path of the query endpoint
    #[serde(default = "default_query_path")]
    pub query_path: String,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Spaces per indentation level for structured results
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Enable syntax highlighting of the input line
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of entries kept by the line editor for recall
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default)]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default)]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Text shown before the cursor
    #[serde(default = "default_prompt_text")]
    pub text: String,
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_query_path() -> String {
    "/api/query".to_string()
}

fn default_indent() -> usize {
    4
}

fn default_color_output() -> bool {
    true
}

fn default_syntax_highlighting() -> bool {
    true
}

fn default_max_history_size() -> usize {
    10_000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ceresdb_history")
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_prompt_text() -> String {
    ">>> ".to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            scheme: default_scheme(),
            query_path: default_query_path(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            color_output: default_color_output(),
            syntax_highlighting: default_syntax_highlighting(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: default_prompt_text(),
        }
    }
}

impl Config {
    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ceresdb")
            .join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// With `None` the default path is used. A missing file yields the
    /// default configuration; an unreadable or malformed file is an error.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded and validated configuration
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error naming the first bad field otherwise
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &str, value: impl ToString) -> ConfigError {
            ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            }
        }

        if self.connection.timeout == 0 {
            return Err(invalid("connection.timeout", self.connection.timeout).into());
        }
        if !matches!(self.connection.scheme.as_str(), "http" | "https") {
            return Err(invalid("connection.scheme", &self.connection.scheme).into());
        }
        if !self.connection.query_path.starts_with('/') {
            return Err(invalid("connection.query_path", &self.connection.query_path).into());
        }
        if self.display.indent > 16 {
            return Err(invalid("display.indent", self.display.indent).into());
        }
        if self.history.max_size == 0 {
            return Err(invalid("history.max_size", self.history.max_size).into());
        }
        if self.prompt.text.is_empty() {
            return Err(invalid("prompt.text", "").into());
        }
        Ok(())
    }
}

impl ConnectionConfig {
    /// Per-query timeout as a Duration
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
