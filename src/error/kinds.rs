use std::{fmt, io};

/// Crate-wide `Result` type using [`ShellError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Top-level error type for the shell.
///
/// Startup failures (configuration, connection) are fatal and bubble up to
/// `main`. Query failures are rendered inline by the REPL loop.
#[derive(Debug)]
pub enum ShellError {
    /// Connection setup errors.
    Connection(ConnectionError),

    /// Errors returned while executing a single query.
    Query(QueryError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// JSON serialization errors.
    Json(serde_json::Error),

    /// Line editor errors.
    Readline(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// The query endpoint could not be built from the given host and port.
    InvalidEndpoint(String),

    /// The HTTP client could not be constructed.
    ClientBuild(String),
}

/// Errors for a single submitted query.
#[derive(Debug)]
pub enum QueryError {
    /// The request never produced a response.
    Transport(String),

    /// The server answered with a non-success status.
    Rejected { status: u16, message: String },

    /// The server answered with a body that is not valid JSON.
    InvalidResponse(String),

    /// The request did not complete within the configured timeout.
    Timeout,
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Unreadable { path: String, reason: String },

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Connection(e) => write!(f, "Connection error: {e}"),
            ShellError::Query(e) => write!(f, "{e}"),
            ShellError::Config(e) => write!(f, "Configuration error: {e}"),
            ShellError::Io(e) => write!(f, "I/O error: {e}"),
            ShellError::Json(e) => write!(f, "JSON error: {e}"),
            ShellError::Readline(msg) => write!(f, "Readline error: {msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {msg}"),
            ConnectionError::ClientBuild(msg) => write!(f, "Failed to create client: {msg}"),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Transport(msg) => write!(f, "Request failed: {msg}"),
            QueryError::Rejected { message, .. } => write!(f, "{message}"),
            QueryError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
            QueryError::Timeout => write!(f, "Query timed out"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unreadable { path, reason } => {
                write!(f, "Cannot read config file {path}: {reason}")
            }
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for ShellError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for QueryError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to ShellError ========================= */

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Json(err)
    }
}

impl From<ConnectionError> for ShellError {
    fn from(err: ConnectionError) -> Self {
        ShellError::Connection(err)
    }
}

impl From<QueryError> for ShellError {
    fn from(err: QueryError) -> Self {
        ShellError::Query(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_query_shows_server_message_only() {
        let err = ShellError::from(QueryError::Rejected {
            status: 400,
            message: "collection 'foo' does not exist".to_string(),
        });
        assert_eq!(err.to_string(), "collection 'foo' does not exist");
    }

    #[test]
    fn test_config_error_display() {
        let err = ShellError::from(ConfigError::InvalidValue {
            field: "display.indent".to_string(),
            value: "40".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '40' for field 'display.indent'"
        );
    }
}
