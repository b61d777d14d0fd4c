//! Error handling for the shell.
//!
//! Two classes of failure exist:
//! - Startup errors (configuration, connection) which end the process
//! - Query errors which are printed inline while the REPL keeps running
//!
//! # Example
//!
//! ```rust
//! use ceresdb_cli::error::{QueryError, Result, ShellError};
//!
//! fn run_query() -> Result<()> {
//!     Err(QueryError::Timeout.into())
//! }
//!
//! let err: ShellError = run_query().unwrap_err();
//! assert_eq!(err.to_string(), "Query timed out");
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, ConnectionError, QueryError, Result, ShellError};
