//! CeresDB Client Library
//!
//! Core of the interactive CeresDB shell: the command grammar, context
//! sensitive completion, the dispatch loop and the HTTP session it drives.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: Session with a CeresDB instance
//! - `error`: Error types and handling
//! - `executor`: Query execution seam and result types
//! - `formatter`: Output formatting and display
//! - `grammar`: Command grammar table
//! - `repl`: Interactive REPL engine and dispatch loop
//!
//! # Example
//!
//! ```no_run
//! use ceresdb_cli::config::Config;
//! use ceresdb_cli::connection::{Credentials, connect};
//! use ceresdb_cli::executor::QueryExecutor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let credentials = Credentials::new("admin", "secret", "localhost", 7437);
//!     let mut session = connect(&credentials, &config.connection)?;
//!
//!     let result = session.query("get database").await?;
//!     println!("{result:?}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod grammar;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use connection::{Credentials, Session};
pub use error::{Result, ShellError};
pub use executor::{QueryExecutor, ResultData};
pub use formatter::Formatter;
pub use grammar::{GrammarPosition, GrammarTable, Suggestion};
pub use repl::completion::SuggestionEngine;
pub use repl::{ReplEngine, ReplLoop};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
