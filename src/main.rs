//! CeresDB client
//!
//! Interactive shell for a CeresDB instance with grammar-driven completion.
//!
//! # Usage
//!
//! ```bash
//! ceresdb-cli <username> <password> <host> <port>
//! ```

use std::io;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use ceresdb_cli::cli::{CliArgs, CliInterface};
use ceresdb_cli::config::LoggingConfig;
use ceresdb_cli::connection;
use ceresdb_cli::error::Result;
use ceresdb_cli::formatter::Formatter;
use ceresdb_cli::grammar::GrammarTable;
use ceresdb_cli::repl::completion::SuggestionEngine;
use ceresdb_cli::repl::{History, ReplEngine, ReplLoop};

/// Application entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Help and version are not errors; everything else clap rejects is
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Load configuration and apply flag overrides
/// 2. Initialize logging
/// 3. Print the banner and establish the session
/// 4. Run the REPL until exit or end of input
async fn run(args: CliArgs) -> Result<()> {
    let cli = CliInterface::from_args(args)?;
    initialize_logging(&cli.config().logging);

    cli.print_banner()?;

    let config = cli.config();
    let session = connection::connect(&cli.credentials(), &config.connection)?;

    let engine = SuggestionEngine::new(Arc::new(GrammarTable::ceresdb()));
    let history = History::new();
    let reader = ReplEngine::new(engine, history.clone(), config);
    let formatter = Formatter::from_config(&config.display);

    let mut repl = ReplLoop::with_history(reader, session, io::stdout(), formatter, history);
    repl.run().await?;

    debug!("goodbye");
    Ok(())
}

/// Initialize logging to stderr so it never mixes with query output
fn initialize_logging(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.level.to_tracing_level())
        .with_writer(io::stderr)
        .with_target(false);

    if config.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
