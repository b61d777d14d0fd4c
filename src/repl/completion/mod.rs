//! Completion system for the shell
//!
//! Completion is context-sensitive: the text before the cursor is tokenized,
//! the grammar position is inferred from the token preceding the word being
//! typed, and the candidates for that position are filtered by prefix.
//!
//! # Architecture
//!
//! - **CommandLine**: tokenizer separating completed tokens from the partial word
//! - **SuggestionEngine**: resolves the grammar position and filters candidates
//!
//! # Examples
//!
//! ```
//! use ceresdb_cli::repl::completion::SuggestionEngine;
//!
//! let engine = SuggestionEngine::default();
//! let (start, candidates) = engine.complete("get rec", 7);
//! assert_eq!(start, 4);
//! assert_eq!(candidates[0].token(), "record");
//! ```

mod command_line;
mod engine;

pub use command_line::{CHAIN_SEPARATOR, CommandLine, Token};
pub use engine::SuggestionEngine;
