//! REPL (Read-Eval-Print Loop) for the CeresDB shell
//!
//! This module provides the interactive shell:
//! - Grammar-driven completion, shown as a Tab menu
//! - Inline hints from the grammar and from recall history
//! - Syntax highlighting of verbs, resources and chain separators
//! - Multi-line input while a JSON payload is open
//! - The dispatch loop that sends each line to the session

pub mod completion;

mod completer;
mod dispatch;
mod engine;
mod highlighter;
mod hinter;
mod history;
mod prompt;
mod reader;
mod recall;
mod validator;

pub use completer::ShellCompleter;
pub use dispatch::{EXIT_COMMAND, LoopState, ReplLoop};
pub use engine::ReplEngine;
pub use highlighter::ShellHighlighter;
pub use hinter::ShellHinter;
pub use history::History;
pub use prompt::{DEFAULT_PROMPT, ShellPrompt};
pub use reader::{LineReader, ReadOutcome};
pub use recall::RecallHistory;
pub use validator::ShellValidator;
