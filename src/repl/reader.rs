//! Line input abstraction
//!
//! The dispatch loop reads through [`LineReader`] so that the terminal
//! renderer is pluggable: the interactive shell uses reedline, tests use a
//! scripted reader.

use crate::error::Result;

/// Outcome of waiting for one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The user submitted a line
    Line(String),

    /// The current line was abandoned (Ctrl-C)
    Interrupted,

    /// Input is closed (Ctrl-D)
    Eof,
}

/// Source of submitted lines
pub trait LineReader {
    /// Block until the user submits a line or input ends
    fn read_line(&mut self) -> Result<ReadOutcome>;
}
