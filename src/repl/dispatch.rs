//! Dispatch loop: read a line, run it, print the outcome, repeat

use std::io::Write;

use tracing::debug;

use super::history::History;
use super::reader::{LineReader, ReadOutcome};
use crate::error::Result;
use crate::executor::{QueryExecutor, ResultData};
use crate::formatter::Formatter;

/// Line that ends the session
pub const EXIT_COMMAND: &str = "exit";

/// State of the read-eval-print cycle
#[derive(Debug)]
pub enum LoopState {
    /// Waiting for the user to submit a line
    Prompting,

    /// A line was submitted and is about to be recorded and run
    Dispatching(String),

    /// The executor answered and the outcome is about to be printed
    Rendering(Result<ResultData>),

    /// The loop has ended
    Terminating,
}

/// The interactive loop driving one session
pub struct ReplLoop<R, E, W> {
    reader: R,
    executor: E,
    out: W,
    formatter: Formatter,
    history: History,
    state: LoopState,
}

impl<R, E, W> ReplLoop<R, E, W>
where
    R: LineReader,
    E: QueryExecutor,
    W: Write,
{
    /// Create a loop in the `Prompting` state
    ///
    /// # Arguments
    /// * `reader` - Source of submitted lines
    /// * `executor` - Session that runs every line except the exit command
    /// * `out` - Where results and query errors are printed
    /// * `formatter` - Result renderer
    pub fn new(reader: R, executor: E, out: W, formatter: Formatter) -> Self {
        Self::with_history(reader, executor, out, formatter, History::new())
    }

    /// Create a loop that records into an existing, possibly shared, history
    pub fn with_history(
        reader: R,
        executor: E,
        out: W,
        formatter: Formatter,
        history: History,
    ) -> Self {
        Self {
            reader,
            executor,
            out,
            formatter,
            history,
            state: LoopState::Prompting,
        }
    }

    /// Current state
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Lines submitted so far
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The executor queries are sent to
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// True once the loop has reached `Terminating`
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, LoopState::Terminating)
    }

    /// Run until the user exits or input ends
    ///
    /// # Returns
    /// * `Result<()>` - Ok on a clean exit; errors only for terminal or output failures
    pub async fn run(&mut self) -> Result<()> {
        while !self.is_terminated() {
            self.step().await?;
        }
        debug!(lines = self.history.len(), "session ended");
        Ok(())
    }

    /// Perform one state transition
    pub async fn step(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, LoopState::Terminating);

        self.state = match state {
            LoopState::Prompting => match self.reader.read_line()? {
                ReadOutcome::Line(line) => LoopState::Dispatching(line),
                ReadOutcome::Interrupted => LoopState::Prompting,
                ReadOutcome::Eof => {
                    debug!("input closed");
                    LoopState::Terminating
                }
            },
            LoopState::Dispatching(line) => self.dispatch(line).await,
            LoopState::Rendering(outcome) => {
                self.render(outcome)?;
                LoopState::Prompting
            }
            LoopState::Terminating => LoopState::Terminating,
        };

        Ok(())
    }

    /// Record the line, then end the session on the exact exit command or
    /// hand anything else, blank lines included, to the executor
    async fn dispatch(&mut self, line: String) -> LoopState {
        self.history.push(line.as_str());

        if line == EXIT_COMMAND {
            return LoopState::Terminating;
        }

        LoopState::Rendering(self.executor.query(&line).await)
    }

    fn render(&mut self, outcome: Result<ResultData>) -> Result<()> {
        let text = match outcome {
            Ok(data) => match self.formatter.format(&data) {
                Ok(text) => text,
                Err(e) => Some(self.formatter.format_error(&e)),
            },
            Err(e) => {
                debug!(error = %e, "query failed");
                Some(self.formatter.format_error(&e))
            }
        };

        if let Some(text) = text {
            writeln!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
