//! Hinter for reedline - inline hints from the grammar, then from history

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

use super::completion::{CommandLine, SuggestionEngine};

/// Shows the rest of the first grammar candidate after the cursor, or the
/// rest of the most recent matching history entry when the grammar has
/// nothing to offer.
pub struct ShellHinter {
    engine: SuggestionEngine,
    style: Style,
    current_hint: String,
}

impl ShellHinter {
    /// Create a new hinter with the default style
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            engine,
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    fn grammar_hint(&self, line: &str) -> Option<String> {
        let parsed = CommandLine::parse(line);
        let partial = parsed.partial();
        if partial.is_empty() {
            return None;
        }

        let first = self.engine.suggest(line).into_iter().next()?;
        first
            .token()
            .strip_prefix(partial)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }

    fn history_hint(line: &str, history: &dyn History) -> Option<String> {
        let item = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()?
            .into_iter()
            .next()?;

        item.command_line
            .strip_prefix(line)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl Hinter for ShellHinter {
    /// Provide a hint for the current line
    ///
    /// # Arguments
    /// * `line` - The current input line
    /// * `pos` - Cursor position
    /// * `history` - Command history
    /// * `use_ansi_coloring` - Whether to use ANSI colors
    /// * `_cwd` - Current working directory (unused)
    ///
    /// # Returns
    /// * `String` - Hint text to display after the cursor
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Only hint when the cursor sits at the end of a non-empty line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let Some(hint) = self
            .grammar_hint(line)
            .or_else(|| Self::history_hint(line, history))
        else {
            return String::new();
        };

        self.current_hint = hint;
        if use_ansi_coloring {
            self.style.paint(self.current_hint.as_str()).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    /// The hint up to and including the next word
    fn next_hint_token(&self) -> String {
        let leading = self.current_hint.len() - self.current_hint.trim_start().len();
        let rest = &self.current_hint[leading..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.current_hint[..leading + end].to_string()
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }
}
