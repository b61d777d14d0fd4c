//! Completer for reedline - grammar-driven completion menu entries

use reedline::{Completer, Span, Suggestion};

use super::completion::SuggestionEngine;

/// Completer offering the grammar's candidates for the text before the cursor
pub struct ShellCompleter {
    engine: SuggestionEngine,
}

impl ShellCompleter {
    /// Create a completer over a suggestion engine
    pub fn new(engine: SuggestionEngine) -> Self {
        Self { engine }
    }
}

impl Completer for ShellCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - Candidates replacing the partial word under the cursor
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.engine.complete(line, pos);

        candidates
            .into_iter()
            .map(|candidate| Suggestion {
                value: candidate.token().to_string(),
                description: Some(candidate.description().to_string()),
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}
