//! Suggestion engine - maps the text before the cursor to candidates
//!
//! The engine is a pure function of its input and the grammar table. It does
//! no I/O and never touches history or the session, so it is safe to call on
//! every keystroke.

use std::sync::Arc;

use tracing::trace;

use super::command_line::{CommandLine, Token};
use crate::grammar::{GrammarPosition, GrammarTable, Suggestion};

/// Context-sensitive completion over a [`GrammarTable`]
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    table: Arc<GrammarTable>,
}

impl SuggestionEngine {
    /// Create an engine over the given grammar
    pub fn new(table: Arc<GrammarTable>) -> Self {
        Self { table }
    }

    /// The grammar this engine completes against
    pub fn table(&self) -> &GrammarTable {
        &self.table
    }

    /// Suggestions for the text typed so far (everything before the cursor)
    pub fn suggest(&self, text_before_cursor: &str) -> Vec<&Suggestion> {
        let line = CommandLine::parse(text_before_cursor);
        self.suggest_for(&line)
    }

    /// Complete `line` at byte offset `pos`.
    ///
    /// # Returns
    /// * `(usize, Vec<&Suggestion>)` - Start of the partial word and the candidates
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<&Suggestion>) {
        let before = line.get(..pos).unwrap_or(line);
        let parsed = CommandLine::parse(before);
        (parsed.completion_start(), self.suggest_for(&parsed))
    }

    /// Resolve the grammar position for an already tokenized line.
    ///
    /// `None` means no structured completion applies here.
    pub fn position(&self, line: &CommandLine<'_>) -> Option<GrammarPosition> {
        if line.in_string() {
            return None;
        }
        if line.prefix().is_empty() {
            return Some(GrammarPosition::StartOfCommand);
        }

        match line.discriminator() {
            Some(Token::Separator) => Some(GrammarPosition::StartOfCommand),
            Some(Token::Word(word)) if self.table.is_verb(word) => {
                Some(GrammarPosition::after_verb(word))
            }
            _ => None,
        }
    }

    fn suggest_for(&self, line: &CommandLine<'_>) -> Vec<&Suggestion> {
        let Some(position) = self.position(line) else {
            trace!(prefix = line.prefix(), "no grammar position");
            return Vec::new();
        };

        let partial = line.partial();
        let candidates: Vec<&Suggestion> = self
            .table
            .lookup(&position)
            .iter()
            .filter(|s| s.token().starts_with(partial))
            .collect();

        trace!(?position, partial, count = candidates.len(), "suggestions");
        candidates
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(Arc::new(GrammarTable::ceresdb()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(suggestions: Vec<&Suggestion>) -> Vec<&str> {
        suggestions.into_iter().map(Suggestion::token).collect()
    }

    #[test]
    fn test_empty_line_offers_all_verbs() {
        let engine = SuggestionEngine::default();
        assert_eq!(
            tokens(engine.suggest("")),
            vec![
                "delete", "get", "patch", "post", "put", "filter", "orderasc", "orderdsc",
                "limit", "count", "exit"
            ]
        );
    }

    #[test]
    fn test_verb_prefix_filters() {
        let engine = SuggestionEngine::default();
        assert_eq!(tokens(engine.suggest("p")), vec!["patch", "post", "put"]);
        assert_eq!(tokens(engine.suggest("po")), vec!["post"]);
        assert_eq!(tokens(engine.suggest("order")), vec!["orderasc", "orderdsc"]);
        assert_eq!(tokens(engine.suggest("get")), vec!["get"]);
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let engine = SuggestionEngine::default();
        assert!(engine.suggest("G").is_empty());
        assert!(engine.suggest("get R").is_empty());
    }

    #[test]
    fn test_get_resources() {
        let engine = SuggestionEngine::default();
        assert_eq!(
            tokens(engine.suggest("get ")),
            vec!["collection", "database", "permit", "record", "user"]
        );
    }

    #[test]
    fn test_patch_resources() {
        let engine = SuggestionEngine::default();
        assert_eq!(tokens(engine.suggest("patch ")), vec!["record"]);
    }

    #[test]
    fn test_same_partial_differs_by_verb() {
        let engine = SuggestionEngine::default();
        assert_eq!(tokens(engine.suggest("get d")), vec!["database"]);
        assert!(engine.suggest("put d").is_empty());
        assert!(engine.suggest("patch d").is_empty());
    }

    #[test]
    fn test_unknown_discriminator_is_empty() {
        let engine = SuggestionEngine::default();
        assert!(engine.suggest("get record ").is_empty());
        assert!(engine.suggest("foo ").is_empty());
        assert!(engine.suggest("limit ").is_empty());
        assert!(engine.suggest("get record db.coll ").is_empty());
    }

    #[test]
    fn test_whitespace_only_prefix_is_empty() {
        let engine = SuggestionEngine::default();
        assert!(engine.suggest(" ").is_empty());
        assert!(engine.suggest("   g").is_empty());
    }

    #[test]
    fn test_extra_spaces_after_verb() {
        let engine = SuggestionEngine::default();
        assert_eq!(tokens(engine.suggest("patch   ")), vec!["record"]);
    }

    #[test]
    fn test_separator_restarts_grammar() {
        let engine = SuggestionEngine::default();
        assert_eq!(
            tokens(engine.suggest("get record db.coll | f")),
            vec!["filter"]
        );
        assert_eq!(tokens(engine.suggest("get record db.coll |l")), vec!["limit"]);
        assert_eq!(engine.suggest("get record db.coll | ").len(), 11);
    }

    #[test]
    fn test_verb_after_separator() {
        let engine = SuggestionEngine::default();
        assert_eq!(
            tokens(engine.suggest("get record db.coll | get p")),
            vec!["permit"]
        );
    }

    #[test]
    fn test_no_completion_inside_string() {
        let engine = SuggestionEngine::default();
        assert!(engine.suggest("filter \"get ").is_empty());
    }

    #[test]
    fn test_complete_span_start() {
        let engine = SuggestionEngine::default();
        let (start, candidates) = engine.complete("get rec", 7);
        assert_eq!(start, 4);
        assert_eq!(tokens(candidates), vec!["record"]);

        let (start, candidates) = engine.complete("patch ", 6);
        assert_eq!(start, 6);
        assert_eq!(tokens(candidates), vec!["record"]);
    }

    #[test]
    fn test_complete_ignores_text_after_cursor() {
        let engine = SuggestionEngine::default();
        let (start, candidates) = engine.complete("ge record", 2);
        assert_eq!(start, 0);
        assert_eq!(tokens(candidates), vec!["get"]);
    }

    #[test]
    fn test_complete_out_of_range_cursor() {
        let engine = SuggestionEngine::default();
        let (start, candidates) = engine.complete("get ", 42);
        assert_eq!(start, 4);
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_custom_table() {
        let table = GrammarTable::builder()
            .verb("show", "Show things", &[("tables", "All tables")])
            .build();
        let engine = SuggestionEngine::new(Arc::new(table));
        assert_eq!(tokens(engine.suggest("")), vec!["show"]);
        assert_eq!(tokens(engine.suggest("show t")), vec!["tables"]);
        assert!(engine.suggest("get ").is_empty());
    }
}
