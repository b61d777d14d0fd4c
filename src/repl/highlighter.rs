//! Syntax highlighter for CeresDB command lines
//!
//! Verbs are highlighted where a command starts, resources directly after a
//! verb that accepts them, and `|` chain separators and quoted strings
//! everywhere. Anything else is left unstyled.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use super::completion::{CHAIN_SEPARATOR, SuggestionEngine};
use crate::grammar::GrammarPosition;

/// Grammar-aware highlighter
pub struct ShellHighlighter {
    engine: SuggestionEngine,
    enabled: bool,
}

/// Lexical class of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Space,
    Separator,
    Word,
    Quoted,
}

impl ShellHighlighter {
    /// Create a new highlighter; a disabled one returns the line unstyled
    pub fn new(engine: SuggestionEngine, enabled: bool) -> Self {
        Self { engine, enabled }
    }

    fn verb_style() -> Style {
        Color::Green.bold()
    }

    fn resource_style() -> Style {
        Color::Cyan.normal()
    }

    fn separator_style() -> Style {
        Color::Magenta.bold()
    }

    fn string_style() -> Style {
        Color::Yellow.normal()
    }

    /// Split a line into spans without dropping any characters
    fn segments(line: &str) -> Vec<(Segment, &str)> {
        let mut segments = Vec::new();
        let mut rest = line;

        while let Some(first) = rest.chars().next() {
            let (kind, len) = if first.is_whitespace() {
                let len = rest
                    .find(|c: char| !c.is_whitespace())
                    .unwrap_or(rest.len());
                (Segment::Space, len)
            } else if first == CHAIN_SEPARATOR {
                (Segment::Separator, first.len_utf8())
            } else if Self::is_quote(first) {
                (Segment::Quoted, Self::quoted_len(rest, first))
            } else {
                let len = rest
                    .find(|c: char| c.is_whitespace() || c == CHAIN_SEPARATOR || Self::is_quote(c))
                    .unwrap_or(rest.len());
                (Segment::Word, len)
            };

            let (head, tail) = rest.split_at(len);
            segments.push((kind, head));
            rest = tail;
        }

        segments
    }

    fn is_quote(ch: char) -> bool {
        ch == '"' || ch == '\''
    }

    /// Length of a quoted string starting at `text`, through the matching
    /// closing quote or to the end of the line if it is unterminated
    fn quoted_len(text: &str, quote: char) -> usize {
        let mut escaped = false;
        for (i, ch) in text.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                return i + 1;
            }
        }
        text.len()
    }
}

impl Highlighter for ShellHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let table = self.engine.table();
        let mut at_command_start = true;
        let mut previous_verb: Option<&str> = None;

        for (kind, text) in Self::segments(line) {
            let style = match kind {
                Segment::Space => Style::default(),
                Segment::Separator => {
                    at_command_start = true;
                    previous_verb = None;
                    Self::separator_style()
                }
                Segment::Quoted => {
                    at_command_start = false;
                    previous_verb = None;
                    Self::string_style()
                }
                Segment::Word => {
                    let style = if at_command_start && table.is_verb(text) {
                        Self::verb_style()
                    } else if previous_verb.is_some_and(|verb| {
                        table
                            .lookup(&GrammarPosition::after_verb(verb))
                            .iter()
                            .any(|s| s.token() == text)
                    }) {
                        Self::resource_style()
                    } else {
                        Style::default()
                    };

                    previous_verb = (at_command_start && table.is_verb(text)).then_some(text);
                    at_command_start = false;
                    style
                }
            };
            styled.push((style, text.to_string()));
        }

        styled
    }
}
