//! Cursor-aware tokenizer for completion
//!
//! Splits the text before the cursor into completed tokens and the trailing
//! partial word. Runs of whitespace collapse, quoted strings stay a single
//! token, and `|` is always a separator even without surrounding spaces.

/// Character that chains sub-queries on one line
pub const CHAIN_SEPARATOR: char = '|';

/// A completed token in the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A whitespace-delimited word (quotes included verbatim)
    Word(&'a str),
    /// The chain separator `|`
    Separator,
}

/// Text before the cursor, decomposed for completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    tokens: Vec<Token<'a>>,
    prefix: &'a str,
    partial: &'a str,
    in_string: bool,
}

impl<'a> CommandLine<'a> {
    /// Tokenize the text that precedes the cursor
    pub fn parse(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;
        let mut quote: Option<char> = None;
        let mut escape_next = false;

        for (i, ch) in text.char_indices() {
            if let Some(q) = quote {
                if escape_next {
                    escape_next = false;
                } else if ch == '\\' {
                    escape_next = true;
                } else if ch == q {
                    quote = None;
                }
                continue;
            }

            if ch.is_whitespace() || ch == CHAIN_SEPARATOR {
                if let Some(start) = word_start.take() {
                    tokens.push(Token::Word(&text[start..i]));
                }
                if ch == CHAIN_SEPARATOR {
                    tokens.push(Token::Separator);
                }
                continue;
            }

            if word_start.is_none() {
                word_start = Some(i);
            }
            if ch == '"' || ch == '\'' {
                quote = Some(ch);
            }
        }

        let partial = word_start.map_or("", |start| &text[start..]);
        let prefix = &text[..text.len() - partial.len()];

        Self {
            tokens,
            prefix,
            partial,
            in_string: quote.is_some(),
        }
    }

    /// Completed tokens before the partial word
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Everything before the partial word, separators and whitespace included
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// The word under the cursor, possibly empty
    pub fn partial(&self) -> &'a str {
        self.partial
    }

    /// The token immediately preceding the partial word
    pub fn discriminator(&self) -> Option<Token<'a>> {
        self.tokens.last().copied()
    }

    /// Whether the cursor sits inside an unterminated string literal
    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// Byte offset where the partial word starts
    pub fn completion_start(&self) -> usize {
        self.prefix.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let line = CommandLine::parse("");
        assert!(line.tokens().is_empty());
        assert_eq!(line.prefix(), "");
        assert_eq!(line.partial(), "");
        assert_eq!(line.discriminator(), None);
    }

    #[test]
    fn test_partial_only() {
        let line = CommandLine::parse("ge");
        assert!(line.tokens().is_empty());
        assert_eq!(line.prefix(), "");
        assert_eq!(line.partial(), "ge");
        assert_eq!(line.completion_start(), 0);
    }

    #[test]
    fn test_trailing_space_leaves_empty_partial() {
        let line = CommandLine::parse("get ");
        assert_eq!(line.tokens(), &[Token::Word("get")]);
        assert_eq!(line.prefix(), "get ");
        assert_eq!(line.partial(), "");
        assert_eq!(line.completion_start(), 4);
    }

    #[test]
    fn test_repeated_whitespace_collapses() {
        let line = CommandLine::parse("get   \t rec");
        assert_eq!(line.tokens(), &[Token::Word("get")]);
        assert_eq!(line.partial(), "rec");
        assert_eq!(line.prefix(), "get   \t ");
    }

    #[test]
    fn test_whitespace_only_prefix() {
        let line = CommandLine::parse("   ge");
        assert!(line.tokens().is_empty());
        assert_eq!(line.prefix(), "   ");
        assert_eq!(line.partial(), "ge");
        assert_eq!(line.discriminator(), None);
    }

    #[test]
    fn test_separator_with_spaces() {
        let line = CommandLine::parse("get record db.coll | fi");
        assert_eq!(
            line.tokens(),
            &[
                Token::Word("get"),
                Token::Word("record"),
                Token::Word("db.coll"),
                Token::Separator
            ]
        );
        assert_eq!(line.discriminator(), Some(Token::Separator));
        assert_eq!(line.partial(), "fi");
    }

    #[test]
    fn test_separator_without_spaces() {
        let line = CommandLine::parse("get record db.coll|fi");
        assert_eq!(line.discriminator(), Some(Token::Separator));
        assert_eq!(line.partial(), "fi");
        assert_eq!(line.completion_start(), 19);
    }

    #[test]
    fn test_quoted_string_is_one_token() {
        let line = CommandLine::parse(r#"filter "name == a | b" "#);
        assert_eq!(
            line.tokens(),
            &[Token::Word("filter"), Token::Word(r#""name == a | b""#)]
        );
        assert!(!line.in_string());
    }

    #[test]
    fn test_unterminated_string() {
        let line = CommandLine::parse(r#"filter "name =="#);
        assert!(line.in_string());
        assert_eq!(line.partial(), r#""name =="#);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let line = CommandLine::parse(r#"post record "a\"b" "#);
        assert_eq!(line.tokens().len(), 3);
        assert!(!line.in_string());
    }

    #[test]
    fn test_multibyte_partial() {
        let line = CommandLine::parse("get ré");
        assert_eq!(line.partial(), "ré");
        assert_eq!(line.completion_start(), 4);
    }
}
