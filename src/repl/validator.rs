//! Validator for reedline - keeps multi-line JSON payloads open until balanced

use reedline::{ValidationResult, Validator};

/// Treats a line as incomplete while a string or any bracket pair is open
pub struct ShellValidator;

impl ShellValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check if input has balanced braces and brackets outside of strings
    ///
    /// Strings open on `"` or `'` and close only on the same quote, matching
    /// how the completion tokenizer reads the line.
    fn is_balanced(&self, input: &str) -> bool {
        let mut brace_count = 0i32;
        let mut bracket_count = 0i32;
        let mut paren_count = 0i32;
        let mut quote: Option<char> = None;
        let mut escape_next = false;

        for ch in input.chars() {
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

            match ch {
                '"' | '\'' => quote = Some(ch),
                '{' => brace_count += 1,
                '}' => brace_count -= 1,
                '[' => bracket_count += 1,
                ']' => bracket_count -= 1,
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                _ => {}
            }
        }

        // Stray closers are left for the server to reject
        quote.is_none() && brace_count <= 0 && bracket_count <= 0 && paren_count <= 0
    }
}

impl Default for ShellValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ShellValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        if trimmed.is_empty() || self.is_balanced(trimmed) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}
