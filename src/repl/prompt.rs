//! Prompt shown before every line

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Default prompt text
pub const DEFAULT_PROMPT: &str = ">>> ";

/// Static prompt for the shell
pub struct ShellPrompt {
    text: String,
}

impl ShellPrompt {
    /// Create a prompt rendering `text` verbatim
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for ShellPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// The indicator is part of the configured prompt text
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt() {
        let prompt = ShellPrompt::default();
        assert_eq!(prompt.render_prompt_left(), ">>> ");
    }

    #[test]
    fn test_custom_prompt() {
        let prompt = ShellPrompt::new("ceres> ");
        assert_eq!(prompt.render_prompt_left(), "ceres> ");
    }

    #[test]
    fn test_right_prompt_and_indicator_empty() {
        let prompt = ShellPrompt::default();
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = ShellPrompt::default();
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
