//! Terminal line editor wired to the grammar

use reedline::{
    ColumnarMenu, Emacs, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use super::completer::ShellCompleter;
use super::completion::SuggestionEngine;
use super::highlighter::ShellHighlighter;
use super::hinter::ShellHinter;
use super::history::History;
use super::prompt::ShellPrompt;
use super::reader::{LineReader, ReadOutcome};
use super::recall::RecallHistory;
use super::validator::ShellValidator;
use crate::config::Config;
use crate::error::{Result, ShellError};

/// Name of the Tab-triggered completion menu
const COMPLETION_MENU: &str = "completion_menu";

/// Interactive line reader backed by reedline
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Prompt rendered before every line
    prompt: ShellPrompt,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `engine` - Suggestion engine for completion, hints and highlighting
    /// * `history` - Session history the dispatch loop records into; arrow
    ///   keys recall from it
    /// * `config` - Shell configuration (history, display and prompt sections)
    pub fn new(engine: SuggestionEngine, history: History, config: &Config) -> Self {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let highlighter =
            ShellHighlighter::new(engine.clone(), config.display.syntax_highlighting);

        let editor = Reedline::create()
            .with_history(Box::new(Self::build_history(history, config)))
            .with_completer(Box::new(ShellCompleter::new(engine.clone())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_hinter(Box::new(ShellHinter::new(engine)))
            .with_highlighter(Box::new(highlighter))
            .with_validator(Box::new(ShellValidator::new()));

        Self {
            editor,
            prompt: ShellPrompt::new(config.prompt.text.clone()),
        }
    }

    /// Recall over the session history, preceded by earlier sessions when
    /// persistence is configured
    fn build_history(history: History, config: &Config) -> RecallHistory {
        if config.history.persist {
            let path = config.history.file_path.clone();
            debug!(path = %path.display(), "persisting history");
            RecallHistory::with_file(history, path, config.history.max_size)
        } else {
            RecallHistory::in_memory(history)
        }
    }
}

impl LineReader for ReplEngine {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(ReadOutcome::Line(line)),
            Ok(Signal::CtrlC) => Ok(ReadOutcome::Interrupted),
            Ok(Signal::CtrlD) => Ok(ReadOutcome::Eof),
            #[allow(unreachable_patterns)]
            Ok(_) => Ok(ReadOutcome::Interrupted),
            Err(e) => Err(ShellError::Readline(e.to_string())),
        }
    }
}
