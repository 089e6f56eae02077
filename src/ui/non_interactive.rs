//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{RigupError, Result};
use crate::provision::RunReport;

use super::{
    summary_lines, OutputMode, Prompt, RigupTheme, SpinnerHandle, StatusKind, UserInterface,
};

/// UI implementation for non-interactive mode.
///
/// Lines are plain text. Prompts are answered from `RIGUP_PROMPT_<KEY>`
/// environment variables, then from the prompt default; a prompt with
/// neither fails with [`RigupError::PromptUnavailable`].
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("RIGUP_PROMPT_"))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", StatusKind::Success.format_plain(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Warning.format_plain(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n== {} ==", title);
        }
    }

    fn detail(&mut self, line: &str) {
        println!("    {}", line);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        self.env_overrides
            .get(&prompt.env_key())
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| RigupError::PromptUnavailable {
                key: prompt.key.clone(),
            })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("{}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_summary(&mut self, report: &RunReport) {
        for line in summary_lines(report, &RigupTheme::plain(), true) {
            println!("{}", line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints the final line only.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", StatusKind::Success.format_plain(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }
}
