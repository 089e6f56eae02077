//! The numbered tool menu.

use crate::error::{RigupError, Result};
use crate::ui::{Prompt, UserInterface};

use super::catalog::Tool;
use super::selection::{parse_selection, Selection, ALL_TOKEN, QUIT_TOKEN};

/// Prompt key; `RIGUP_PROMPT_SELECTION` answers the menu headlessly.
pub const SELECTION_KEY: &str = "selection";

/// Menu lines, one per tool plus the all and quit tokens.
pub fn menu_lines() -> Vec<String> {
    let mut lines: Vec<String> = Tool::ALL
        .iter()
        .map(|t| format!("{:>2}) {:<12} {}", t.number(), t.label(), t.description()))
        .collect();
    lines.push(format!("{:>2}) all", ALL_TOKEN));
    lines.push(format!("{:>2}) quit", QUIT_TOKEN));
    lines
}

/// Ask which tools to install.
///
/// `preset` (from `--select`) skips the prompt but goes through the same
/// validation; an invalid preset is an error rather than a re-prompt.
/// Invalid interactive input is reported and asked again. A non-interactive
/// UI gets one answer, so invalid input there is also an error.
pub fn choose_tools(ui: &mut dyn UserInterface, preset: Option<&str>) -> Result<Selection> {
    if let Some(input) = preset {
        return parse_selection(input);
    }

    ui.show_header("Developer tools");
    for line in menu_lines() {
        ui.detail(&line);
    }

    let prompt = Prompt::input(
        SELECTION_KEY,
        &format!("Tools to install (space-separated, {} = all, {} = quit)", ALL_TOKEN, QUIT_TOKEN),
    )
    .with_default(&ALL_TOKEN.to_string());

    loop {
        let answer = ui.prompt(&prompt)?;
        match parse_selection(&answer) {
            Ok(selection) => return Ok(selection),
            Err(RigupError::InvalidSelection { input, message }) if ui.is_interactive() => {
                tracing::debug!("rejected menu input {:?}", input);
                ui.warning(&format!("Invalid selection '{}': {}", input, message));
            }
            Err(e) => return Err(e),
        }
    }
}
