//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{RigupError, Result};

use super::Prompt;

fn map_dialoguer_err(e: dialoguer::Error) -> RigupError {
    RigupError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask for a line of text on `term`.
///
/// Validation happens in the caller so invalid answers can be reported
/// and re-prompted with the caller's own wording.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    match &prompt.default {
        Some(default) => input
            .default(default.clone())
            .interact_text_on(term)
            .map_err(map_dialoguer_err),
        None => input.interact_text_on(term).map_err(map_dialoguer_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_become_io() {
        let err = map_dialoguer_err(dialoguer::Error::IO(std::io::Error::other("closed")));
        assert!(matches!(err, RigupError::Io(_)));
    }
}
