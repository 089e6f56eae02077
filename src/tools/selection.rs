//! Menu input parsing.
//!
//! Input is a single line of space-separated menu numbers. It is checked
//! against an allow-list pattern before any number is interpreted, then
//! de-duplicated and sorted so `"2 1 2"` and `"1 2"` select the same tools.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RigupError, Result};

use super::catalog::Tool;

/// Token that selects every tool.
pub const ALL_TOKEN: u8 = 10;

/// Token that leaves the menu without installing anything.
pub const QUIT_TOKEN: u8 = 0;

static ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2}( +[0-9]{1,2})*$").expect("ALLOWED must compile")
});

/// A parsed menu answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Install these tools, ascending and unique.
    Tools(Vec<Tool>),
    /// Leave without installing.
    Quit,
}

/// Parse one line of menu input.
pub fn parse_selection(input: &str) -> Result<Selection> {
    let trimmed = input.trim();
    let invalid = |message: &str| RigupError::InvalidSelection {
        input: trimmed.to_string(),
        message: message.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("no tools selected"));
    }
    if trimmed.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }
    if !ALLOWED.is_match(trimmed) {
        return Err(invalid("expected space-separated menu numbers"));
    }

    let mut numbers = BTreeSet::new();
    for token in trimmed.split_whitespace() {
        let n: u8 = token
            .parse()
            .map_err(|_| invalid("expected space-separated menu numbers"))?;
        numbers.insert(n);
    }

    if numbers.contains(&QUIT_TOKEN) {
        return if numbers.len() == 1 {
            Ok(Selection::Quit)
        } else {
            Err(invalid("0 quits and cannot be combined with other choices"))
        };
    }

    if numbers.contains(&ALL_TOKEN) {
        return Ok(Selection::Tools(Tool::ALL.to_vec()));
    }

    let mut tools = Vec::with_capacity(numbers.len());
    for n in numbers {
        match Tool::from_number(n) {
            Some(tool) => tools.push(tool),
            None => {
                return Err(invalid(&format!(
                    "{} is not on the menu (choose 1-{})",
                    n, ALL_TOKEN
                )))
            }
        }
    }
    Ok(Selection::Tools(tools))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools(input: &str) -> Vec<Tool> {
        match parse_selection(input).unwrap() {
            Selection::Tools(t) => t,
            Selection::Quit => panic!("unexpected quit for {:?}", input),
        }
    }

    #[test]
    fn duplicates_and_order_do_not_matter() {
        assert_eq!(tools("2 1 2"), tools("1 2"));
        assert_eq!(tools("2 1 2"), vec![Tool::Docker, Tool::Nginx]);
    }

    #[test]
    fn all_token_expands_in_menu_order() {
        assert_eq!(tools("10"), Tool::ALL.to_vec());
        assert_eq!(tools("3 10"), Tool::ALL.to_vec());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(tools("  9   8 "), vec![Tool::Neovim, Tool::Tmux]);
    }

    #[test]
    fn quit_tokens() {
        assert_eq!(parse_selection("0").unwrap(), Selection::Quit);
        assert_eq!(parse_selection("q").unwrap(), Selection::Quit);
        assert_eq!(parse_selection("Q").unwrap(), Selection::Quit);
    }

    #[test]
    fn quit_cannot_be_mixed() {
        assert!(parse_selection("0 1").is_err());
        assert!(parse_selection("q 1").is_err());
    }

    #[test]
    fn rejects_non_numeric_input() {
        for input in ["abc", "1,2", "1;rm -rf /", "-1", "1.5", "", "   "] {
            let err = parse_selection(input).unwrap_err();
            assert!(
                matches!(err, RigupError::InvalidSelection { .. }),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_selection("11").is_err());
        assert!(parse_selection("1 99").is_err());
        assert!(parse_selection("123").is_err());
    }
}
