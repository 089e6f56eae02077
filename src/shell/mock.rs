//! Scripted command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without touching the host. Each
//! rule matches a substring of the rendered command line; the first matching
//! rule decides the outcome, otherwise the default applies. Every call is
//! recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use rigup::shell::{CommandRunner, CommandSpec, MockOutcome, MockRunner};
//!
//! let runner = MockRunner::new().on("apt-get update", MockOutcome::Fail(100));
//!
//! let result = runner.run(&CommandSpec::new("apt-get").arg("update")).unwrap();
//! assert!(!result.success);
//! assert!(runner.was_called("apt-get update"));
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{RigupError, Result};

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// What a scripted command does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Exit 0 with the given stdout.
    Success(String),
    /// Exit with the given non-zero code.
    Fail(i32),
    /// Hit the time ceiling.
    Timeout,
    /// Program could not be started.
    NotFound,
}

/// Command runner that replays scripted outcomes.
#[derive(Debug)]
pub struct MockRunner {
    rules: Vec<(String, MockOutcome)>,
    default: MockOutcome,
    calls: RefCell<Vec<String>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// A runner where every command succeeds with empty output.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: MockOutcome::Success(String::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Change the outcome for commands no rule matches.
    pub fn with_default(mut self, outcome: MockOutcome) -> Self {
        self.default = outcome;
        self
    }

    /// Script the outcome for commands whose line contains `pattern`.
    pub fn on(mut self, pattern: &str, outcome: MockOutcome) -> Self {
        self.rules.push((pattern.to_string(), outcome));
        self
    }

    /// All command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded command line contains `pattern`.
    pub fn was_called(&self, pattern: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.contains(pattern))
    }

    /// Position of the first call containing `pattern`.
    pub fn call_index(&self, pattern: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c.contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let line = spec.display();
        self.calls.borrow_mut().push(line.clone());

        let outcome = self
            .rules
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, outcome)| outcome)
            .unwrap_or(&self.default);

        match outcome {
            MockOutcome::Success(stdout) => Ok(CommandResult::success(
                stdout.clone(),
                String::new(),
                Duration::ZERO,
            )),
            MockOutcome::Fail(code) => Ok(CommandResult::failure(
                Some(*code),
                String::new(),
                format!("scripted failure {}", code),
                Duration::ZERO,
            )),
            MockOutcome::Timeout => Err(RigupError::CommandTimedOut {
                command: line,
                secs: spec.timeout.map(|t| t.as_secs()).unwrap_or(0),
            }),
            MockOutcome::NotFound => Err(RigupError::CommandFailed {
                command: line,
                code: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_outcome_is_success() {
        let runner = MockRunner::new();
        let result = runner.run(&CommandSpec::new("true")).unwrap();
        assert!(result.success);
    }

    #[test]
    fn first_matching_rule_wins() {
        let runner = MockRunner::new()
            .on("git clone", MockOutcome::Timeout)
            .on("git", MockOutcome::Fail(1));

        let clone = runner.run(&CommandSpec::new("git").arg("clone"));
        assert!(matches!(clone, Err(RigupError::CommandTimedOut { .. })));

        let status = runner.run(&CommandSpec::new("git").arg("status")).unwrap();
        assert_eq!(status.exit_code, Some(1));
    }

    #[test]
    fn records_calls_in_order() {
        let runner = MockRunner::new();
        runner.run(&CommandSpec::new("a")).unwrap();
        runner.run(&CommandSpec::new("b").arg("x")).unwrap();

        assert_eq!(runner.calls(), vec!["a", "b x"]);
        assert_eq!(runner.call_index("b x"), Some(1));
    }

    #[test]
    fn not_found_is_command_failed() {
        let runner = MockRunner::new().with_default(MockOutcome::NotFound);
        let err = runner.run(&CommandSpec::new("zsh")).unwrap_err();
        assert!(matches!(err, RigupError::CommandFailed { code: None, .. }));
    }
}
