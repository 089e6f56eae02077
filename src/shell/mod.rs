//! External command execution and host facts.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    run_checked, succeeds, CommandResult, CommandRunner, CommandSpec, SystemRunner,
};
pub use mock::{MockOutcome, MockRunner};
pub use platform::{current_user, home_dir, is_ci, is_elevated, is_listed_shell};
