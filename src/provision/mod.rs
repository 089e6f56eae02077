//! Run orchestration: context, step execution, reporting, and the two
//! end-to-end flows.

pub mod context;
pub mod pipeline;
pub mod report;
pub mod steps;

pub use context::{RunContext, DEFAULT_NETWORK_TIMEOUT, DEFAULT_PACKAGE_TIMEOUT};
pub use pipeline::{describe_fatal, run_setup, run_tools, SetupOptions, LOGIN_SHELL_STEP, ZSHRC_STEP};
pub use report::{ItemOutcome, ItemResult, RunReport};
pub use steps::{StepRunner, INDEX_STEP};
