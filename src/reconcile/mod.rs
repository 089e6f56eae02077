//! Which desired items are missing from this host.

pub mod presence;
pub mod reconciler;

pub use presence::{any_present, Presence};
pub use reconciler::{Reconciler, Reconciliation};
