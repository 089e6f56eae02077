//! Desired-versus-present computation.

use std::collections::HashSet;

use crate::install::{Installable, InstallerContext};

/// Result of reconciling a desired list against the host.
pub struct Reconciliation<'i> {
    /// Items already on the host, in input order.
    pub present: Vec<&'i dyn Installable>,
    /// Items to install, in input order.
    pub missing: Vec<&'i dyn Installable>,
}

impl Reconciliation<'_> {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Names of the missing items.
    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(|i| i.name()).collect()
    }
}

/// Computes the ordered subset of desired items not yet present.
///
/// Items confirmed present are cached by name for the life of the
/// reconciler, so a second pass never re-queries them.
#[derive(Debug, Default)]
pub struct Reconciler {
    confirmed: HashSet<String>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `items` into present and missing, keeping their order.
    pub fn reconcile<'i>(
        &mut self,
        items: &[&'i dyn Installable],
        ictx: &InstallerContext<'_>,
    ) -> Reconciliation<'i> {
        let mut present = Vec::new();
        let mut missing = Vec::new();

        for &item in items {
            if self.is_present(item, ictx) {
                present.push(item);
            } else {
                missing.push(item);
            }
        }

        tracing::debug!(
            "reconciled {} items: {} present, {} missing",
            items.len(),
            present.len(),
            missing.len()
        );
        Reconciliation { present, missing }
    }

    /// Cached presence check for one item.
    pub fn is_present(&mut self, item: &dyn Installable, ictx: &InstallerContext<'_>) -> bool {
        if self.confirmed.contains(item.name()) {
            return true;
        }
        let found = item.is_present(ictx);
        if found {
            self.confirmed.insert(item.name().to_string());
        }
        found
    }

    /// Record an item as present after installing it.
    pub fn mark_present(&mut self, name: &str) {
        self.confirmed.insert(name.to_string());
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.confirmed.contains(name)
    }
}
