//! Per-item outcomes accumulated over a run.

use std::time::{Duration, Instant};

/// What happened to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Already on the host; nothing was run.
    AlreadyPresent,
    /// Installed or applied during this run.
    Installed,
    /// Would be installed (dry run).
    Planned,
    /// Not attempted (user choice or earlier abort).
    Skipped,
    /// Attempted and failed.
    Failed,
}

impl ItemOutcome {
    pub fn label(self) -> &'static str {
        match self {
            ItemOutcome::AlreadyPresent => "already present",
            ItemOutcome::Installed => "installed",
            ItemOutcome::Planned => "planned",
            ItemOutcome::Skipped => "skipped",
            ItemOutcome::Failed => "failed",
        }
    }
}

/// One row of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub name: String,
    pub outcome: ItemOutcome,
    pub duration: Option<Duration>,
    pub detail: Option<String>,
}

/// Ordered record of every item the run touched.
#[derive(Debug, Clone)]
pub struct RunReport {
    items: Vec<ItemResult>,
    started: Instant,
    aborted: bool,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            started: Instant::now(),
            aborted: false,
        }
    }

    /// Append a result.
    pub fn record(
        &mut self,
        name: &str,
        outcome: ItemOutcome,
        duration: Option<Duration>,
        detail: Option<String>,
    ) {
        self.items.push(ItemResult {
            name: name.to_string(),
            outcome,
            duration,
            detail,
        });
    }

    /// Mark that a fatal step stopped the run.
    pub fn mark_aborted(&mut self) {
        self.aborted = true;
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn items(&self) -> &[ItemResult] {
        &self.items
    }

    /// Result for a named item, if recorded.
    pub fn get(&self, name: &str) -> Option<&ItemResult> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn count(&self, outcome: ItemOutcome) -> usize {
        self.items.iter().filter(|i| i.outcome == outcome).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(ItemOutcome::Failed) > 0
    }

    /// Names of failed items, in order.
    pub fn failed_names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.outcome == ItemOutcome::Failed)
            .map(|i| i.name.as_str())
            .collect()
    }

    /// Wall time since the report was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_outcome() {
        let mut report = RunReport::new();
        report.record("zsh", ItemOutcome::AlreadyPresent, None, None);
        report.record("docker", ItemOutcome::Installed, Some(Duration::from_secs(3)), None);
        report.record("nvm", ItemOutcome::Failed, None, Some("timed out".into()));

        assert_eq!(report.count(ItemOutcome::Installed), 1);
        assert!(report.has_failures());
        assert_eq!(report.failed_names(), vec!["nvm"]);
        assert_eq!(report.get("docker").unwrap().duration, Some(Duration::from_secs(3)));
    }

    #[test]
    fn preserves_order() {
        let mut report = RunReport::new();
        for name in ["a", "b", "c"] {
            report.record(name, ItemOutcome::Installed, None, None);
        }
        let names: Vec<_> = report.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn abort_flag() {
        let mut report = RunReport::new();
        assert!(!report.aborted());
        report.mark_aborted();
        assert!(report.aborted());
        assert!(!report.has_failures());
    }
}
