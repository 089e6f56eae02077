//! Sequential installation with per-item failure isolation.
//!
//! Each missing item is installed in order. A failure is logged and
//! recorded, and the next item still runs, unless the item is
//! [`Criticality::Fatal`], in which case the run stops with
//! [`RigupError::FatalStep`].

use std::time::Instant;

use crate::error::{RigupError, Result};
use crate::install::{Criticality, Installable, InstallerContext};
use crate::reconcile::Reconciler;
use crate::ui::UserInterface;

use super::report::{ItemOutcome, RunReport};

/// Summary name of the package index refresh.
pub const INDEX_STEP: &str = "package index";

/// Drives installs and accumulates the run report.
pub struct StepRunner<'u> {
    ui: &'u mut dyn UserInterface,
    reconciler: Reconciler,
    report: RunReport,
}

impl<'u> StepRunner<'u> {
    pub fn new(ui: &'u mut dyn UserInterface) -> Self {
        Self {
            ui,
            reconciler: Reconciler::new(),
            report: RunReport::new(),
        }
    }

    /// The reporter, for lines outside item installs.
    pub fn ui(&mut self) -> &mut dyn UserInterface {
        &mut *self.ui
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn reconciler(&mut self) -> &mut Reconciler {
        &mut self.reconciler
    }

    /// Record a result for something that is not an [`Installable`].
    pub fn record(&mut self, name: &str, outcome: ItemOutcome, detail: Option<String>) {
        self.report.record(name, outcome, None, detail);
    }

    /// Record a fatal failure and build the error that ends the run.
    pub fn abort(&mut self, step: &str, cause: &RigupError) -> RigupError {
        self.ui.error(&format!("{} failed: {}", step, cause));
        self.report
            .record(step, ItemOutcome::Failed, None, Some(cause.to_string()));
        self.report.mark_aborted();
        RigupError::FatalStep {
            step: step.to_string(),
            message: cause.to_string(),
        }
    }

    /// Refresh the package index. Failure is fatal.
    pub fn update_index(&mut self, ictx: &InstallerContext<'_>) -> Result<()> {
        if ictx.run.dry_run {
            self.ui
                .detail(&format!("{} would refresh its package index", ictx.packages.name()));
            self.record(INDEX_STEP, ItemOutcome::Planned, None);
            return Ok(());
        }

        let mut spinner = self
            .ui
            .start_spinner(&format!("Refreshing {} package index", ictx.packages.name()));
        let started = Instant::now();
        match ictx.packages.update_index() {
            Ok(()) => {
                spinner.finish_success("Package index refreshed");
                self.report
                    .record(INDEX_STEP, ItemOutcome::Installed, Some(started.elapsed()), None);
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Package index refresh failed");
                Err(self.abort(INDEX_STEP, &e))
            }
        }
    }

    /// Reconcile `items` and install the missing ones in order.
    ///
    /// Returns `Err` only when a fatal item fails.
    pub fn install_all(
        &mut self,
        items: &[&dyn Installable],
        ictx: &InstallerContext<'_>,
    ) -> Result<()> {
        let plan = self.reconciler.reconcile(items, ictx);

        for item in &plan.present {
            self.ui.success(&format!("{} already present", item.name()));
            self.report
                .record(item.name(), ItemOutcome::AlreadyPresent, None, None);
        }

        for item in plan.missing {
            self.install_one(item, ictx)?;
        }
        Ok(())
    }

    fn install_one(&mut self, item: &dyn Installable, ictx: &InstallerContext<'_>) -> Result<()> {
        let name = item.name().to_string();

        if ictx.run.dry_run {
            let plan = item.plan(ictx);
            self.ui.message(&format!("Would install {}", name));
            self.ui.detail(&plan);
            self.report
                .record(&name, ItemOutcome::Planned, None, Some(plan));
            return Ok(());
        }

        let mut spinner = self.ui.start_spinner(&format!("Installing {}", name));
        let started = Instant::now();

        match item.install(ictx) {
            Ok(()) => {
                spinner.finish_success(&format!("{} installed", name));
                self.reconciler.mark_present(&name);

                let warnings = item.post_install(ictx);
                for warning in &warnings {
                    self.ui.warning(warning);
                }
                let detail = (!warnings.is_empty()).then(|| warnings.join("; "));
                self.report
                    .record(&name, ItemOutcome::Installed, Some(started.elapsed()), detail);
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&format!("{} failed", name));
                tracing::debug!("install of {} failed: {:?}", name, e);

                match item.criticality() {
                    Criticality::Fatal => Err(self.abort(&name, &e)),
                    Criticality::Recoverable => {
                        self.ui.warning(&format!("{}: {} (continuing)", name, e));
                        self.report.record(
                            &name,
                            ItemOutcome::Failed,
                            Some(started.elapsed()),
                            Some(e.to_string()),
                        );
                        Ok(())
                    }
                }
            }
        }
    }

    /// Show the summary and hand back the report.
    pub fn finish(self) -> RunReport {
        self.ui.show_summary(&self.report);
        self.report
    }
}
