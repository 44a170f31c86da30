use crate::build::BuildPhase;
use semver::Version;

/// How a single release's build ended
#[derive(Debug)]
pub enum TagOutcome {
    /// Built and altinstalled successfully
    Installed,
    /// Failed during `phase`; later releases still ran
    Failed { phase: BuildPhase, message: String },
}

/// Outcome of one release's build attempt
#[derive(Debug)]
pub struct TagReport {
    pub tag: String,
    pub version: Version,
    pub outcome: TagOutcome,
}

impl TagReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, TagOutcome::Installed)
    }
}

/// Collected outcomes for a whole run, in build order
#[derive(Debug, Default)]
pub struct RunReport {
    pub reports: Vec<TagReport>,
}

impl RunReport {
    pub fn new() -> Self {
        RunReport {
            reports: Vec::new(),
        }
    }

    pub fn record(&mut self, report: TagReport) {
        self.reports.push(report);
    }

    /// Number of releases that installed cleanly
    pub fn installed(&self) -> usize {
        self.reports.iter().filter(|r| r.succeeded()).count()
    }

    /// Number of releases that failed somewhere in the pipeline
    pub fn failed(&self) -> usize {
        self.reports.len() - self.installed()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
