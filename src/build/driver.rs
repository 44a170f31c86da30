use crate::build::{BuildFailure, BuildPhase, ReleaseBuilder, RunReport, TagOutcome, TagReport};
use crate::domain::ReleaseTag;
use crate::error::Result;
use crate::git::Repository;
use crate::ui;
use tracing::{info, warn};

/// Walks the selected releases and builds them one by one
///
/// A failing release is recorded in the report and never aborts the run.
/// Whatever happened, the repository is restored to the ref it started on
/// before `run` returns; only a failed restore is a hard error.
pub struct BuildDriver<'a, R: Repository, B: ReleaseBuilder> {
    repo: &'a R,
    builder: &'a B,
}

impl<'a, R: Repository, B: ReleaseBuilder> BuildDriver<'a, R, B> {
    pub fn new(repo: &'a R, builder: &'a B) -> Self {
        BuildDriver { repo, builder }
    }

    /// Build and install every release, then restore the starting ref
    pub fn run(&self, releases: &[ReleaseTag]) -> Result<RunReport> {
        let mut report = RunReport::new();

        if releases.is_empty() {
            return Ok(report);
        }

        let initial_ref = self.repo.current_ref()?;
        info!("Repository starts on '{}'", initial_ref);

        for release in releases {
            ui::display_status(&format!("Installing {}", release.tag));

            let outcome = match self.install_one(release) {
                Ok(()) => {
                    ui::display_success(&format!("{} installed", release.tag));
                    TagOutcome::Installed
                }
                Err(failure) => {
                    warn!(
                        "{} failed during {}: {}",
                        release.tag,
                        failure.phase.name(),
                        failure.error
                    );
                    ui::display_warning(&format!(
                        "{} failed during {}, continuing with the next release",
                        release.tag,
                        failure.phase.name()
                    ));
                    TagOutcome::Failed {
                        phase: failure.phase,
                        message: failure.error.to_string(),
                    }
                }
            };

            report.record(TagReport {
                tag: release.tag.clone(),
                version: release.version.clone(),
                outcome,
            });
        }

        if let Err(error) = self.restore(&initial_ref) {
            // Outcomes still get reported; the restore failure surfaces on top
            ui::display_run_summary(&report);
            return Err(error);
        }

        Ok(report)
    }

    fn install_one(&self, release: &ReleaseTag) -> Result<(), BuildFailure> {
        self.repo.discard_changes().map_err(|error| BuildFailure {
            phase: BuildPhase::Reset,
            error,
        })?;

        self.repo.checkout(&release.tag).map_err(|error| BuildFailure {
            phase: BuildPhase::Checkout,
            error,
        })?;

        self.builder.build(&release.tag)
    }

    /// Put the repository back where the user left it
    ///
    /// Builds litter the worktree with generated files, so discard first or
    /// the checkout may refuse to move.
    fn restore(&self, initial_ref: &str) -> Result<()> {
        self.repo.discard_changes()?;
        self.repo.checkout(initial_ref)?;

        info!("Restored repository to '{}'", initial_ref);
        Ok(())
    }
}
