use crate::build::CommandRunner;
use crate::config::BuildConfig;
use crate::error::{InstallError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Steps a release goes through, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Reset,
    Checkout,
    Configure,
    Clean,
    Make,
    Install,
}

impl BuildPhase {
    /// Get the phase name as a string
    pub fn name(&self) -> &'static str {
        match self {
            BuildPhase::Reset => "reset",
            BuildPhase::Checkout => "checkout",
            BuildPhase::Configure => "configure",
            BuildPhase::Clean => "clean",
            BuildPhase::Make => "make",
            BuildPhase::Install => "altinstall",
        }
    }
}

/// A failed step together with the phase it happened in
#[derive(Debug)]
pub struct BuildFailure {
    pub phase: BuildPhase,
    pub error: InstallError,
}

/// Builds whatever release is currently checked out in the worktree
///
/// The driver owns the git side (reset and checkout); implementations of
/// this trait own everything from `configure` onwards. [`MockBuilder`]
/// stands in for tests.
///
/// [`MockBuilder`]: crate::build::MockBuilder
pub trait ReleaseBuilder: Send + Sync {
    /// Run the full build for the checked-out release
    ///
    /// `tag` is only used for reporting; the source is read from the
    /// worktree as-is.
    fn build(&self, tag: &str) -> Result<(), BuildFailure>;
}

/// The real pipeline: `configure`, `make clean`, `make`, `make altinstall`
///
/// `altinstall` is the whole point: it skips the `python3` symlink so
/// installing many minor versions side by side never clobbers the system
/// interpreter.
pub struct BuildPipeline {
    repo_dir: PathBuf,
    configure_flags: Vec<String>,
    jobs: Option<u32>,
    runner: CommandRunner,
}

impl BuildPipeline {
    /// Create a pipeline that builds inside `repo_dir`
    pub fn new<P: AsRef<Path>>(repo_dir: P, build: &BuildConfig) -> Self {
        BuildPipeline {
            repo_dir: repo_dir.as_ref().to_path_buf(),
            configure_flags: build.configure_flags.clone(),
            jobs: build.jobs,
            runner: CommandRunner::in_dir(repo_dir.as_ref()),
        }
    }

    fn make_args(&self) -> Vec<String> {
        match self.jobs {
            Some(jobs) => vec![format!("-j{}", jobs)],
            None => Vec::new(),
        }
    }

    fn step(&self, phase: BuildPhase, program: &str, args: &[&str]) -> Result<(), BuildFailure> {
        info!("Phase {}: {} {}", phase.name(), program, args.join(" "));

        self.runner
            .run(program, args)
            .map_err(|error| BuildFailure { phase, error })
    }
}

impl ReleaseBuilder for BuildPipeline {
    fn build(&self, tag: &str) -> Result<(), BuildFailure> {
        info!("Building {} in {}", tag, self.repo_dir.display());

        // Invoke the script by absolute path; Command does not resolve a
        // bare "./configure" against current_dir on every platform.
        let configure = self.repo_dir.join("configure");
        let configure_str = configure.to_string_lossy();
        let flag_refs: Vec<&str> = self.configure_flags.iter().map(|s| s.as_str()).collect();
        self.step(BuildPhase::Configure, &configure_str, &flag_refs)?;

        self.step(BuildPhase::Clean, "make", &["clean"])?;

        let make_args = self.make_args();
        let make_refs: Vec<&str> = make_args.iter().map(|s| s.as_str()).collect();
        self.step(BuildPhase::Make, "make", &make_refs)?;

        self.step(BuildPhase::Install, "make", &["altinstall"])?;

        Ok(())
    }
}
