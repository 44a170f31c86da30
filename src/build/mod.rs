//! Build and install pipeline for CPython releases
//!
//! The driver walks the selected releases one by one: reset the worktree,
//! check out the tag, then hand off to a [`ReleaseBuilder`] for the
//! configure/make/altinstall steps. A failing release is recorded and the
//! run moves on; the repository is restored to its starting ref at the end.

mod command;
mod driver;
mod mock;
mod pipeline;
mod report;

pub use command::CommandRunner;
pub use driver::BuildDriver;
pub use mock::MockBuilder;
pub use pipeline::{BuildFailure, BuildPhase, BuildPipeline, ReleaseBuilder};
pub use report::{RunReport, TagOutcome, TagReport};
