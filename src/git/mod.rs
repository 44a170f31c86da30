//! Git repository abstraction layer
//!
//! This module defines the [`Repository`] trait that decouples the build
//! driver from libgit2, plus the two implementations:
//!
//! - [`Git2Repository`]: the real implementation backed by `git2`
//! - [`MockRepository`]: an in-memory implementation for testing
//!
//! # Example
//!
//! ```
//! use cpython_install::git::Repository;
//!
//! # fn example<R: Repository>(repo: &R) -> cpython_install::Result<()> {
//! let tags = repo.list_tags()?;
//! for tag in tags {
//!     println!("{}", tag);
//! }
//! # Ok(())
//! # }
//! ```

mod mock;
mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Operations the installer needs from a git repository
///
/// Only the handful of operations the build loop actually performs are
/// exposed here, so tests can swap in [`MockRepository`] and script
/// failures without touching a real repository on disk.
pub trait Repository: Send + Sync {
    /// List every tag name in the repository
    ///
    /// Tag names are returned as plain labels (e.g. `v3.12.1`) in the
    /// order libgit2 yields them. Callers impose their own ordering.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Resolve the ref the worktree currently points at
    ///
    /// Returns the branch shorthand (e.g. `main`) when HEAD is on a
    /// branch, or the full commit id when HEAD is detached. The value is
    /// suitable for passing back to [`checkout`](Repository::checkout)
    /// to restore the repository later.
    fn current_ref(&self) -> Result<String>;

    /// Discard every local modification, staged or not, including
    /// untracked files
    ///
    /// Equivalent to `git add -A && git reset --hard`. The worktree ends
    /// up byte-identical to HEAD.
    fn discard_changes(&self) -> Result<()>;

    /// Check out a tag, branch or commit
    ///
    /// Branch names move HEAD symbolically so the repository stays on
    /// the branch; tags and raw commits leave HEAD detached.
    fn checkout(&self, refname: &str) -> Result<()>;

    /// Fetch from the named remote and fast-forward the current branch
    ///
    /// Fails when HEAD is detached. A branch that has diverged from its
    /// remote counterpart is left untouched.
    fn pull(&self, remote: &str) -> Result<()>;
}
