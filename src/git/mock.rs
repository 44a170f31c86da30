use crate::error::{InstallError, Result};
use crate::git::Repository;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Records every mutating call so tests can assert on operation order, and
/// can be scripted to fail the checkout of specific refs.
pub struct MockRepository {
    tags: Vec<String>,
    head_ref: String,
    failing_checkouts: HashSet<String>,
    operations: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new mock repository with HEAD on `main`
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            head_ref: "main".to_string(),
            failing_checkouts: HashSet::new(),
            operations: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag to the repository
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Set the ref HEAD currently points at
    pub fn set_head(&mut self, refname: impl Into<String>) {
        self.head_ref = refname.into();
    }

    /// Make every subsequent checkout of `refname` fail
    pub fn fail_checkout_of(&mut self, refname: impl Into<String>) {
        self.failing_checkouts.insert(refname.into());
    }

    /// Snapshot of the operations performed so far, in order
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, operation: String) {
        self.operations.lock().unwrap().push(operation);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn current_ref(&self) -> Result<String> {
        Ok(self.head_ref.clone())
    }

    fn discard_changes(&self) -> Result<()> {
        self.record("discard".to_string());
        Ok(())
    }

    fn checkout(&self, refname: &str) -> Result<()> {
        self.record(format!("checkout {}", refname));

        if self.failing_checkouts.contains(refname) {
            return Err(InstallError::repo(format!(
                "Cannot resolve ref '{}'",
                refname
            )));
        }

        Ok(())
    }

    fn pull(&self, remote: &str) -> Result<()> {
        self.record(format!("pull {}", remote));
        Ok(())
    }
}
