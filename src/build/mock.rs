use crate::build::{BuildFailure, BuildPhase, ReleaseBuilder};
use crate::error::{InstallError, Result};
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock builder for testing the driver without running real builds
pub struct MockBuilder {
    failing_tags: HashSet<String>,
    built: Mutex<Vec<String>>,
}

impl MockBuilder {
    /// Create a builder where every build succeeds
    pub fn new() -> Self {
        MockBuilder {
            failing_tags: HashSet::new(),
            built: Mutex::new(Vec::new()),
        }
    }

    /// Make the build of `tag` fail during the make phase
    pub fn fail_on(&mut self, tag: impl Into<String>) {
        self.failing_tags.insert(tag.into());
    }

    /// Tags built successfully so far, in order
    pub fn built(&self) -> Vec<String> {
        self.built.lock().unwrap().clone()
    }
}

impl Default for MockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseBuilder for MockBuilder {
    fn build(&self, tag: &str) -> Result<(), BuildFailure> {
        if self.failing_tags.contains(tag) {
            return Err(BuildFailure {
                phase: BuildPhase::Make,
                error: InstallError::command(format!("make failed for {}", tag)),
            });
        }

        self.built.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}
