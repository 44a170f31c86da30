use crate::error::{InstallError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs external commands and captures their output
///
/// Every build step and dependency install goes through here, so a failing
/// command surfaces with its exit code and full stdout/stderr attached.
pub struct CommandRunner {
    working_dir: Option<PathBuf>,
}

impl CommandRunner {
    /// Runner that executes commands in the process working directory
    pub fn system() -> Self {
        CommandRunner { working_dir: None }
    }

    /// Runner that executes every command inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        CommandRunner {
            working_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Execute a command and wait for it to finish
    ///
    /// # Returns
    /// * `Ok(())` if the command exits with code 0
    /// * `Err` if the program cannot be spawned or exits non-zero
    pub fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!("Running: {} {}", program, args.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| InstallError::command(format!("Failed to execute {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(InstallError::command(format!(
                "{} failed with exit code {}\nStdout: {}\nStderr: {}",
                program,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        let runner = CommandRunner::system();
        assert!(runner.run("true", &[]).is_ok());
    }

    #[test]
    fn test_run_nonzero_exit() {
        let runner = CommandRunner::system();
        let result = runner.run("false", &[]);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exit code"));
    }

    #[test]
    fn test_run_missing_program() {
        let runner = CommandRunner::system();
        let result = runner.run("definitely-not-a-real-program-xyz", &[]);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to execute"));
    }

    #[test]
    fn test_run_captures_output_on_failure() {
        let runner = CommandRunner::system();
        let result = runner.run("sh", &["-c", "echo progress; echo oops >&2; exit 3"]);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("exit code 3"));
        assert!(message.contains("progress"));
        assert!(message.contains("oops"));
    }

    #[test]
    fn test_run_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::in_dir(dir.path());

        runner.run("sh", &["-c", "touch created_here"]).unwrap();

        assert!(dir.path().join("created_here").exists());
    }
}
