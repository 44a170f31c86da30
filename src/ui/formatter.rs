//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user
//! interaction. Styling goes through `console` so colors degrade cleanly
//! when stdout is not a terminal.

use crate::build::{RunReport, TagOutcome};
use crate::domain::ReleaseTag;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning without failing the run.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Display the releases picked for installation, in build order.
pub fn display_selected_releases(releases: &[ReleaseTag]) {
    println!("\n{}", style("Releases to install:").bold());

    for (i, release) in releases.iter().enumerate() {
        let line = format!("{}.{}", release.version.major, release.version.minor);
        println!(
            "  {}. {} {}",
            i + 1,
            release.tag,
            style(format!("(latest {} release)", line)).dim()
        );
    }
}

/// Display the outcome of a whole run, one line per release.
///
/// Failure lines carry the phase and the first line of the error; the full
/// command output is available in the logs.
pub fn display_run_summary(report: &RunReport) {
    println!("\n{}", style("Install summary:").bold());

    for tag_report in &report.reports {
        match &tag_report.outcome {
            TagOutcome::Installed => {
                println!("  {} {}", style("✓").green(), tag_report.tag);
            }
            TagOutcome::Failed { phase, message } => {
                println!(
                    "  {} {} {}",
                    style("✗").red(),
                    tag_report.tag,
                    style(format!("(failed during {})", phase.name())).dim()
                );
                if let Some(first_line) = message.lines().next() {
                    println!("      {}", style(first_line).dim());
                }
            }
        }
    }

    println!(
        "\n{} installed, {} failed",
        report.installed(),
        report.failed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildPhase, TagReport};
    use semver::Version;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }

    #[test]
    fn test_display_selected_releases() {
        let releases = vec![ReleaseTag {
            tag: "v3.12.1".to_string(),
            version: Version::parse("3.12.1").unwrap(),
        }];

        display_selected_releases(&releases);
    }

    #[test]
    fn test_display_run_summary_with_failure() {
        let mut report = RunReport::new();
        report.record(TagReport {
            tag: "v3.12.1".to_string(),
            version: Version::parse("3.12.1").unwrap(),
            outcome: TagOutcome::Installed,
        });
        report.record(TagReport {
            tag: "v3.11.9".to_string(),
            version: Version::parse("3.11.9").unwrap(),
            outcome: TagOutcome::Failed {
                phase: BuildPhase::Make,
                message: "make failed with exit code 2\nStdout: ...".to_string(),
            },
        });

        display_run_summary(&report);
    }
}
