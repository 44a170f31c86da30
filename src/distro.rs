//! Distro detection and build dependency installation
//!
//! CPython needs a long list of system packages before `configure` gets
//! anywhere. We read `/etc/os-release` to decide whether this machine is
//! apt-based or yum-based and install the packages accordingly. Anything
//! else is a hard error: guessing a package manager wastes an hour of
//! compile time before failing anyway.

use crate::build::CommandRunner;
use crate::error::{InstallError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Families of Linux distributions the installer knows how to provision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroFamily {
    Debian,
    RedHat,
}

impl DistroFamily {
    /// Get the family name as a string
    pub fn name(&self) -> &'static str {
        match self {
            DistroFamily::Debian => "debian",
            DistroFamily::RedHat => "redhat",
        }
    }
}

/// Detect the distro family of the running system
pub fn detect() -> Result<DistroFamily> {
    detect_from_file(Path::new("/etc/os-release"))
}

/// Detect the distro family from an os-release file
///
/// Both `ID` and `ID_LIKE` are consulted, so derivatives that only name
/// their ancestry (e.g. `ID=centos` with `ID_LIKE="rhel fedora"`) and base
/// distros with no `ID_LIKE` at all (e.g. `ID=debian`) both resolve.
pub fn detect_from_file(path: &Path) -> Result<DistroFamily> {
    let contents = fs::read_to_string(path)
        .map_err(|e| InstallError::distro(format!("Cannot read {}: {}", path.display(), e)))?;

    // Values may be bare (ID=ubuntu) or quoted (ID_LIKE="rhel fedora")
    let field_re = Regex::new(r#"(?m)^(ID|ID_LIKE)="?([^"\n]*)"?\s*$"#)
        .map_err(|e| InstallError::distro(format!("Invalid os-release pattern: {}", e)))?;

    let mut tokens = Vec::new();
    for caps in field_re.captures_iter(&contents) {
        for token in caps[2].split_whitespace() {
            tokens.push(token.to_lowercase());
        }
    }

    if tokens.is_empty() {
        return Err(InstallError::distro(format!(
            "No ID or ID_LIKE fields in {}",
            path.display()
        )));
    }

    debug!("os-release tokens: {}", tokens.join(" "));

    classify(&tokens).ok_or_else(|| {
        InstallError::distro(format!(
            "Unsupported distro (ID/ID_LIKE tokens: {})",
            tokens.join(" ")
        ))
    })
}

fn classify(tokens: &[String]) -> Option<DistroFamily> {
    for token in tokens {
        match token.as_str() {
            "debian" | "ubuntu" => return Some(DistroFamily::Debian),
            "rhel" | "fedora" | "centos" => return Some(DistroFamily::RedHat),
            _ => {}
        }
    }

    None
}

/// Install the system packages CPython needs to build from source
///
/// Runs the distro's build-dep machinery for its own python3 package plus
/// the extra dev libraries the optional stdlib modules link against.
/// Requires root.
pub fn install_build_dependencies(family: DistroFamily, runner: &CommandRunner) -> Result<()> {
    info!("Installing build dependencies for {} family", family.name());

    match family {
        DistroFamily::Debian => {
            runner.run("apt", &["update"])?;
            runner.run("apt", &["build-dep", "-y", "python3"])?;
            runner.run(
                "apt",
                &[
                    "install",
                    "-y",
                    "build-essential",
                    "gdb",
                    "lcov",
                    "libbz2-dev",
                    "libffi-dev",
                    "libgdbm-dev",
                    "liblzma-dev",
                    "libncurses5-dev",
                    "libreadline6-dev",
                    "libsqlite3-dev",
                    "libssl-dev",
                    "lzma",
                    "lzma-dev",
                    "tk-dev",
                    "uuid-dev",
                    "zlib1g-dev",
                ],
            )?;
        }
        DistroFamily::RedHat => {
            runner.run("yum", &["install", "-y", "yum-utils"])?;
            runner.run("yum-builddep", &["-y", "python3"])?;
        }
    }

    Ok(())
}
