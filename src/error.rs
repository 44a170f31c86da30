use thiserror::Error;

/// Unified error type for cpython-install operations
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository state error: {0}")]
    Repo(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Distro detection failed: {0}")]
    Distro(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in cpython-install
pub type Result<T, E = InstallError> = std::result::Result<T, E>;

impl InstallError {
    /// Create a repository state error with context
    pub fn repo(msg: impl Into<String>) -> Self {
        InstallError::Repo(msg.into())
    }

    /// Create a remote operation error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        InstallError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        InstallError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        InstallError::Version(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        InstallError::Command(msg.into())
    }

    /// Create a distro error with context
    pub fn distro(msg: impl Into<String>) -> Self {
        InstallError::Distro(msg.into())
    }
}
