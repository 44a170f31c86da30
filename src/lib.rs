pub mod build;
pub mod config;
pub mod distro;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use error::{InstallError, Result};
