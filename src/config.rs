use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{InstallError, Result};

/// Represents the complete configuration for cpython-install.
///
/// Contains the default version window, build pipeline knobs, and behavior
/// options. Every field has a default so a missing file or empty table is
/// always usable.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub versions: VersionsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default minimum version bound.
fn default_minimum_version() -> String {
    "3.0.0".to_string()
}

/// Default version window, overridable per run from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionsConfig {
    #[serde(default = "default_minimum_version")]
    pub minimum: String,

    #[serde(default)]
    pub maximum: Option<String>,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        VersionsConfig {
            minimum: default_minimum_version(),
            maximum: None,
        }
    }
}

/// Build pipeline configuration.
///
/// `configure_flags` are passed verbatim to `configure` (for example
/// `--enable-optimizations`); `jobs` becomes `make -jN` when set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub configure_flags: Vec<String>,

    #[serde(default)]
    pub jobs: Option<u32>,
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub skip_dependency_install: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `cpython-install.toml` in current directory
/// 3. `~/.config/.cpython-install.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./cpython-install.toml").exists() {
        fs::read_to_string("./cpython-install.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".cpython-install.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| InstallError::config(format!("Invalid config file: {}", e)))?;
    Ok(config)
}
