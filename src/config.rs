use crate::domain::TagPrefix;
use crate::error::{RtagError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "rtag.toml";

/// Represents the complete configuration for rtag.
///
/// Contains tag naming settings and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for naming and publishing tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Prefix for new tags; derived from the previous tag when absent
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl TagConfig {
    pub fn prefix_policy(&self) -> TagPrefix {
        TagPrefix::from(self.prefix.clone())
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            prefix: None,
            remote: default_remote(),
        }
    }
}

/// When styled (underlined/dimmed) output is used
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrettyMode {
    /// Style output only when stdout is a capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl PrettyMode {
    /// Decide given whether the terminal supports styling
    pub fn enabled(&self, terminal_supports_styling: bool) -> bool {
        match self {
            PrettyMode::Auto => terminal_supports_styling,
            PrettyMode::Always => true,
            PrettyMode::Never => false,
        }
    }
}

/// Configuration for behavior customization.
///
/// Controls the interactive workflow without affecting version computation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Allow tagging a working tree with uncommitted changes
    #[serde(default)]
    pub allow_dirty: bool,

    /// Answer every yes/no question with yes
    #[serde(default)]
    pub assume_yes: bool,

    #[serde(default)]
    pub pretty: PrettyMode,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `rtag.toml` in current directory
/// 3. `.rtag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => {
                tracing::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        RtagError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| RtagError::config(format!("cannot parse '{}': {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn find_config_file() -> Option<std::path::PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}
