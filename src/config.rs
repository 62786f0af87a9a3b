//! Configuration loading for the cloudlog tool.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CloudLogError, Result};
use crate::io::cloudlog::TruncationPolicy;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cloudlog.toml";

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CloudLogConfig {
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Replay settings
#[derive(Clone, Debug, Deserialize)]
pub struct ReplayConfig {
    /// Playback speed multiplier (default: 0.0 = as fast as possible)
    #[serde(default)]
    pub speed: f32,

    /// Handling of a frame cut short at the end of a file (default: discard)
    #[serde(default)]
    pub truncation: TruncationPolicy,
}

/// Logging settings
#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: 0.0,
            truncation: TruncationPolicy::Discard,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CloudLogConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CloudLogError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CloudLogConfig = basic_toml::from_str(content)?;
        Ok(config)
    }

    /// Load `path` if given, else `cloudlog.toml` if present, else defaults.
    ///
    /// An explicitly given file must load; the default file is optional.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
