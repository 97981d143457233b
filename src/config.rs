//! Terminal configuration
//!
//! Every field has a default, so an empty `{}` (or no file at all) is a valid
//! configuration. The JSON schema is generated from these types by the
//! `generate_schema` dev binary.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Snake game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SnakeConfig {
    /// Board width in cells
    pub width: u16,
    /// Board height in cells
    pub height: u16,
    /// Milliseconds between moves
    pub tick_ms: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
            tick_ms: 120,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// User name shown in the prompt and by `whoami`
    pub user: String,
    /// Host name shown in the prompt
    pub host: String,
    /// Home directory; `~` resolves here and the shell starts here
    pub home: String,
    /// Number of commands kept in history
    pub history_limit: usize,
    /// Number of output entries kept on screen
    pub output_limit: usize,
    /// Address pre-filled in the contact flow's email link
    pub contact_email: String,
    /// Color theme: `crt` (green phosphor) or `amber`
    pub theme: String,
    pub snake: SnakeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "terminal".to_string(),
            home: "/home/guest".to_string(),
            history_limit: 50,
            output_limit: 200,
            contact_email: "admin@ravon.dev".to_string(),
            theme: "crt".to_string(),
            snake: SnakeConfig::default(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/crt-terminal/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crt-terminal").join("config.json"))
    }

    /// Load configuration from a JSON file; a missing file yields the defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            }
        };
        Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
