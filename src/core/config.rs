//! Configuration: optional `config.json` in the config directory, then environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chatmark::format::{DEFAULT_MAX_INLINE_LEN, FencePolicy, FormatOptions};
use chatmark::render::RenderOptions;
use serde::{Deserialize, Serialize};

use crate::core::paths;

/// Alternate config file location.
pub const ENV_CONFIG: &str = "CHATMARK_CONFIG";
pub const ENV_WIDTH: &str = "CHATMARK_WIDTH";
pub const ENV_MAX_INLINE_LEN: &str = "CHATMARK_MAX_INLINE_LEN";
/// Any non-empty value disables colored output (https://no-color.org).
pub const ENV_NO_COLOR: &str = "NO_COLOR";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Wrap width in columns; 0 disables wrapping.
    pub wrap_width: usize,
    pub max_inline_len: usize,
    pub unterminated_fence: FencePolicy,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 80,
            max_inline_len: DEFAULT_MAX_INLINE_LEN,
            unterminated_fence: FencePolicy::default(),
            color: true,
        }
    }
}

impl Config {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            unterminated_fence: self.unterminated_fence,
            max_inline_len: self.max_inline_len,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.wrap_width,
        }
    }
}

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Config file path: `CHATMARK_CONFIG` if set, else `config.json` in the config directory.
pub fn config_path() -> Option<PathBuf> {
    env::var_os(ENV_CONFIG)
        .map(PathBuf::from)
        .or_else(|| paths::config_dir().map(|d| d.join(CONFIG_FILE)))
}

/// Load configuration from the config file (if present) and the process environment.
pub fn load() -> Result<Config, ConfigError> {
    load_from(config_path().as_deref(), |key| env::var(key).ok())
}

/// Load configuration from `path` (absent file means defaults), then apply overrides from `env`.
pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) if path.exists() => read_file(path)?,
        _ => Config::default(),
    };

    if let Some(value) = env(ENV_WIDTH) {
        config.wrap_width = parse_usize(ENV_WIDTH, value)?;
    }
    if let Some(value) = env(ENV_MAX_INLINE_LEN) {
        config.max_inline_len = parse_usize(ENV_MAX_INLINE_LEN, value)?;
    }
    if env(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
        config.color = false;
    }
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_usize(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
