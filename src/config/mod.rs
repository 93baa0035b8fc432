//! Configuration management for biblia.
//!
//! Configuration is read from `~/.config/biblia/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

pub const SPANISH_BIBLE_ID: &str = "592420522e16049f-01";
pub const DEFAULT_BIBLE_ID: &str = "de4e12af7f28f599-02";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Two-letter UI language used when none has been saved yet.
    pub default_language: Option<String>,
    pub api: ApiConfig,
    pub bibles: BiblesConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// api.bible key. Empty means unset.
    pub api_key: String,
    pub base_url: String,
    /// Unset leaves the HTTP client's own default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Bible ids bound to UI languages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BiblesConfig {
    /// Used when the UI language is Spanish ("es").
    pub spanish: String,
    /// Used for every other language.
    pub default: String,
}

impl Default for BiblesConfig {
    fn default() -> Self {
        Self {
            spanish: SPANISH_BIBLE_ID.to_string(),
            default: DEFAULT_BIBLE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file for favorites and preferences.
    /// Defaults to `<data dir>/biblia/biblia.db`.
    pub database: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(config_path)
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/biblia/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("biblia").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# biblia configuration

# UI language used until one is chosen with `biblia language <code>`.
# "es" reads the Spanish bible, anything else the default one.
# default_language = "es"

[api]
# Free key from https://scripture.api.bible (required for books,
# chapters and search)
api_key = ""
base_url = "https://rest.api.bible/v1"

# Request timeout in seconds (no timeout when unset)
# timeout_secs = 10

[bibles]
# Reina Valera 1909
spanish = "592420522e16049f-01"
# King James Version
default = "de4e12af7f28f599-02"

[storage]
# Where favorites and preferences are kept
# database = "/path/to/biblia.db"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
