//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe where documents live, how logging is set up and which
//!   collection names each service binds to.
//! - Load that description from a JSON file and environment overrides.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Environment overrides win over file values.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "KITTYCODE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "KITTYCODE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "KITTYCODE_LOG_DIR";

/// Collection names used by the typed services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectionNames {
    pub skills: String,
    pub team_members: String,
    pub contacts: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            skills: "skills".to_string(),
            team_members: "team_members".to_string(),
            contacts: "contacts".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite document database; `None` keeps documents in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub collections: CollectionNames,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            collections: CollectionNames::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl CoreConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = value(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }
}

/// Reads `path` as JSON and applies environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<CoreConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = CoreConfig::from_json(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.apply_env_overrides();
    Ok(config)
}
