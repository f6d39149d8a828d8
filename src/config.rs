use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{cli::CliArgs, posting::PostingPolicy};

const CONFIG_FILE: &str = "bk.toml";
const DATA_DIR: &str = ".bookkeeping";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub posting: PostingPolicy,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`.
    #[serde(default = "default_file")]
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn default_data_dir() -> PathBuf {
    home_dir().join(DATA_DIR)
}

fn default_file() -> String {
    "bookkeeping.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: Backend::default(),
            data_dir: default_data_dir(),
            file: default_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

impl StorageConfig {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.file)
    }
}

impl Config {
    /// Reads the config file named on the command line, or the default one
    /// if it exists, then applies command line overrides.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = default_data_dir().join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        // CLI overrides
        if let Some(ref dir) = cli.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
