//! Static configuration for the amelia application.
//!
//! Configuration is a plain value: it is read once by the entry point and then
//! handed by reference to whatever needs it (the database handle, the admin
//! menu, the report exporter). Nothing in the crate reaches for a global copy.
//!
//! ## Sources
//!
//! 1. `config.json` in the per-user data directory, when present
//! 2. Built-in defaults (database and report directory beside the config file)
//! 3. `AMELIA_DB` / `AMELIA_REPORT_DIR` environment variables, which win over both
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::db::db::Db;
//! use amelia::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db = Db::new(&config);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory (relative to the data directory) that receives CSV reports by default.
pub const REPORT_DIR_NAME: &str = "reports";

pub const DEFAULT_TITLE: &str = "Amelia";

/// Environment variable overriding the database file location.
pub const ENV_DB_PATH: &str = "AMELIA_DB";

/// Environment variable overriding the report directory.
pub const ENV_REPORT_DIR: &str = "AMELIA_REPORT_DIR";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// SQLite file holding the `events` and `registrations` tables.
    pub db_path: PathBuf,

    /// Directory the registration report is written into.
    pub report_dir: PathBuf,

    /// Title shown above the main menu.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            report_dir: report_dir.into(),
            title: default_title(),
        }
    }

    /// Defaults rooted in the given data directory.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join(DB_FILE_NAME), base.join(REPORT_DIR_NAME))
    }

    /// Loads the stored configuration, falling back to defaults, then applies
    /// environment overrides.
    pub fn read() -> Result<Config> {
        let storage = DataStorage::new();
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        let config = if config_file_path.exists() {
            let file = File::open(&config_file_path)?;
            serde_json::from_reader(file)?
        } else {
            Config::in_dir(storage.base_path())
        };

        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = env::var(ENV_DB_PATH) {
            self.db_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var(ENV_REPORT_DIR) {
            self.report_dir = PathBuf::from(path);
        }
        self
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_file_path, json)?;
        Ok(config_file_path)
    }

    pub fn exists() -> Result<bool> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?.exists())
    }
}
