//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`)
//! 3. Environment variables (`HUERTO_*`)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.config/huerto-hogar/storefront.toml (Linux)                        │
//! │                                                                         │
//! │    store_name    = "Huerto Hogar"                                      │
//! │    currency_code = "CLP"                                               │
//! │    database_path = "/var/lib/huerto/huerto.db"                         │
//! │    log_filter    = "info,huerto=debug,sqlx=warn"                       │
//! │    seed_catalog  = true                                                │
//! │                                                                         │
//! │  HUERTO_STORE_NAME, HUERTO_DB_PATH, HUERTO_LOG, HUERTO_SEED_CATALOG    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration is read-only after initialization, so no lock is needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use huerto_core::Money;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,huerto=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "storefront.toml";
const DATABASE_FILE_NAME: &str = "huerto.db";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform data directory")]
    NoDataDir,
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name shown in the app header.
    pub store_name: String,

    /// Currency code (ISO 4217) appended to formatted prices.
    pub currency_code: String,

    /// SQLite file. `None` means the platform data dir; `:memory:` is allowed.
    pub database_path: Option<PathBuf>,

    /// tracing `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Write the built-in catalog into an empty products table on startup.
    pub seed_catalog: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Huerto Hogar".to_string(),
            currency_code: "CLP".to_string(),
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed_catalog: true,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file. Keys that are absent keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Rejects values the storefront cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }
        if self.currency_code.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_code must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Applies `HUERTO_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("HUERTO_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(path) = lookup("HUERTO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("HUERTO_LOG") {
            self.log_filter = filter;
        }

        if let Some(seed) = lookup("HUERTO_SEED_CATALOG") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed_catalog = true,
                "0" | "false" | "no" => self.seed_catalog = false,
                _ => warn!(value = %seed, "Unknown HUERTO_SEED_CATALOG value"),
            }
        }
    }

    /// The database file to open, creating the data directory if needed.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Formats a price for display, e.g. `$1.200 CLP`.
    pub fn format_price(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency_code)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("cl", "huertohogar", "huerto-hogar")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
