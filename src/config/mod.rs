//! Configuration for invoicedb
//!
//! A single JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "data_dir": "./data",
//!   "catalog_file": "Catalog.db",
//!   "customer_file": "Customer.db",
//!   "operator_file": "Operators.txt",
//!   "operator_key": "invoicedb",
//!   "log_level": "info",
//!   "catalog_layout": { "code": 16, "designation": 128 },
//!   "customer_layout": { "name": 70 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Severity};
use crate::operator::{cipher, DEFAULT_OPERATOR_KEY, OPERATOR_TABLE_FILENAME};
use crate::record::{CatalogLayout, CustomerLayout};
use crate::storage::{CATALOG_DB_FILENAME, CUSTOMER_DB_FILENAME};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the catalog and customer stores
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    #[serde(default = "default_customer_file")]
    pub customer_file: String,

    #[serde(default = "default_operator_file")]
    pub operator_file: String,

    /// Letters-only key for the operator table obfuscation
    #[serde(default = "default_operator_key")]
    pub operator_key: String,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub catalog_layout: CatalogLayout,

    #[serde(default)]
    pub customer_layout: CustomerLayout,
}

fn default_data_dir() -> String {
    "./data".to_string()
}
fn default_catalog_file() -> String {
    CATALOG_DB_FILENAME.to_string()
}
fn default_customer_file() -> String {
    CUSTOMER_DB_FILENAME.to_string()
}
fn default_operator_file() -> String {
    OPERATOR_TABLE_FILENAME.to_string()
}
fn default_operator_key() -> String {
    DEFAULT_OPERATOR_KEY.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            customer_file: default_customer_file(),
            operator_file: default_operator_file(),
            operator_key: default_operator_key(),
            log_level: default_log_level(),
            catalog_layout: CatalogLayout::default(),
            customer_layout: CustomerLayout::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("data_dir", &config.data_dir),
                ("path", &path.display().to_string()),
            ],
        );
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if self.catalog_file.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog_file must not be empty".into()));
        }
        if self.customer_file.trim().is_empty() {
            return Err(ConfigError::Invalid("customer_file must not be empty".into()));
        }
        if self.operator_file.trim().is_empty() {
            return Err(ConfigError::Invalid("operator_file must not be empty".into()));
        }
        if !cipher::is_valid_key(&self.operator_key) {
            return Err(ConfigError::Invalid(
                "operator_key must be one or more ASCII letters".into(),
            ));
        }

        self.severity()?;
        self.catalog_layout.validate().map_err(ConfigError::Invalid)?;
        self.customer_layout.validate().map_err(ConfigError::Invalid)?;

        Ok(())
    }

    /// Minimum log severity parsed from `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_path().join(&self.catalog_file)
    }

    pub fn customer_path(&self) -> PathBuf {
        self.data_path().join(&self.customer_file)
    }

    pub fn operator_path(&self) -> PathBuf {
        self.data_path().join(&self.operator_file)
    }
}
