// ============================================================
// IMPORT CONFIGURATION
// ============================================================
// Layered configuration: optional TOML file, overridden by
// `EAV_IMPORT_*` environment variables (nested keys use `__`).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::domain::csv::CsvDialect;
use crate::domain::error::{ImportError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "eav-import.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Connection string of the catalog database
    pub database_url: String,

    /// Dialect for delimited value cells
    #[serde(default)]
    pub csv: CsvDialect,

    /// Flag value selecting user defined attributes (default: 1)
    #[serde(default = "default_user_defined_flag")]
    pub user_defined_flag: i64,

    /// Connection pool size (default: 4)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_user_defined_flag() -> i64 {
    1
}

fn default_max_connections() -> u32 {
    4
}

impl ImportConfig {
    /// Load configuration from `eav-import.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from an explicit TOML file and the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config: ImportConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("EAV_IMPORT_").split("__"))
            .extract()
            .map_err(|e| {
                ImportError::Configuration(format!("Failed to load import config: {}", e))
            })?;

        config.validate().map_err(ImportError::Configuration)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("database_url must not be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("max_connections must be > 0".to_string());
        }
        self.csv.validate()
    }
}
