//! Configuration file
//!
//! Loaded once at startup from JSON. Invalid configuration is fatal.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

/// Which collection implementation to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MongoDB at `server_address`
    #[default]
    Mongodb,
    /// Process-local, lost on exit
    Memory,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Store address: a mongodb URI or a bare host[:port]
    #[serde(default)]
    pub server_address: String,

    /// Logical database name (required)
    pub database_name: String,

    /// Collection holding the cards (default "cards_detail2")
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Collection implementation (default "mongodb")
    #[serde(default)]
    pub backend: StoreBackend,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_collection_name() -> String {
    "cards_detail2".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "localhost:27017".to_string(),
            database_name: "cards".to_string(),
            collection_name: default_collection_name(),
            backend: StoreBackend::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_name.trim().is_empty() {
            return Err(CliError::config_error("database_name must not be empty"));
        }

        if self.collection_name.trim().is_empty() {
            return Err(CliError::config_error("collection_name must not be empty"));
        }

        if self.backend == StoreBackend::Mongodb && self.server_address.trim().is_empty() {
            return Err(CliError::config_error(
                "server_address is required when backend is 'mongodb'",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config() {
        let config =
            Config::parse(r#"{"server_address": "localhost", "database_name": "cards"}"#).unwrap();

        assert_eq!(config.server_address, "localhost");
        assert_eq!(config.database_name, "cards");
        assert_eq!(config.collection_name, "cards_detail2");
        assert_eq!(config.backend, StoreBackend::Mongodb);
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_memory_backend_needs_no_address() {
        let config = Config::parse(r#"{"database_name": "cards", "backend": "memory"}"#).unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert!(config.server_address.is_empty());
    }

    #[test]
    fn test_mongodb_requires_address() {
        let err = Config::parse(r#"{"database_name": "cards"}"#).unwrap_err();
        assert!(err.message().contains("server_address"));
    }

    #[test]
    fn test_empty_database_name_rejected() {
        let err = Config::parse(r#"{"server_address": "localhost", "database_name": " "}"#)
            .unwrap_err();
        assert!(err.message().contains("database_name"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err =
            Config::parse(r#"{"database_name": "cards", "backend": "redis"}"#).unwrap_err();
        assert!(err.message().starts_with("Invalid config JSON"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server_address": "mongodb://db:27017", "database_name": "prod", "http": {{"port": 9001}}}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database_name, "prod");
        assert_eq!(config.http.port, 9001);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.message().starts_with("Failed to read config"));
    }

    #[test]
    fn test_default_round_trips_through_validation() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(Config::parse(&json).unwrap(), Config::default());
    }
}
