//! CLI command implementations
//!
//! `serve` follows a fixed boot order: load config, open the store once,
//! build the router, listen. Nothing is torn down explicitly; the process
//! exit closes the store connection.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::args::{Cli, Command};
use super::config::{Config, StoreBackend};
use super::errors::{CliError, CliResult};
use crate::dao::{CardCollection, CardsDao, MemoryCollection, MongoCollection};
use crate::http_server::HttpServer;
use crate::observability::Logger;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Write a default configuration file. Refuses to overwrite.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(
            &config_path.display().to_string(),
        ));
    }

    let content = serde_json::to_string_pretty(&Config::default())?;
    fs::write(config_path, content)?;

    Logger::info(
        "CONFIG_WRITTEN",
        &[("path", config_path.display().to_string().as_str())],
    );
    Ok(())
}

/// Open the configured collection
pub async fn open_collection(config: &Config) -> CliResult<Arc<dyn CardCollection>> {
    match config.backend {
        StoreBackend::Memory => {
            Logger::warn(
                "STORE_CONNECTED",
                &[("backend", "memory"), ("durable", "false")],
            );
            Ok(Arc::new(MemoryCollection::new()))
        }
        StoreBackend::Mongodb => {
            let collection = MongoCollection::connect(
                &config.server_address,
                &config.database_name,
                &config.collection_name,
            )
            .await
            .map_err(|e| CliError::boot_failed(format!("Failed to connect to store: {}", e)))?;

            Logger::info(
                "STORE_CONNECTED",
                &[
                    ("backend", "mongodb"),
                    ("collection", config.collection_name.as_str()),
                    ("database", config.database_name.as_str()),
                ],
            );
            Ok(Arc::new(collection))
        }
    }
}

/// Load config, connect the store, and serve until the process exits
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let collection = open_collection(&config).await?;
        let server = HttpServer::new(config.http.clone(), CardsDao::new(collection));

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardsvc.json");

        init(&path).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardsvc.json");
        fs::write(&path, "{}").unwrap();

        let err = init(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::AlreadyInitialized);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_serve_fails_on_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = serve(&dir.path().join("absent.json"), None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn test_open_memory_collection() {
        let config = Config {
            backend: StoreBackend::Memory,
            server_address: String::new(),
            ..Config::default()
        };

        let collection = open_collection(&config).await.unwrap();
        let dao = CardsDao::new(collection);
        assert!(dao.find_all().await.unwrap().is_empty());
    }
}
