//! CLI module for cardsvc
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Connect to the store and serve the HTTP API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, open_collection, run, run_command, serve};
pub use config::{Config, StoreBackend};
pub use errors::{CliError, CliErrorCode, CliResult};
