//! CLI argument definitions using clap
//!
//! Commands:
//! - cardsvc init --config <path>
//! - cardsvc serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cardsvc - CRUD HTTP service for keyed Card documents
#[derive(Parser, Debug)]
#[command(name = "cardsvc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./cardsvc.json")]
        config: PathBuf,
    },

    /// Connect to the store and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./cardsvc.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
