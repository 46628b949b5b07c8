use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "awesome")]
#[command(author, version, about = "Minimal web application backend")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the database tables for all models
    InitDb,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
