//! Command-line interface for mastermind_server.

use clap::{Parser, Subcommand};

/// Mastermind - code-breaking game server
#[derive(Parser, Debug)]
#[command(name = "mastermind_server")]
#[command(about = "Mastermind game server with REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST game server
    Serve {
        /// Path to the TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "mastermind.toml")]
        config: std::path::PathBuf,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Score a guess against a secret and print the feedback
    Score {
        /// Secret digits, comma separated (e.g. 1,2,3,4)
        #[arg(long, value_delimiter = ',', required = true)]
        secret: Vec<u8>,

        /// Guess digits, comma separated (e.g. 4,3,2,1)
        #[arg(long, value_delimiter = ',', required = true)]
        guess: Vec<u8>,
    },
}
