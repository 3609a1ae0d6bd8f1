//! Command-line interface for roshambo.

use clap::{Parser, Subcommand};

/// Roshambo - rock-paper-scissors game service
#[derive(Parser, Debug)]
#[command(name = "roshambo")]
#[command(about = "Rock-paper-scissors game service with a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long, default_value = "roshambo.db")]
        db_path: String,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Path to the database file (created if it doesn't exist)
        #[arg(long, default_value = "roshambo.db")]
        db_path: String,
    },
}
