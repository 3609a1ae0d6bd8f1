//! Roshambo - rock-paper-scissors game service.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use roshambo::{AppState, GameRepository, GameService, api};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => serve(host, port, db_path).await,
        Command::Migrate { db_path } => migrate(db_path),
    }
}

/// Run the HTTP game server.
async fn serve(host: String, port: u16, db_path: String) -> Result<()> {
    info!(db_path = %db_path, "Starting roshambo server");

    let repository = GameRepository::new(db_path)?;
    repository.run_migrations()?;

    let service = GameService::new(repository);
    let app = api::router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(host = %host, port, "Server ready at http://{}:{}/game/", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Apply pending migrations and exit.
fn migrate(db_path: String) -> Result<()> {
    let repository = GameRepository::new(db_path)?;
    repository.run_migrations()?;
    info!("Database is up to date");
    Ok(())
}
