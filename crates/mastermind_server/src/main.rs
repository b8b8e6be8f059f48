//! Mastermind server binary.

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use mastermind_server::{AppState, ServerConfig, router};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port, host } => run_server(config, host, port).await,
        Command::Score { secret, guess } => run_score(&secret, &guess),
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mastermind_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the REST game server until Ctrl+C.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(config_path: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    initialize_tracing();

    let mut config = ServerConfig::load_or_default(&config_path)?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    let state = AppState::from_config(&config)?;
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = state.stats().snapshot();
    info!(
        games_held = state.store().len(),
        games_started = stats.games_started,
        games_won = stats.games_won,
        games_lost = stats.games_lost,
        "Server stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown requested");
}

/// Print the feedback for one guess.
fn run_score(secret: &[u8], guess: &[u8]) -> Result<()> {
    if secret.len() != guess.len() {
        bail!(
            "secret has {} digits but guess has {}",
            secret.len(),
            guess.len()
        );
    }
    let feedback = strictly_mastermind::score(secret, guess);
    println!("{}", feedback.message());
    Ok(())
}
