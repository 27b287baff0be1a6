//! Grid Masters - maze runner and 8-puzzle in the terminal.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use grid_masters::{
    Cli, ClientConfig, Command, HttpGameClient, LevelRepository, Variant, run_tui,
};
use grid_masters_core::Level;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_tracing(&config)?;

    match cli.command {
        Command::Play { variant } => run_tui(&config, variant).await,
        Command::Levels { variant } => print_levels(&config, variant).await,
    }
}

/// Layers CLI flags over the config file.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.server_url {
        config = config.with_server_url(url.as_str());
    }
    if let Some(algorithm) = cli.algorithm {
        config = config.with_algorithm(algorithm);
    }
    if cli.mute {
        config = config.with_sound(false);
    }
    Ok(config)
}

/// Logs to a file so output never interferes with the TUI.
fn init_tracing(config: &ClientConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,grid_masters=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Prints one variant's level list.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
async fn print_levels(config: &ClientConfig, variant: Variant) -> Result<()> {
    let client = HttpGameClient::from_config(config)?;
    info!(%variant, "Listing levels");
    match variant {
        Variant::Maze => {
            for level in client.maze_levels().await? {
                let rows = level.layout().len();
                let cols = level.layout().first().map_or(0, Vec::len);
                println!(
                    "{:>3}  {:<24} {}x{}  start ({}, {})  goal ({}, {})",
                    level.id(),
                    level.name(),
                    rows,
                    cols,
                    level.start().row,
                    level.start().col,
                    level.goal().row,
                    level.goal().col
                );
            }
        }
        Variant::Puzzle => {
            for level in client.puzzle_levels().await? {
                println!(
                    "{:>3}  {:<24} {:?}",
                    level.id(),
                    level.name(),
                    level.state().tiles()
                );
            }
        }
    }
    Ok(())
}
