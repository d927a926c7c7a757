use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod models;
mod seed;
mod store;

use commands::{ConfigCommand, SeedCommand, StatusCommand};
use config::Config;
use store::HttpStore;

#[derive(Parser)]
#[command(name = "menuseed")]
#[command(version)]
#[command(about = "Seed a hosted food-ordering backend with reference data", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Wipe the remote store and recreate the reference dataset
    Seed(SeedCommand),

    /// Show live document and file counts
    Status(StatusCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menuseed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Seed(cmd)) => {
            let store = HttpStore::new(&config);
            cmd.run(&store, &config).await?;
        }
        Some(Commands::Status(cmd)) => {
            let store = HttpStore::new(&config);
            cmd.run(&store, &config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
