//! Brainiac CLI - play tic-tac-toe sessions between human, random and
//! MENACE agents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "brainiac")]
#[command(version, about = "Matchbox learning for tic-tac-toe", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session of games
    Play(brainiac::cli::commands::play::PlayArgs),

    /// Count the valid board states
    States(brainiac::cli::commands::states::StatesArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);
    debug!(log_level = %cli.log_level, "tracing initialized");

    match cli.command {
        Commands::Play(args) => brainiac::cli::commands::play::execute(args),
        Commands::States(args) => brainiac::cli::commands::states::execute(args),
    }
}
