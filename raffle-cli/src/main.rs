mod commands;

use clap::{Parser, Subcommand};
use raffle_core::{RaffleError, RosterFile};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "raffle")]
#[command(about = "Sequential prize raffle - roster setup and drawing")]
#[command(version)]
struct Cli {
    /// Data directory for the stored roster
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Participant management commands
    #[command(subcommand)]
    Participant(commands::ParticipantCommands),

    /// Prize tier management commands
    #[command(subcommand)]
    Prize(commands::PrizeCommands),

    /// Run the draw for the configured roster
    Draw(commands::DrawArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "raffle={},raffle_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raffle")
    });
    tokio::fs::create_dir_all(&data_dir).await?;

    let store = RosterFile::new(&data_dir);

    // Execute command
    let result = match cli.command {
        Commands::Participant(cmd) => commands::handle_participant_command(cmd, &store).await,
        Commands::Prize(cmd) => commands::handle_prize_command(cmd, &store).await,
        Commands::Draw(args) => commands::handle_draw_command(args, &store).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<RaffleError>() {
            Some(RaffleError::EmptyRoster) => {
                eprintln!("Error: no participants in the roster");
                eprintln!("Add some with: raffle participant add <name>");
            }
            Some(RaffleError::NoPrizes) => {
                eprintln!("Error: no prizes configured");
                eprintln!("Add one with: raffle prize add <name> --count <slots>");
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
