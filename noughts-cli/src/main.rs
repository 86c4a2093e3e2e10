//! Noughts CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer in the terminal
//! - analyze: Score every move on a given board
//! - match: Pit the minimax AI against a random mover
//! - selfplay: Let the minimax AI play itself

mod analyze_cmd;
mod match_cmd;
mod play_cmd;
mod render;
mod selfplay_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a perfect minimax opponent")]
struct Cli {
    /// Log search and turn details to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Score the moves available on a board
    Analyze(analyze_cmd::AnalyzeArgs),
    /// Minimax vs random mover
    Match(match_cmd::MatchArgs),
    /// Minimax vs itself
    Selfplay(selfplay_cmd::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Analyze(args) => analyze_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Selfplay(args) => selfplay_cmd::run(args),
    }
}

/// Log to stderr so the board on stdout stays readable. `RUST_LOG` wins
/// over the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
