//! Play command - interactive game against the computer
//!
//! ## Architecture
//!
//! - run(): build the config, start the session, read commands
//! - parse_command(): one line of input to a command
//! - rendering lives in `render`; this module never inspects the board

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use noughts_core::{Mark, MatchConfig, Scoring, Session, Side};

use crate::render::TerminalRenderer;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// JSON match config; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mark you play (x or o); the computer takes the other
    #[arg(long)]
    pub human: Option<Mark>,

    /// Who moves first (human or computer)
    #[arg(long, value_parser = parse_side)]
    pub first: Option<Side>,

    /// Pause before the computer replies
    #[arg(long, default_value = "500")]
    pub delay_ms: u64,

    /// Use the legacy ±1 scoring, which can lose
    #[arg(long)]
    pub legacy_scoring: bool,

    /// Disable alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,
}

/// A line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(usize),
    Restart,
    Quit,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    let mut session = Session::new(config)?;
    let mut renderer = TerminalRenderer::new(session.config().human_mark);

    session.new_game(&mut renderer)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt(&session)?;
        let Some(line) = lines.next() else {
            break;
        };

        match parse_command(&line?) {
            Ok(Command::Quit) => break,
            Ok(Command::Restart) => session.restart(&mut renderer)?,
            Ok(Command::Move(index)) => {
                if let Err(e) = session.human_move(index, &mut renderer) {
                    tracing::warn!("Move ignored: {}", e);
                    println!("{}", e);
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

// ============================================================================
// HELPERS
// ============================================================================

/// File config first, then flags on top
fn build_config(args: &PlayArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    if let Some(human) = args.human {
        config.human_mark = human;
        config.computer_mark = human.opponent();
    }
    if let Some(first) = args.first {
        config.first_mover = first;
    }
    if args.legacy_scoring {
        config.scoring = Scoring::Legacy;
    }
    if args.no_pruning {
        config.pruning = false;
    }
    config.computer_delay_ms = args.delay_ms;

    config.validate()?;
    Ok(config)
}

fn prompt(session: &Session) -> Result<()> {
    if session.awaiting_human() {
        print!("Your move (1-9, r, q): ");
    } else {
        print!("(r to restart, q to quit): ");
    }
    io::stdout().flush()?;
    Ok(())
}

/// Cells are typed 1-9 and map to indices 0-8
fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let trimmed = line.trim();
    match trimmed {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "r" | "restart" => Ok(Command::Restart),
        _ => match trimmed.parse::<usize>() {
            Ok(n) if (1..=9).contains(&n) => Ok(Command::Move(n - 1)),
            _ => Err(format!("Not a cell: '{}'. Type 1-9, r or q.", trimmed)),
        },
    }
}

fn parse_side(s: &str) -> std::result::Result<Side, String> {
    match s.trim().to_lowercase().as_str() {
        "human" | "h" => Ok(Side::Human),
        "computer" | "c" | "cpu" => Ok(Side::Computer),
        other => Err(format!("unknown side '{}', expected human or computer", other)),
    }
}
