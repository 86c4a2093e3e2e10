//! Selfplay command - the minimax AI plays both sides

use anyhow::Result;
use clap::Args;

use noughts_core::{Board, GameState, Mark, MinimaxAI, Scoring};

use crate::render::{board_grid, outcome_message};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Mark that opens the game
    #[arg(long, default_value = "x")]
    pub first: Mark,

    /// Use the legacy ±1 scoring, which can lose
    #[arg(long)]
    pub legacy_scoring: bool,
}

pub fn run(args: SelfplayArgs) -> Result<()> {
    let scoring = if args.legacy_scoring {
        Scoring::Legacy
    } else {
        Scoring::Perfect
    };
    let mut ai = MinimaxAI::with_options(scoring, true);
    let (final_state, history) = ai.play_game(GameState::new(args.first));

    let mut board = Board::new();
    let mut mark = final_state.first_mover();
    for (turn, &index) in history.iter().enumerate() {
        board = board.apply_move(index, mark)?;
        println!("\nMove {}: {} at {}", turn + 1, mark, index + 1);
        print!("{}", board_grid(&board));
        mark = mark.opponent();
    }

    println!("\n{}", outcome_message(final_state.outcome()));
    Ok(())
}
