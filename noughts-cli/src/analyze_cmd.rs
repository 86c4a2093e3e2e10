//! Analyze command - score every move on a board
//!
//! - run(): parse, score, report
//! - side_to_move(): infer the mark to analyze when none is given

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use noughts_core::{Board, GameOutcome, GameState, Mark, MinimaxAI, Scoring};

use crate::render::{board_grid, outcome_message};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board as 9 symbols: X, O and . for empty (e.g. "XX.OO....")
    pub board: String,

    /// Mark to move; inferred from counts when omitted (X on a tie)
    #[arg(long)]
    pub mark: Option<Mark>,

    /// Use the legacy ±1 scoring, which can lose
    #[arg(long)]
    pub legacy_scoring: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Analysis {
    board: String,
    mark: Mark,
    outcome: GameOutcome,
    best_move: Option<usize>,
    scores: Vec<MoveScore>,
    nodes: u64,
}

#[derive(Debug, Serialize)]
struct MoveScore {
    index: usize,
    score: i32,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Invalid board: {}", args.board))?;
    let mark = match args.mark {
        Some(mark) => mark,
        None => side_to_move(&board)?,
    };
    let scoring = if args.legacy_scoring {
        Scoring::Legacy
    } else {
        Scoring::Perfect
    };

    let analysis = analyze(&board, mark, scoring)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_text(&board, &analysis);
    }
    Ok(())
}

fn analyze(board: &Board, mark: Mark, scoring: Scoring) -> Result<Analysis> {
    let outcome = GameOutcome::of(board);
    let mut ai = MinimaxAI::with_options(scoring, true);

    let (best_move, scores) = if outcome.is_over() {
        (None, Vec::new())
    } else {
        let best = ai.best_move(board, mark)?;
        let scores = ai
            .score_moves(board, mark)?
            .into_iter()
            .map(|(index, score)| MoveScore { index, score })
            .collect();
        (Some(best), scores)
    };

    Ok(Analysis {
        board: board.to_compact(),
        mark,
        outcome,
        best_move,
        scores,
        nodes: ai.nodes_searched(),
    })
}

/// Side to move as if X opened; a board where O leads must have had O open
fn side_to_move(board: &Board) -> Result<Mark> {
    let state = GameState::from_board(*board, Mark::X)
        .or_else(|_| GameState::from_board(*board, Mark::O))
        .context("Cannot tell whose turn it is")?;
    Ok(state.to_move())
}

fn print_text(board: &Board, analysis: &Analysis) {
    print!("{}", board_grid(board));
    if analysis.outcome.is_over() {
        println!("\n{}", outcome_message(analysis.outcome));
        return;
    }

    println!("\n{} to move", analysis.mark);
    for entry in &analysis.scores {
        let marker = if Some(entry.index) == analysis.best_move { " <- best" } else { "" };
        println!("  cell {}: {:>4}{}", entry.index + 1, entry.score, marker);
    }
}
