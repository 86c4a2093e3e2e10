//! Match command - minimax against a random mover
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use noughts_core::{play_out, GameOutcome, GameState, Mark, MinimaxAI, RandomMover, Scoring};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (minimax alternates between X and O)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Seed for the random mover
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the legacy ±1 scoring, which can lose
    #[arg(long)]
    pub legacy_scoring: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game, from minimax's side
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    minimax_mark: Mark,
    outcome: GameOutcome,
    moves: Vec<usize>,
}

impl GameRecord {
    fn minimax_won(&self) -> bool {
        self.outcome == GameOutcome::Win(self.minimax_mark)
    }

    fn minimax_lost(&self) -> bool {
        self.outcome == GameOutcome::Win(self.minimax_mark.opponent())
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    wins: usize,
    losses: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (multiple games)
/// 2. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    tracing::info!("Starting match: minimax vs random ({} games)", args.games);

    let results = play_match(&args)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_match(args: &MatchArgs) -> Result<MatchResults> {
    let scoring = if args.legacy_scoring {
        Scoring::Legacy
    } else {
        Scoring::Perfect
    };
    let mut ai = MinimaxAI::with_options(scoring, true);
    let mut random = match args.seed {
        Some(seed) => RandomMover::with_seed(seed),
        None => RandomMover::from_entropy(),
    };

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        // Alternate marks for fairness; X always opens
        let minimax_mark = if game_num % 2 == 0 { Mark::X } else { Mark::O };
        let record = play_single_game(game_num + 1, minimax_mark, &mut ai, &mut random)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves.len()
        );
        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    game_number: usize,
    minimax_mark: Mark,
    ai: &mut MinimaxAI,
    random: &mut RandomMover,
) -> Result<GameRecord> {
    let initial = GameState::new(Mark::X);
    let record = match minimax_mark {
        Mark::X => play_out(initial, ai, random)?,
        Mark::O => play_out(initial, random, ai)?,
    };

    Ok(GameRecord {
        game_number,
        minimax_mark,
        outcome: record.outcome,
        moves: record.moves,
    })
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let wins = games.iter().filter(|g| g.minimax_won()).count();
    let losses = games.iter().filter(|g| g.minimax_lost()).count();
    let draws = games
        .iter()
        .filter(|g| g.outcome == GameOutcome::Draw)
        .count();

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        wins,
        losses,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        minimax_mark: Mark,
        outcome: GameOutcome,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        wins: usize,
        losses: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        wins: results.wins,
        losses: results.losses,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                minimax_mark: g.minimax_mark,
                outcome: g.outcome,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results (minimax vs random) ===");
    println!("Total games: {}", total);
    println!("Wins:        {} ({:.1}%)", results.wins, percent(results.wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Losses:      {} ({:.1}%)", results.losses, percent(results.losses, total));
    println!("Avg moves:   {:.1}", results.avg_moves);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.wins, 0);
        assert_eq!(results.losses, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            GameRecord {
                game_number: 1,
                minimax_mark: Mark::X,
                outcome: GameOutcome::Win(Mark::X),
                moves: vec![0; 5],
            },
            GameRecord {
                game_number: 2,
                minimax_mark: Mark::O,
                outcome: GameOutcome::Win(Mark::X),
                moves: vec![0; 7],
            },
            GameRecord {
                game_number: 3,
                minimax_mark: Mark::O,
                outcome: GameOutcome::Draw,
                moves: vec![0; 9],
            },
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.wins, 1);
        assert_eq!(results.losses, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_moves, 7.0);
    }

    #[test]
    fn test_seeded_match_never_loses() {
        let args = MatchArgs {
            games: 10,
            seed: Some(3),
            legacy_scoring: false,
            json: false,
        };
        let results = play_match(&args).unwrap();
        assert_eq!(results.games.len(), 10);
        assert_eq!(results.losses, 0);
    }
}
