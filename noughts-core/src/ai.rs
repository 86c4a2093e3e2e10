//! Minimax AI for the computer player
//!
//! Exhaustive depth-first search over the remaining game tree. Every leaf is
//! a finished game so there is no heuristic evaluation: positions score as
//! win, loss or draw, adjusted by the depth at which the game ended.
//!
//! Alpha-beta pruning is optional and never changes the chosen move. At the
//! root the best score found so far is passed down as alpha, so a later move
//! that fails low can only tie the incumbent, and ties keep the earlier
//! index.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::error::{EngineError, Result};
use crate::game::GameState;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const WIN_SCORE: i32 = 1;
pub const LOSS_SCORE: i32 = -1;
pub const DRAW_SCORE: i32 = 0;

/// Multiplier applied to win/loss under `Scoring::Perfect`. Must exceed the
/// deepest possible search depth (9) so no depth adjustment can cross a draw.
pub const DEPTH_WEIGHT: i32 = 10;

// ============================================================================
// SCORING
// ============================================================================

/// How terminal positions are scored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    /// Faster wins and slower losses score higher, and every win outranks
    /// every draw. Never loses.
    #[default]
    Perfect,
    /// `WIN_SCORE - depth` and `LOSS_SCORE - depth`. Wins found beyond the
    /// first ply score no better than a draw, so this mode can lose.
    Legacy,
}

impl Scoring {
    fn win(self, depth: i32) -> i32 {
        match self {
            Scoring::Perfect => WIN_SCORE * DEPTH_WEIGHT - depth,
            Scoring::Legacy => WIN_SCORE - depth,
        }
    }

    fn loss(self, depth: i32) -> i32 {
        match self {
            Scoring::Perfect => LOSS_SCORE * DEPTH_WEIGHT + depth,
            Scoring::Legacy => LOSS_SCORE - depth,
        }
    }
}

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Minimax AI player
#[derive(Clone, Debug)]
pub struct MinimaxAI {
    pub scoring: Scoring,
    pub pruning: bool,
    nodes: u64,
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxAI {
    pub fn new() -> Self {
        Self::with_options(Scoring::Perfect, true)
    }

    pub fn with_options(scoring: Scoring, pruning: bool) -> Self {
        Self {
            scoring,
            pruning,
            nodes: 0,
        }
    }

    /// Nodes visited by the most recent search
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Best cell for `mark` to play on `board`.
    ///
    /// Deterministic: the same board and mark always give the same index.
    /// Among equal scores the lowest index wins.
    pub fn best_move(&mut self, board: &Board, mark: Mark) -> Result<usize> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return Err(EngineError::InvalidState(
                "no available moves to search".to_string(),
            ));
        }

        let mut search = self.search(mark);
        let mut best_move = moves[0];
        let mut best_score = i32::MIN;

        for index in moves {
            let child = board.with_mark(index, mark);
            let score = search.score(&child, 0, false, best_score, i32::MAX);
            if score > best_score {
                best_score = score;
                best_move = index;
            }
        }

        self.nodes = search.nodes;
        tracing::debug!(
            mark = %mark,
            best_move,
            best_score,
            nodes = self.nodes,
            "search complete"
        );
        Ok(best_move)
    }

    /// Exact minimax score of every available move for `mark`, in index
    /// order. Runs each root child with a full window.
    pub fn score_moves(&mut self, board: &Board, mark: Mark) -> Result<Vec<(usize, i32)>> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return Err(EngineError::InvalidState(
                "no available moves to score".to_string(),
            ));
        }

        let mut search = self.search(mark);
        let scores = moves
            .into_iter()
            .map(|index| {
                let child = board.with_mark(index, mark);
                (index, search.score(&child, 0, false, i32::MIN, i32::MAX))
            })
            .collect();
        self.nodes = search.nodes;
        Ok(scores)
    }

    /// Score `board` with `mark` as the maximizing side.
    ///
    /// `maximizing` says whose turn it is at this level: `mark` when true,
    /// its opponent when false.
    pub fn minimax_score(&mut self, board: &Board, mark: Mark, depth: i32, maximizing: bool) -> i32 {
        let mut search = self.search(mark);
        let score = search.score(board, depth, maximizing, i32::MIN, i32::MAX);
        self.nodes = search.nodes;
        score
    }

    /// Play both sides from `initial` to the end
    pub fn play_game(&mut self, initial: GameState) -> (GameState, Vec<usize>) {
        let mut state = initial;
        let mut history = Vec::new();

        while !state.outcome().is_over() {
            let Ok(index) = self.best_move(state.board(), state.to_move()) else {
                break;
            };
            if state.play(index).is_err() {
                break;
            }
            history.push(index);
        }

        (state, history)
    }

    fn search(&self, mark: Mark) -> Search {
        Search {
            maximizer: mark,
            minimizer: mark.opponent(),
            scoring: self.scoring,
            pruning: self.pruning,
            nodes: 0,
        }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// One search, fixed to a maximizing mark
struct Search {
    maximizer: Mark,
    minimizer: Mark,
    scoring: Scoring,
    pruning: bool,
    nodes: u64,
}

impl Search {
    fn score(&mut self, board: &Board, depth: i32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        // Terminal checks, in this order
        if board.check_win(self.minimizer) {
            return self.scoring.loss(depth);
        }
        if board.check_win(self.maximizer) {
            return self.scoring.win(depth);
        }
        if board.is_draw() {
            return DRAW_SCORE;
        }

        let (mark, mut best) = if maximizing {
            (self.maximizer, i32::MIN)
        } else {
            (self.minimizer, i32::MAX)
        };

        for index in board.available_moves() {
            let child = board.with_mark(index, mark);
            let score = self.score(&child, depth + 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
