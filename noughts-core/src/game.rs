//! Game state: board plus whose turn it is

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::error::{EngineError, IllegalMoveReason, Result};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Outcome of a game, derived from the board on demand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Win(Mark),
    Draw,
}

impl GameOutcome {
    /// Evaluate a board from scratch. Wins are checked before the draw.
    pub fn of(board: &Board) -> Self {
        if board.check_win(Mark::X) {
            GameOutcome::Win(Mark::X)
        } else if board.check_win(Mark::O) {
            GameOutcome::Win(Mark::O)
        } else if board.is_draw() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Explicit game state (copy to branch)
///
/// On the wire only the board and the first mover are stored; the side to
/// move is rebuilt through `from_board` when reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedGame", into = "SavedGame")]
pub struct GameState {
    board: Board,
    to_move: Mark,
    first_mover: Mark,
}

#[derive(Serialize, Deserialize)]
struct SavedGame {
    board: Board,
    first_mover: Mark,
}

impl TryFrom<SavedGame> for GameState {
    type Error = EngineError;

    fn try_from(saved: SavedGame) -> Result<Self> {
        GameState::from_board(saved.board, saved.first_mover)
    }
}

impl From<GameState> for SavedGame {
    fn from(state: GameState) -> Self {
        SavedGame {
            board: state.board,
            first_mover: state.first_mover,
        }
    }
}

impl GameState {
    /// Fresh game with `first_mover` to play
    pub fn new(first_mover: Mark) -> Self {
        Self {
            board: Board::new(),
            to_move: first_mover,
            first_mover,
        }
    }

    /// Rebuild a state from a position. The side to move is whichever mark
    /// has fewer cells; on equal counts it is `first_mover`.
    pub fn from_board(board: Board, first_mover: Mark) -> Result<Self> {
        let first = board.count(first_mover);
        let second = board.count(first_mover.opponent());
        let to_move = match first.checked_sub(second) {
            Some(0) => first_mover,
            Some(1) => first_mover.opponent(),
            _ => {
                return Err(EngineError::InvalidState(format!(
                    "{} moved first but has {} marks against {}",
                    first_mover, first, second
                )))
            }
        };
        Ok(Self {
            board,
            to_move,
            first_mover,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to play next. Frozen once the game is over.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn first_mover(&self) -> Mark {
        self.first_mover
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome::of(&self.board)
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.outcome().is_over() {
            return vec![];
        }
        self.board.available_moves()
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Play `index` for the side to move. The turn flips only when the game
    /// carries on.
    pub fn play(&mut self, index: usize) -> Result<GameOutcome> {
        if self.outcome().is_over() {
            return Err(EngineError::illegal(index, IllegalMoveReason::GameOver));
        }

        self.board = self.board.apply_move(index, self.to_move)?;
        let outcome = self.outcome();
        tracing::debug!(index, mark = %self.to_move, ?outcome, "move applied");

        if !outcome.is_over() {
            self.to_move = self.to_move.opponent();
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
