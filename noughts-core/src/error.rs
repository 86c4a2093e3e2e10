//! Error types for the game engine

use std::fmt;

/// Why a move was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// Index outside 0..=8
    OutOfRange,
    /// Target cell already holds a mark
    Occupied,
    /// The game has already been decided
    GameOver,
    /// The human tried to move while the computer is to play
    NotYourTurn,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMoveReason::OutOfRange => "cell index out of range",
            IllegalMoveReason::Occupied => "cell is already occupied",
            IllegalMoveReason::GameOver => "game is already over",
            IllegalMoveReason::NotYourTurn => "not your turn",
        };
        f.write_str(text)
    }
}

/// Errors raised by board rules, search and orchestration.
///
/// None of these are fatal: the state they were raised against is left
/// untouched, so callers can report and carry on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal move at cell {index}: {reason}")]
    IllegalMove {
        index: usize,
        reason: IllegalMoveReason,
    },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn illegal(index: usize, reason: IllegalMoveReason) -> Self {
        EngineError::IllegalMove { index, reason }
    }
}

/// Errors from parsing a board written as text
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 9 cells, found {0}")]
    WrongLength(usize),

    #[error("unknown cell symbol '{0}'")]
    UnknownSymbol(char),

    #[error("impossible position: {x} X marks against {o} O marks")]
    ImpossibleCounts { x: usize, o: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
