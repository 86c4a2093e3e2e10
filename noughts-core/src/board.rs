//! Board state and the rules of play
//!
//! Cells are indexed 0-8 in row-major order:
//!
//! ```text
//! 0 | 1 | 2
//! 3 | 4 | 5
//! 6 | 7 | 8
//! ```
//!
//! The board is a plain `Copy` value. Applying a move yields a new board and
//! leaves the original untouched, so search can branch without undo.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, IllegalMoveReason, ParseBoardError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// The 8 lines that win: 3 rows, 3 columns, 2 diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// A player's mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" | "circle" => Ok(Mark::O),
            other => Err(format!("unknown mark '{}', expected x or o", other)),
        }
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Taken(mark) => Some(mark),
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 3x3 board, the single source of truth for occupancy.
///
/// Serializes as its compact string and deserializes through `FromStr`, so
/// a payload with impossible mark counts is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at `index`, or `None` when out of range
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Place `mark` at `index`, returning the new board.
    ///
    /// Fails without touching anything if the index is out of range or the
    /// cell is taken.
    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<Board> {
        match self.cell(index) {
            None => Err(EngineError::illegal(index, IllegalMoveReason::OutOfRange)),
            Some(Cell::Taken(_)) => Err(EngineError::illegal(index, IllegalMoveReason::Occupied)),
            Some(Cell::Empty) => Ok(self.with_mark(index, mark)),
        }
    }

    /// Unchecked placement for callers that already hold a legal index
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[index] = Cell::Taken(mark);
        next
    }

    /// Empty cell indices in ascending order
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Taken(mark))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// True iff some winning line is entirely `mark`
    pub fn check_win(&self, mark: Mark) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Cell::Taken(mark)))
    }

    /// The winning line for `mark`, if any
    pub fn winning_line(&self, mark: Mark) -> Option<[usize; 3]> {
        WINNING_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == Cell::Taken(mark)))
    }

    /// Full board with no winner
    pub fn is_draw(&self) -> bool {
        self.is_full() && !self.check_win(Mark::X) && !self.check_win(Mark::O)
    }

    pub fn is_terminal(&self) -> bool {
        self.check_win(Mark::X) || self.check_win(Mark::O) || self.is_draw()
    }

    /// Compact 9-character form, `.` for empty
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => '.',
                Cell::Taken(mark) => mark.symbol(),
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact: Vec<char> = self.to_compact().chars().collect();
        for (row, chunk) in compact.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} {}", chunk[0], chunk[1], chunk[2])?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse 9 symbols: `X`/`x`, `O`/`o`, and `.`, `-` or `_` for empty.
    /// Whitespace, `|` and `/` are ignored so `"XX./OO./..."` also parses.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if symbols.len() != CELL_COUNT {
            return Err(ParseBoardError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            board.cells[index] = match symbol {
                'X' | 'x' => Cell::Taken(Mark::X),
                'O' | 'o' => Cell::Taken(Mark::O),
                '.' | '-' | '_' => Cell::Empty,
                other => return Err(ParseBoardError::UnknownSymbol(other)),
            };
        }

        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        if x.abs_diff(o) > 1 {
            return Err(ParseBoardError::ImpossibleCounts { x, o });
        }
        Ok(board)
    }
}

impl TryFrom<String> for Board {
    type Error = ParseBoardError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_compact()
    }
}

// ============================================================================
// TESTS
// ============================================================================
