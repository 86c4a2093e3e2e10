//! Noughts Core - Tic-tac-toe engine and AI
//!
//! This crate provides the game logic for noughts and crosses:
//! - Board state and rules (legal moves, wins, draws)
//! - Game state with explicit turn tracking
//! - Exhaustive minimax AI with optional alpha-beta pruning
//! - Event-driven human vs computer sessions
//! - Pluggable strategies for automated matches

pub mod error;
pub mod board;
pub mod game;
pub mod ai;
pub mod config;
pub mod session;
pub mod strategy;

// Re-exports for convenient access
pub use error::{EngineError, IllegalMoveReason, ParseBoardError};
pub use board::{Board, Cell, Mark, CELL_COUNT, WINNING_LINES};
pub use game::{GameOutcome, GameState};
pub use ai::{MinimaxAI, Scoring, DRAW_SCORE, LOSS_SCORE, WIN_SCORE, DEPTH_WEIGHT};
pub use config::{MatchConfig, Side};
pub use session::{EventSink, GameEvent, Session};
pub use strategy::{play_out, GameRecord, RandomMover, Strategy};
