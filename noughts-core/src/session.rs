//! Interactive session - turn sequencing between a human and the computer
//!
//! The session owns the only copy of the game state. A presentation layer
//! feeds it human moves and renders whatever events come back; it never
//! decides anything about the board itself.

use std::thread;
use std::time::Duration;

use crate::ai::MinimaxAI;
use crate::board::Mark;
use crate::config::MatchConfig;
use crate::error::{EngineError, IllegalMoveReason, Result};
use crate::game::{GameOutcome, GameState};

// ============================================================================
// EVENTS
// ============================================================================

/// Something the presentation layer should reflect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh, empty board
    NewGame,
    /// A mark was placed, by either side
    MoveApplied { index: usize, mark: Mark },
    /// Play passes to `Mark`
    TurnChanged(Mark),
    /// The game is decided: `Win` or `Draw`
    GameOver(GameOutcome),
}

/// Receiver of session events, in order
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Human vs computer game session
pub struct Session {
    config: MatchConfig,
    state: GameState,
    ai: MinimaxAI,
}

impl Session {
    /// Create a session. The board is empty but the game has not started:
    /// call `new_game` to let a computer first mover play.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let state = GameState::new(config.first_mark());
        let ai = config.build_ai();
        Ok(Self { config, state, ai })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    /// True when the human may move
    pub fn awaiting_human(&self) -> bool {
        !self.outcome().is_over() && self.state.to_move() == self.config.human_mark
    }

    /// Reset the board and, if the computer opens, play its first move
    pub fn new_game(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.state = GameState::new(self.config.first_mark());
        tracing::info!(
            human = %self.config.human_mark,
            computer = %self.config.computer_mark,
            first = ?self.config.first_mover,
            "new game"
        );

        sink.emit(GameEvent::NewGame);
        sink.emit(GameEvent::TurnChanged(self.state.to_move()));

        if self.state.to_move() == self.config.computer_mark {
            self.pause();
            self.computer_move(sink)?;
        }
        Ok(())
    }

    /// Same as `new_game`; separate entry point for an explicit restart
    pub fn restart(&mut self, sink: &mut impl EventSink) -> Result<()> {
        tracing::info!("restart requested");
        self.new_game(sink)
    }

    /// Apply the human's move, then the computer's reply if the game goes on.
    ///
    /// An illegal move is rejected before anything is emitted and the state
    /// is left as it was.
    pub fn human_move(&mut self, index: usize, sink: &mut impl EventSink) -> Result<()> {
        if self.outcome().is_over() {
            return Err(EngineError::IllegalMove {
                index,
                reason: IllegalMoveReason::GameOver,
            });
        }
        if self.state.to_move() != self.config.human_mark {
            return Err(EngineError::IllegalMove {
                index,
                reason: IllegalMoveReason::NotYourTurn,
            });
        }

        if self.apply(index, sink)? {
            return Ok(());
        }

        self.pause();
        self.computer_move(sink)
    }

    /// Display pacing before any computer move
    fn pause(&self) {
        if self.config.computer_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.computer_delay_ms));
        }
    }

    fn computer_move(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let mark = self.config.computer_mark;
        let index = self.ai.best_move(self.state.board(), mark)?;
        tracing::debug!(index, nodes = self.ai.nodes_searched(), "computer move");
        self.apply(index, sink)?;
        Ok(())
    }

    /// Apply a move for the side to play and emit its events.
    /// Returns true when the move ended the game.
    fn apply(&mut self, index: usize, sink: &mut impl EventSink) -> Result<bool> {
        let mark = self.state.to_move();
        let outcome = self.state.play(index)?;
        sink.emit(GameEvent::MoveApplied { index, mark });

        if outcome.is_over() {
            tracing::info!(?outcome, "game over");
            sink.emit(GameEvent::GameOver(outcome));
            return Ok(true);
        }

        sink.emit(GameEvent::TurnChanged(self.state.to_move()));
        Ok(false)
    }
}

// ============================================================================
// TESTS
// ============================================================================
