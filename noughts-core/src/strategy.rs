//! Move strategies and whole-game runs between them

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai::MinimaxAI;
use crate::board::Mark;
use crate::error::{EngineError, Result};
use crate::game::{GameOutcome, GameState};

/// Anything that can pick a move for the side to play
pub trait Strategy {
    fn name(&self) -> &str;

    fn choose_move(&mut self, state: &GameState) -> Result<usize>;
}

impl Strategy for MinimaxAI {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<usize> {
        if state.outcome().is_over() {
            return Err(EngineError::InvalidState("game is already over".to_string()));
        }
        self.best_move(state.board(), state.to_move())
    }
}

/// Uniformly random legal moves
pub struct RandomMover {
    rng: ChaCha8Rng,
}

impl RandomMover {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Strategy for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(EngineError::InvalidState("no legal moves".to_string()));
        }
        Ok(moves[self.rng.gen_range(0..moves.len())])
    }
}

/// Record of one finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<usize>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }
}

/// Play `initial` to the end, `x` moving for X and `o` for O
pub fn play_out(
    initial: GameState,
    x: &mut dyn Strategy,
    o: &mut dyn Strategy,
) -> Result<GameRecord> {
    let mut state = initial;
    let mut moves = Vec::new();

    while !state.outcome().is_over() {
        let index = match state.to_move() {
            Mark::X => x.choose_move(&state)?,
            Mark::O => o.choose_move(&state)?,
        };
        state.play(index)?;
        moves.push(index);
    }

    Ok(GameRecord {
        outcome: state.outcome(),
        moves,
    })
}
