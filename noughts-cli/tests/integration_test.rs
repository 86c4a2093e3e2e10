//! Integration tests for the noughts engine
//!
//! Tests the full stack: board rules, game state, minimax AI and sessions

use std::collections::HashSet;

use noughts_core::{
    Board, GameEvent, GameOutcome, GameState, Mark, MatchConfig, MinimaxAI, Scoring, Session,
    Side, WINNING_LINES,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

/// Every position reachable from an empty board with X opening, including
/// finished ones
fn reachable_positions() -> Vec<Board> {
    fn walk(state: GameState, seen: &mut HashSet<Board>, out: &mut Vec<Board>) {
        if !seen.insert(*state.board()) {
            return;
        }
        out.push(*state.board());
        for index in state.legal_moves() {
            let mut next = state;
            next.play(index).unwrap();
            walk(next, seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(GameState::new(Mark::X), &mut seen, &mut out);
    out
}

/// Random non-terminal position after a few random moves
fn random_position(rng: &mut ChaCha8Rng) -> GameState {
    loop {
        let mut state = GameState::new(Mark::X);
        let plies = rng.gen_range(0..7);
        for _ in 0..plies {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            state.play(moves[rng.gen_range(0..moves.len())]).unwrap();
        }
        if !state.outcome().is_over() {
            return state;
        }
    }
}

/// Whether placing `mark` at `index` finishes a line
fn completes_line(board: &Board, index: usize, mark: Mark) -> bool {
    WINNING_LINES.iter().any(|line| {
        line.contains(&index)
            && line
                .iter()
                .filter(|&&i| i != index)
                .all(|&i| board.cell(i).and_then(|c| c.mark()) == Some(mark))
    })
}

/// Let the opponent try every line against `ai_mark`; return (wins, draws, losses)
fn explore_all_opponent_lines(state: GameState, ai_mark: Mark, ai: &mut MinimaxAI) -> (u32, u32, u32) {
    match state.outcome() {
        GameOutcome::Win(mark) if mark == ai_mark => return (1, 0, 0),
        GameOutcome::Win(_) => return (0, 0, 1),
        GameOutcome::Draw => return (0, 1, 0),
        GameOutcome::InProgress => {}
    }

    if state.to_move() == ai_mark {
        let index = ai.best_move(state.board(), ai_mark).unwrap();
        let mut next = state;
        next.play(index).unwrap();
        return explore_all_opponent_lines(next, ai_mark, ai);
    }

    let mut totals = (0, 0, 0);
    for index in state.legal_moves() {
        let mut next = state;
        next.play(index).unwrap();
        let (w, d, l) = explore_all_opponent_lines(next, ai_mark, ai);
        totals = (totals.0 + w, totals.1 + d, totals.2 + l);
    }
    totals
}

// ============================================================================
// BOARD RULE PROPERTIES
// ============================================================================

#[test]
fn test_win_iff_move_completes_line() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..300 {
        let state = random_position(&mut rng);
        let b = *state.board();
        for mark in [Mark::X, Mark::O] {
            for index in b.available_moves() {
                let after = b.apply_move(index, mark).unwrap();
                assert_eq!(
                    after.check_win(mark),
                    completes_line(&b, index, mark),
                    "board {} index {} mark {}",
                    b.to_compact(),
                    index,
                    mark
                );
            }
        }
    }
}

#[test]
fn test_available_moves_shrink_by_one() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    for _ in 0..300 {
        let state = random_position(&mut rng);
        let b = *state.board();
        let before = b.available_moves();
        let index = before[rng.gen_range(0..before.len())];
        let after = b.apply_move(index, state.to_move()).unwrap().available_moves();
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.contains(&index));
    }
}

#[test]
fn test_draw_never_coexists_with_win() {
    let positions = reachable_positions();
    // 5478 legal positions in tic-tac-toe
    assert_eq!(positions.len(), 5478);
    for b in positions {
        if b.is_draw() {
            assert!(!b.check_win(Mark::X) && !b.check_win(Mark::O), "{}", b.to_compact());
        }
    }
}

#[test]
fn test_full_board_draw_scenario() {
    let b = board("XOXXOOOXX");
    assert!(b.is_draw());
    assert!(!b.check_win(Mark::X));
    assert!(!b.check_win(Mark::O));
    assert_eq!(GameOutcome::of(&b), GameOutcome::Draw);
}

// ============================================================================
// MINIMAX AI TESTS
// ============================================================================

#[test]
fn test_empty_board_opening() {
    let mut ai = MinimaxAI::new();
    let index = ai.best_move(&Board::new(), Mark::O).unwrap();
    assert!([0, 2, 4, 6, 8].contains(&index));
    assert_eq!(index, 0);
}

#[test]
fn test_immediate_win_scenario() {
    let mut ai = MinimaxAI::new();
    assert_eq!(ai.best_move(&board("XX.OO...."), Mark::X).unwrap(), 2);
}

#[test]
fn test_forced_block_scenario() {
    let mut ai = MinimaxAI::new();
    assert_eq!(ai.best_move(&board("OO..X...."), Mark::X).unwrap(), 2);
}

#[test]
fn test_best_move_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut ai = MinimaxAI::new();
    for _ in 0..50 {
        let state = random_position(&mut rng);
        let first = ai.best_move(state.board(), state.to_move()).unwrap();
        let second = ai.best_move(state.board(), state.to_move()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_pruning_parity_on_reachable_positions() {
    let mut pruned = MinimaxAI::with_options(Scoring::Perfect, true);
    let mut full = MinimaxAI::with_options(Scoring::Perfect, false);
    let mut legacy_pruned = MinimaxAI::with_options(Scoring::Legacy, true);
    let mut legacy_full = MinimaxAI::with_options(Scoring::Legacy, false);

    for b in reachable_positions() {
        let empties = b.available_moves().len();
        if b.is_terminal() || empties > 6 {
            continue;
        }
        let mark = GameState::from_board(b, Mark::X).unwrap().to_move();
        assert_eq!(
            pruned.best_move(&b, mark).unwrap(),
            full.best_move(&b, mark).unwrap(),
            "perfect {}",
            b.to_compact()
        );
        assert_eq!(
            legacy_pruned.best_move(&b, mark).unwrap(),
            legacy_full.best_move(&b, mark).unwrap(),
            "legacy {}",
            b.to_compact()
        );
    }
}

#[test]
fn test_never_loses_against_any_line() {
    let mut ai = MinimaxAI::new();
    for first in [Mark::X, Mark::O] {
        for ai_mark in [Mark::X, Mark::O] {
            let (wins, draws, losses) =
                explore_all_opponent_lines(GameState::new(first), ai_mark, &mut ai);
            assert_eq!(losses, 0, "first {} ai {}", first, ai_mark);
            assert!(wins + draws > 0);
        }
    }
}

#[test]
fn test_legacy_scoring_can_be_beaten() {
    let mut ai = MinimaxAI::with_options(Scoring::Legacy, true);
    let (_, _, losses) = explore_all_opponent_lines(GameState::new(Mark::X), Mark::O, &mut ai);
    assert!(losses > 0);
}

#[test]
fn test_self_play_draws() {
    for first in [Mark::X, Mark::O] {
        let mut ai = MinimaxAI::new();
        let (final_state, history) = ai.play_game(GameState::new(first));
        assert_eq!(final_state.outcome(), GameOutcome::Draw);
        assert_eq!(history.len(), 9);
    }
}

// ============================================================================
// SESSION TESTS
// ============================================================================

#[test]
fn test_session_random_human_never_wins() {
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    for game in 0..40 {
        let config = MatchConfig {
            human_mark: if game % 2 == 0 { Mark::X } else { Mark::O },
            computer_mark: if game % 2 == 0 { Mark::O } else { Mark::X },
            first_mover: if game % 4 < 2 { Side::Human } else { Side::Computer },
            ..MatchConfig::default()
        };
        let human = config.human_mark;
        let mut session = Session::new(config).unwrap();
        let mut events = Vec::new();
        session.new_game(&mut events).unwrap();

        while session.awaiting_human() {
            let moves = session.state().board().available_moves();
            let index = moves[rng.gen_range(0..moves.len())];
            session.human_move(index, &mut events).unwrap();
        }

        assert!(session.outcome().is_over());
        assert_ne!(session.outcome(), GameOutcome::Win(human));
        assert_eq!(events.last(), Some(&GameEvent::GameOver(session.outcome())));

        // Replaying the MoveApplied events rebuilds the session's board
        let mut replay = Board::new();
        for event in &events {
            if let GameEvent::MoveApplied { index, mark } = *event {
                replay = replay.apply_move(index, mark).unwrap();
            }
        }
        assert_eq!(&replay, session.state().board());
    }
}

#[test]
fn test_session_turn_events_alternate() {
    let mut session = Session::new(MatchConfig::default()).unwrap();
    let mut events = Vec::new();
    session.new_game(&mut events).unwrap();
    session.human_move(4, &mut events).unwrap();

    let turns: Vec<Mark> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnChanged(mark) => Some(*mark),
            _ => None,
        })
        .collect();
    assert_eq!(turns, vec![Mark::X, Mark::O, Mark::X]);
}
