//! Tests verifying full-depth search plays tic-tac-toe perfectly.
//!
//! Perfect play in tic-tac-toe means:
//! - Never losing against any opponent
//! - Taking an immediate win when one is on the board
//! - Drawing against another perfect player
//!
//! Every engine here scores leaves from the root player's side
//! (`Perspective::Root`) and searches to the end of the game.

use gametree_core::{Rules, Score};
use gametree_search::games::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
use gametree_search::{Algorithm, Engine, Perspective, SearchConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cells left to fill, which bounds the remaining game length.
fn remaining(state: &TicTacToeState) -> usize {
    (0..9).filter(|&c| state.get(c).is_none()).count()
}

fn create_engine(algorithm: Algorithm) -> Engine<TicTacToeState> {
    let config = SearchConfig::new(algorithm).with_perspective(Perspective::Root);
    Engine::for_rules(config, TicTacToe).unwrap()
}

/// Let the engine pick the next position.
fn engine_move(
    engine: &Engine<TicTacToeState>,
    state: &TicTacToeState,
    rng: &mut ChaCha8Rng,
) -> TicTacToeState {
    engine
        .find_best_move_with_rng(state, remaining(state), rng)
        .unwrap()
        .into_best_move()
        .expect("non-terminal position has a move")
}

/// Pick a uniformly random legal move.
fn random_move(game: &TicTacToe, state: &TicTacToeState, rng: &mut ChaCha8Rng) -> TicTacToeState {
    let actions = game.legal_actions(state);
    let idx = rng.gen_range(0..actions.len());
    game.apply(state, actions[idx])
}

/// Play one game and return the final position.
fn play_against_random(engine_side: Player, seed: u64) -> TicTacToeState {
    let game = TicTacToe;
    let engine = create_engine(Algorithm::FailSoftAlphaBeta);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut state = game.initial_state();
    while !game.is_terminal(&state) {
        state = if state.current_player() == engine_side {
            engine_move(&engine, &state, &mut rng)
        } else {
            random_move(&game, &state, &mut rng)
        };
    }
    state
}

#[test]
fn test_engine_never_loses_as_x() {
    for seed in 0..20 {
        let state = play_against_random(Player::X, seed);
        assert_ne!(
            state.winner(),
            Some(Player::O),
            "engine (X) lost game with seed {}. Final state:\n{}",
            seed,
            state
        );
    }
}

#[test]
fn test_engine_never_loses_as_o() {
    for seed in 0..20 {
        let state = play_against_random(Player::O, seed + 1000);
        assert_ne!(
            state.winner(),
            Some(Player::X),
            "engine (O) lost game with seed {}. Final state:\n{}",
            seed,
            state
        );
    }
}

/// Fail-soft against fail-hard: two perfect players always draw.
#[test]
fn test_engine_vs_engine_always_draws() {
    let game = TicTacToe;
    let x = create_engine(Algorithm::FailSoftAlphaBeta);
    let o = create_engine(Algorithm::FailHardAlphaBeta);

    for seed in 0..5 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = game.initial_state();

        while !game.is_terminal(&state) {
            let engine = match state.current_player() {
                Player::X => &x,
                Player::O => &o,
            };
            state = engine_move(engine, &state, &mut rng);
        }

        assert!(
            state.winner().is_none(),
            "engine vs engine should draw, seed {}. Final state:\n{}",
            seed,
            state
        );
    }
}

#[test]
fn test_takes_immediate_win() {
    let game = TicTacToe;
    // X . X
    // O O .
    // . . .
    let state = game.replay(&[0, 3, 2, 4]).unwrap();

    for algorithm in Algorithm::ALL {
        let config = SearchConfig::new(algorithm)
            .with_perspective(Perspective::Root)
            .with_branch_limit(9);
        let engine = Engine::for_rules(config, TicTacToe).unwrap();
        let result = engine.find_best_move(&state, 1).unwrap();

        assert_eq!(result.value, Score::WIN, "{}", algorithm);
        assert_eq!(
            result.best_move().and_then(|s| s.last_move()),
            Some(TicTacToeAction(1)),
            "{} missed the win",
            algorithm
        );
    }
}

#[test]
fn test_blocks_open_line() {
    let game = TicTacToe;
    // X X .
    // . O .
    // . . .
    let state = game.replay(&[0, 4, 1]).unwrap();

    for algorithm in [
        Algorithm::Minimax,
        Algorithm::FailHardAlphaBeta,
        Algorithm::FailSoftAlphaBeta,
    ] {
        let result = create_engine(algorithm)
            .find_best_move(&state, remaining(&state))
            .unwrap();

        // Blocking leads to a forced draw; anything else loses.
        assert_eq!(result.value, Score::DRAW, "{}", algorithm);
        assert_eq!(
            result.best_move().and_then(|s| s.last_move()),
            Some(TicTacToeAction(2)),
            "{} failed to block",
            algorithm
        );
    }
}

#[test]
fn test_empty_board_is_a_draw() {
    let game = TicTacToe;
    let state = game.initial_state();

    for algorithm in [Algorithm::FailHardAlphaBeta, Algorithm::FailSoftAlphaBeta] {
        let result = create_engine(algorithm).find_best_move(&state, 9).unwrap();
        assert_eq!(result.value, Score::DRAW, "{}", algorithm);
    }

    // Plain minimax agrees once the first two moves are on the board.
    let opened = game.replay(&[4, 0]).unwrap();
    let result = create_engine(Algorithm::Minimax)
        .find_best_move(&opened, 7)
        .unwrap();
    assert_eq!(result.value, Score::DRAW);
}

#[test]
fn test_seeded_play_is_reproducible() {
    let first = play_against_random(Player::X, 77);
    let second = play_against_random(Player::X, 77);
    assert_eq!(first, second);
}

/// Scoring every leaf for the player to move at that leaf makes a one-ply
/// search read the opponent's loss as its own.
#[test]
fn test_mover_perspective_scores_leaves_raw() {
    let game = TicTacToe;
    let state = game.replay(&[0, 3, 2, 4]).unwrap();

    let engine = Engine::for_rules(SearchConfig::new(Algorithm::Minimax), TicTacToe).unwrap();
    let result = engine.find_best_move(&state, 1).unwrap();

    assert!(!result.value.is_decisive());
    assert_ne!(
        result.best_move().and_then(|s| s.last_move()),
        Some(TicTacToeAction(1))
    );
}
