//! Engine-vs-engine tic-tac-toe matches.
//!
//! Each game is played between two configured engines and recorded move by
//! move, with the value and effort of every search, so that algorithms can
//! be compared offline.

use anyhow::{bail, Context, Result};
use gametree_core::Rules;
use gametree_search::games::{Player, TicTacToe, TicTacToeState};
use gametree_search::{Engine, GuidanceFallback, SearchConfig, SearchStats};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// One side of a match: an engine and how deep it looks.
pub struct Contestant {
    engine: Engine<TicTacToeState>,
    depth: usize,
}

impl Contestant {
    /// Build a contestant, validating its search configuration.
    ///
    /// A contestant must look at least one ply ahead to pick a move.
    pub fn new(config: SearchConfig, depth: usize) -> Result<Self> {
        let algorithm = config.algorithm;
        if depth == 0 {
            bail!("Search depth for {} must be at least 1", algorithm);
        }
        let engine = Engine::for_rules(config, TicTacToe)
            .with_context(|| format!("Invalid configuration for {}", algorithm))?;
        Ok(Self { engine, depth })
    }

    /// Short label such as `fail_soft_alpha_beta@9`.
    pub fn label(&self) -> String {
        format!("{}@{}", self.engine.algorithm(), self.depth)
    }

    fn choose(
        &self,
        state: &TicTacToeState,
        rng: &mut ChaCha8Rng,
    ) -> Result<(TicTacToeState, MoveStep)> {
        // Never search past the end of the game.
        let depth = self.depth.min(TicTacToe.legal_actions(state).len());
        let result = self.engine.find_best_move_with_rng(state, depth, rng)?;

        let (value, stats, fallback) = (result.value.get(), result.stats, result.fallback);

        let Some(next) = result.into_best_move() else {
            bail!("{} returned no move in a live position:\n{}", self.label(), state);
        };
        let Some(cell) = next.last_move() else {
            bail!("{} returned the position it was given", self.label());
        };

        let step = MoveStep {
            cell: cell.0,
            value,
            stats,
            fallback,
        };
        Ok((next, step))
    }
}

/// A single move in a game record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveStep {
    /// Cell index played (0-8).
    pub cell: u8,

    /// Root value reported by the search that chose it.
    pub value: f64,

    /// Effort spent by that search.
    pub stats: SearchStats,

    /// Set when a guidance hook fell back to branch-limited search.
    pub fallback: Option<GuidanceFallback>,
}

/// A complete game.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameRecord {
    /// Moves in order, X first.
    pub steps: Vec<MoveStep>,

    /// Game outcome: +1 (X wins), -1 (O wins), 0 (draw).
    pub outcome: f32,

    /// Seed, contestant labels and configs, and game length.
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Play one game from the empty board.
pub fn play_game(x: &Contestant, o: &Contestant, seed: u64) -> Result<GameRecord> {
    let game = TicTacToe;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.initial_state();
    let mut steps = Vec::new();

    while !game.is_terminal(&state) {
        let mover = match state.current_player() {
            Player::X => x,
            Player::O => o,
        };
        let (next, step) = mover
            .choose(&state, &mut rng)
            .with_context(|| format!("Search failed after {} moves", steps.len()))?;
        state = next;
        steps.push(step);
    }

    let outcome = match state.winner() {
        Some(Player::X) => 1.0,
        Some(Player::O) => -1.0,
        None => 0.0,
    };
    debug!(seed, moves = steps.len(), outcome, "game finished");

    let mut metadata = HashMap::new();
    metadata.insert("seed".to_string(), serde_json::json!(seed));
    metadata.insert("moves".to_string(), serde_json::json!(steps.len()));
    metadata.insert("x".to_string(), serde_json::json!(x.label()));
    metadata.insert("o".to_string(), serde_json::json!(o.label()));
    metadata.insert("x_config".to_string(), serde_json::to_value(x.engine.config())?);
    metadata.insert("o_config".to_string(), serde_json::to_value(o.engine.config())?);

    Ok(GameRecord {
        steps,
        outcome,
        metadata,
    })
}

/// Play `games` independent games in parallel, game `i` seeded from
/// `seed + i * 1000`.
pub fn play_match(
    x: &Contestant,
    o: &Contestant,
    games: usize,
    seed: u64,
) -> Result<Vec<GameRecord>> {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_game(x, o, game_seed).with_context(|| format!("Game {} failed", i))
        })
        .collect()
}

/// Win/draw counts over a set of games.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl MatchSummary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            if record.outcome > 0.5 {
                summary.x_wins += 1;
            } else if record.outcome < -0.5 {
                summary.o_wins += 1;
            } else {
                summary.draws += 1;
            }
            summary.total_moves += record.steps.len();
            summary
        })
    }

    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Save each record to its own MessagePack file in `output`.
pub fn write_records(output: &Path, records: &[GameRecord]) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;

    for (i, record) in records.iter().enumerate() {
        let filename = output.join(format!("game_{:06}.msgpack", i));
        let file = File::create(&filename)
            .with_context(|| format!("Failed to create file: {:?}", filename))?;
        let mut writer = BufWriter::new(file);
        // Named fields keep structs as maps for other readers
        rmp_serde::encode::write_named(&mut writer, record)
            .with_context(|| format!("Failed to serialize game {}", i))?;
    }
    Ok(())
}
