//! Engine-vs-engine tic-tac-toe matches and algorithm comparison.
//!
//! `play` pits two search configurations against each other and can save
//! every game in MessagePack format. `analyze` runs every algorithm on one
//! position and prints what each of them found.

mod arena;

use anyhow::{Context, Result};
use arena::{Contestant, MatchSummary};
use clap::{Parser, Subcommand, ValueEnum};
use gametree_core::Score;
use gametree_search::games::{TicTacToe, TicTacToeState};
use gametree_search::{Algorithm, Engine, Perspective, SearchConfig, SearchStats};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Game-tree search self-play and analysis tool.
#[derive(Parser)]
#[command(name = "gametree-selfplay")]
#[command(about = "Play and compare game-tree search algorithms on tic-tac-toe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match between two engines.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Output directory for game records (not saved if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Algorithm for X.
        #[arg(long, default_value = "fail_soft_alpha_beta")]
        x_algorithm: Algorithm,

        /// Search depth for X.
        #[arg(long, default_value = "9")]
        x_depth: usize,

        /// Branch limit for X (branch-limited algorithms only).
        #[arg(long, default_value = "5")]
        x_branch_limit: usize,

        /// Algorithm for O.
        #[arg(long, default_value = "branching_limit")]
        o_algorithm: Algorithm,

        /// Search depth for O.
        #[arg(long, default_value = "3")]
        o_depth: usize,

        /// Branch limit for O (branch-limited algorithms only).
        #[arg(long, default_value = "5")]
        o_branch_limit: usize,

        /// Side whose view the leaves are scored from.
        #[arg(long, value_enum, default_value = "root")]
        perspective: PerspectiveArg,

        /// Abort any single search that visits more nodes than this.
        #[arg(long)]
        max_nodes: Option<u64>,
    },

    /// Run every algorithm on one position.
    Analyze {
        /// Moves played so far, as comma-separated cell indices (e.g. "4,0,8").
        #[arg(short, long, default_value = "")]
        moves: String,

        /// Search depth.
        #[arg(short, long, default_value = "9")]
        depth: usize,

        /// Branch limit for the branch-limited algorithms.
        #[arg(long, default_value = "5")]
        branch_limit: usize,

        /// Side whose view the leaves are scored from.
        #[arg(long, value_enum, default_value = "root")]
        perspective: PerspectiveArg,

        /// Random seed for tie-breaking.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PerspectiveArg {
    /// Every leaf scored for the player to move there.
    Mover,
    /// Every leaf scored for the player to move at the root.
    Root,
}

impl From<PerspectiveArg> for Perspective {
    fn from(arg: PerspectiveArg) -> Self {
        match arg {
            PerspectiveArg::Mover => Perspective::Mover,
            PerspectiveArg::Root => Perspective::Root,
        }
    }
}

/// The analyzed position and the depth actually searched.
struct Analysis {
    state: TicTacToeState,
    depth: usize,
    rows: Vec<AnalysisRow>,
}

/// What one algorithm found on the analyzed position.
struct AnalysisRow {
    algorithm: Algorithm,
    value: Score,
    cell: Option<u8>,
    fallback: bool,
    stats: SearchStats,
}

/// Parse a comma-separated list of cell indices.
fn parse_moves(moves: &str) -> Result<Vec<u8>> {
    moves
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| {
            m.parse::<u8>().with_context(|| format!("Invalid cell index: {:?}", m))
        })
        .collect()
}

/// Run every algorithm on the position reached by `moves`, searching no
/// deeper than the number of empty cells.
fn analyze(
    moves: &[u8],
    depth: usize,
    branch_limit: usize,
    perspective: Perspective,
    seed: u64,
) -> Result<Analysis> {
    let game = TicTacToe;
    let state = game
        .replay(moves)
        .with_context(|| format!("Illegal move sequence: {:?}", moves))?;
    let depth = depth.min(game.legal_actions(&state).len());

    let mut rows = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let config = SearchConfig::new(algorithm)
            .with_branch_limit(branch_limit)
            .with_perspective(perspective);
        let engine = Engine::for_rules(config, game)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = engine
            .find_best_move_with_rng(&state, depth, &mut rng)
            .with_context(|| format!("{} failed", algorithm))?;

        rows.push(AnalysisRow {
            algorithm,
            value: result.value,
            cell: result.best_move().and_then(|s| s.last_move()).map(|a| a.0),
            fallback: result.is_fallback(),
            stats: result.stats,
        });
    }
    Ok(Analysis { state, depth, rows })
}

/// Run the play command.
fn cmd_play(
    games: usize,
    output: Option<PathBuf>,
    seed: u64,
    x: (Algorithm, usize, usize),
    o: (Algorithm, usize, usize),
    perspective: Perspective,
    max_nodes: Option<u64>,
) -> Result<()> {
    let contestant = |(algorithm, depth, branch_limit): (Algorithm, usize, usize)| {
        let mut config = SearchConfig::new(algorithm)
            .with_branch_limit(branch_limit)
            .with_perspective(perspective);
        if let Some(limit) = max_nodes {
            config = config.with_max_nodes(limit);
        }
        Contestant::new(config, depth)
    };
    let (x, o) = (contestant(x)?, contestant(o)?);

    println!("Playing {} games: X = {} vs O = {}", games, x.label(), o.label());
    println!("Seed: {}", seed);
    info!(games, seed, x = %x.label(), o = %o.label(), "match started");

    let start = Instant::now();
    let records = arena::play_match(&x, &o, games, seed)?;
    let elapsed = start.elapsed();

    if let Some(dir) = &output {
        arena::write_records(dir, &records)?;
        println!("Files saved to: {:?}", dir);
    }

    let summary = MatchSummary::from_records(&records);
    let avg_moves = summary.total_moves as f64 / summary.games().max(1) as f64;

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("Average game length: {:.1} moves", avg_moves);
    println!(
        "Outcomes: X wins: {}, O wins: {}, Draws: {}",
        summary.x_wins, summary.o_wins, summary.draws
    );

    Ok(())
}

/// Run the analyze command.
fn cmd_analyze(
    moves: &str,
    depth: usize,
    branch_limit: usize,
    perspective: Perspective,
    seed: u64,
) -> Result<()> {
    let moves = parse_moves(moves)?;
    let Analysis { state, depth, rows } = analyze(&moves, depth, branch_limit, perspective, seed)?;

    println!("{}", state);
    println!("{} to move, depth {}", state.current_player(), depth);
    println!("================================================");
    for row in rows {
        let cell = row
            .cell
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "{:<28} value {:>7}  move {:>2}  nodes {:>7}  cutoffs {:>5}{}",
            row.algorithm.tag(),
            row.value.to_string(),
            cell,
            row.stats.nodes,
            row.stats.cutoffs,
            if row.fallback { "  (fallback)" } else { "" }
        );
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            games,
            output,
            seed,
            x_algorithm,
            x_depth,
            x_branch_limit,
            o_algorithm,
            o_depth,
            o_branch_limit,
            perspective,
            max_nodes,
        } => cmd_play(
            games,
            output,
            seed,
            (x_algorithm, x_depth, x_branch_limit),
            (o_algorithm, o_depth, o_branch_limit),
            perspective.into(),
            max_nodes,
        ),

        Commands::Analyze {
            moves,
            depth,
            branch_limit,
            perspective,
            seed,
        } => cmd_analyze(&moves, depth, branch_limit, perspective.into(), seed),
    }
}
