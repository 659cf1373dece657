//! Chess CLI
//!
//! List legal moves, run searches and perft counts, or play moves against
//! the minimax engine from the command line.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chess_engine::{
    Engine, EngineConfig, Game, MinimaxEngine, MoveRequest, Outcome, SearchLimits, Square, divide,
    perft,
};

#[derive(Parser)]
#[command(name = "chess_cli", version)]
#[command(about = "Chess rules engine and minimax search", long_about = None)]
struct Cli {
    /// TOML engine configuration; flags given on the command line win
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List legal moves of the side to move, or of one piece
    Moves {
        #[arg(long)]
        fen: Option<String>,
        /// Only moves of the piece on this square, e.g. e2
        #[arg(long)]
        square: Option<String>,
    },
    /// Search for the best move
    Search(SearchArgs),
    /// Count leaf positions of the move tree
    Perft {
        #[arg(long)]
        fen: Option<String>,
        #[arg(short, long)]
        depth: u8,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Apply moves, then let the engine reply
    Play {
        #[arg(long)]
        fen: Option<String>,
        /// Coordinate moves such as e2e4 e7e8q
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
        #[arg(short, long)]
        depth: Option<u8>,
    },
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    fen: Option<String>,
    #[arg(short, long)]
    depth: Option<u8>,
    #[arg(long)]
    no_alpha_beta: bool,
    #[arg(long)]
    no_ordering: bool,
    /// Split the root moves across threads
    #[arg(long)]
    parallel: bool,
    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SearchReport {
    engine: String,
    fen: String,
    best_move: Option<String>,
    score: i32,
    depth: u8,
    nodes: u64,
    stopped: bool,
    elapsed_ms: u128,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Moves { fen, square } => run_moves(&config, fen.as_deref(), square.as_deref()),
        Command::Search(args) => run_search(config, args),
        Command::Perft { fen, depth, divide } => run_perft(&config, fen.as_deref(), depth, divide),
        Command::Play { fen, moves, depth } => run_play(config, fen.as_deref(), &moves, depth),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            debug!(?config, "loaded configuration");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_game(config: &EngineConfig, fen: Option<&str>) -> Result<Game> {
    let game = match fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid position {fen:?}"))?,
        None => Game::new(),
    };
    Ok(game.with_config(config.game))
}

fn run_moves(config: &EngineConfig, fen: Option<&str>, square: Option<&str>) -> Result<()> {
    let mut game = load_game(config, fen)?;
    let moves = match square {
        Some(text) => {
            let from = Square::from_algebraic(text).with_context(|| format!("bad square {text:?}"))?;
            game.moves_for_piece(from)
        }
        None => game.legal_moves(),
    };
    for mv in &moves {
        println!("{mv}");
    }
    info!(count = moves.len(), "legal moves");
    Ok(())
}

fn run_search(mut config: EngineConfig, args: SearchArgs) -> Result<()> {
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if args.no_alpha_beta {
        config.search.alpha_beta = false;
    }
    if args.no_ordering {
        config.search.move_ordering = false;
    }
    if args.parallel {
        config.search.parallel = true;
    }
    if args.time_ms.is_some() {
        config.search.time_limit_ms = args.time_ms;
    }
    config.validate()?;

    let game = load_game(&config, args.fen.as_deref())?;
    let mut engine = MinimaxEngine::new(config.search.clone());
    let limits = SearchLimits::from_config(&config.search);
    let clock = limits.time_control.clone();
    let result = engine.search(&game, limits);
    let elapsed = clock.elapsed();

    let report = SearchReport {
        engine: engine.name().to_string(),
        fen: game.to_fen(),
        best_move: result.best_move.map(|mv| mv.to_string()),
        score: result.score,
        depth: result.depth,
        nodes: result.nodes,
        stopped: result.stopped,
        elapsed_ms: elapsed.as_millis(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.best_move {
            Some(mv) => println!("bestmove {mv}"),
            None => println!("bestmove (none)"),
        }
        println!("score {}", report.score);
        println!(
            "depth {} nodes {} time {:.3?}{}",
            report.depth,
            report.nodes,
            elapsed,
            if report.stopped { " (stopped)" } else { "" }
        );
    }
    Ok(())
}

fn run_perft(config: &EngineConfig, fen: Option<&str>, depth: u8, split: bool) -> Result<()> {
    let mut game = load_game(config, fen)?;
    let start = Instant::now();
    let (split_counts, nodes) = count_nodes(&mut game, depth, split);
    let elapsed = start.elapsed();
    if !split_counts.is_empty() {
        for line in &split_counts {
            println!("{line}");
        }
        println!();
    }
    println!("Nodes: {nodes}");
    info!(depth, nodes, ?elapsed, "perft finished");
    Ok(())
}

/// Leaf count at `depth`, with one `move: count` line per root move when
/// `split` is set.
fn count_nodes(game: &mut Game, depth: u8, split: bool) -> (Vec<String>, u64) {
    // Depth 0 has no root moves to split, the count is the position itself.
    if !split || depth == 0 {
        return (Vec::new(), perft(game, depth));
    }
    let counts = divide(game, depth);
    let nodes = counts.iter().map(|(_, count)| count).sum();
    let lines = counts
        .iter()
        .map(|(mv, count)| format!("{mv}: {count}"))
        .collect();
    (lines, nodes)
}

fn run_play(
    mut config: EngineConfig,
    fen: Option<&str>,
    moves: &[String],
    depth: Option<u8>,
) -> Result<()> {
    if let Some(depth) = depth {
        config.search.depth = depth;
    }
    config.validate()?;

    let mut game = load_game(&config, fen)?;
    for text in moves {
        let request: MoveRequest = text.parse()?;
        game.play(request)
            .ok_or_else(|| anyhow!("illegal move {text} in {}", game.to_fen()))?;
    }

    if game.is_game_over() {
        info!("game already over, engine does not reply");
    } else {
        let mut engine = MinimaxEngine::new(config.search.clone());
        engine.new_game();
        let result = engine.search(&game, SearchLimits::from_config(&config.search));
        let Some(reply) = result.best_move else {
            bail!("engine found no move in {}", game.to_fen());
        };
        info!(
            engine = engine.name(),
            nodes = engine.total_nodes(),
            "engine replied"
        );
        game.make_move(reply, true);
        println!("engine plays {reply} (score {})", result.score);
    }

    println!("{}", game.to_fen());
    println!("{}", describe(game.outcome()));
    Ok(())
}

fn describe(outcome: Option<Outcome>) -> String {
    match outcome {
        None => "in progress".to_string(),
        Some(Outcome::Checkmate { winner }) => format!("checkmate, {winner:?} wins"),
        Some(Outcome::Stalemate { stalemated }) => format!("stalemate, {stalemated:?} has no move"),
        Some(Outcome::ThreefoldRepetition) => "draw by threefold repetition".to_string(),
        Some(Outcome::FiftyMoveRule) => "draw by the fifty-move rule".to_string(),
    }
}
