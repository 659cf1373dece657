//! Times move generation and checks it against known leaf counts.
//!
//! ```text
//! cargo run --release --example perft_bench -p chess_engine -- [depth] [fen]...
//! ```
//!
//! Without FENs the reference positions run and each count is compared with
//! its published value. Given FENs are only timed, one row per root move.

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_engine::{Game, START_FEN, divide, perft};

/// `(fen, leaf counts for depth 1, 2, 3, ...)`
const REFERENCE: &[(&str, &[u64])] = &[
    (START_FEN, &[20, 400, 8_902, 197_281, 4_865_609]),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862, 4_085_603],
    ),
    (
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2_812, 43_238, 674_624],
    ),
    (
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379, 2_103_487],
    ),
];

struct Timing {
    nodes: u64,
    took: Duration,
}

impl Timing {
    fn nodes_per_second(&self) -> f64 {
        let secs = self.took.as_secs_f64();
        if secs > 0.0 { self.nodes as f64 / secs } else { 0.0 }
    }
}

fn timed(game: &mut Game, depth: u8) -> Timing {
    let start = Instant::now();
    let nodes = perft(game, depth);
    Timing {
        nodes,
        took: start.elapsed(),
    }
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let depth = match args.next().map(|text| text.parse::<u8>()) {
        None => 4,
        Some(Ok(depth)) => depth,
        Some(Err(err)) => {
            eprintln!("depth: {err}");
            return ExitCode::from(2);
        }
    };
    let fens: Vec<String> = args.collect();

    if fens.is_empty() {
        reference_suite(depth)
    } else {
        for fen in &fens {
            if let Err(err) = split_by_root_move(fen, depth) {
                eprintln!("{fen}: {err}");
                return ExitCode::from(2);
            }
        }
        ExitCode::SUCCESS
    }
}

fn reference_suite(depth: u8) -> ExitCode {
    let mut total = Timing {
        nodes: 0,
        took: Duration::ZERO,
    };
    let mut mismatches = 0;

    for (fen, counts) in REFERENCE {
        let Some(&expected) = counts.get(usize::from(depth).wrapping_sub(1)) else {
            println!("{fen}\n  no reference count at depth {depth}, skipped");
            continue;
        };
        let mut game = match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("{fen}: {err}");
                return ExitCode::from(2);
            }
        };
        let run = timed(&mut game, depth);
        let verdict = if run.nodes == expected {
            "ok"
        } else {
            mismatches += 1;
            "MISMATCH"
        };
        println!(
            "{fen}\n  {:>10} nodes {:>9.3?} {:>12.0} nps  {verdict} (want {expected})",
            run.nodes,
            run.took,
            run.nodes_per_second()
        );
        total.nodes += run.nodes;
        total.took += run.took;
    }

    println!(
        "depth {depth}: {} nodes in {:.3?}, {:.0} nps",
        total.nodes,
        total.took,
        total.nodes_per_second()
    );
    if mismatches == 0 {
        ExitCode::SUCCESS
    } else {
        eprintln!("{mismatches} position(s) disagree with the reference");
        ExitCode::FAILURE
    }
}

fn split_by_root_move(fen: &str, depth: u8) -> chess_engine::Result<()> {
    let mut game = Game::from_fen(fen)?;
    let start = Instant::now();
    let rows = divide(&mut game, depth.max(1));
    let run = Timing {
        nodes: rows.iter().map(|(_, count)| count).sum(),
        took: start.elapsed(),
    };
    println!("{fen} at depth {}", depth.max(1));
    for (mv, count) in &rows {
        println!("  {mv:<6} {count}");
    }
    println!(
        "  total {} in {:.3?} ({:.0} nps)",
        run.nodes,
        run.took,
        run.nodes_per_second()
    );
    Ok(())
}
