use std::time::Instant;

use rayon::prelude::*;

use chess_engine::{Game, START_FEN, divide, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

/// EPD-style cases: `<fen> ;D1 <nodes> ;D2 <nodes> ...`.
const CASES: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ;D1 20 ;D2 400 ;D3 8902 ;D4 197281 ;D5 4865609",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1 ;D1 14 ;D2 191 ;D3 2812 ;D4 43238 ;D5 674624",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8 ;D1 44 ;D2 1486 ;D3 62379 ;D4 2103487",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10 ;D1 46 ;D2 2079 ;D3 89890 ;D4 3894594",
];

fn parse_epd_line(line: &str) -> Option<(String, Vec<(u8, u64)>)> {
    let mut parts = line.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths = Vec::new();
    for part in parts {
        let mut items = part.split_whitespace();
        let (Some(key), Some(val)) = (items.next(), items.next()) else {
            continue;
        };
        let Some(depth) = key.strip_prefix('D') else {
            continue;
        };
        let depth: u8 = depth
            .parse()
            .unwrap_or_else(|_| panic!("Invalid depth token in EPD: {key}"));
        let expected: u64 = val
            .parse()
            .unwrap_or_else(|_| panic!("Invalid node count in EPD: {val}"));
        depths.push((depth, expected));
    }
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some((fen.to_string(), depths))
}

#[test]
fn perft_from_standard_positions() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let cases: Vec<(usize, String, Vec<(u8, u64)>)> = CASES
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| parse_epd_line(line).map(|(fen, depths)| (idx, fen, depths)))
        .collect();
    assert_eq!(cases.len(), CASES.len());

    cases.par_iter().for_each(|(idx, fen, depths)| {
        let mut ran_depths = Vec::new();
        let mut total_nodes: u64 = 0;
        let case_start = Instant::now();

        for (depth, expected) in depths {
            if !full && *expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {depth} for case {} ({expected} nodes), set {FULL_PERFT_ENV}=1 to run all.",
                    idx + 1
                );
                continue;
            }
            let mut game = Game::from_fen(fen).unwrap();
            let got = perft(&mut game, *depth);
            assert_eq!(
                got, *expected,
                "Perft mismatch for FEN '{fen}' at depth {depth}"
            );
            assert_eq!(game.to_fen(), *fen, "perft must leave the position untouched");

            ran_depths.push(*depth);
            total_nodes += got;
        }

        if !ran_depths.is_empty() {
            let elapsed = case_start.elapsed();
            println!(
                "Case {:03} done: depths {:?}, total nodes {}, elapsed {:.3?}",
                idx + 1,
                ran_depths,
                total_nodes,
                elapsed
            );
        }
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let mut game = Game::new();
    assert_eq!(perft(&mut game, 0), 1);
    assert!(divide(&mut game, 0).is_empty());
}

#[test]
fn divide_sums_to_perft() {
    let mut game = Game::from_fen(START_FEN).unwrap();
    let split = divide(&mut game, 3);
    assert_eq!(split.len(), 20);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    let e4 = split.iter().find(|(mv, _)| mv.to_string() == "e2e4").unwrap();
    assert_eq!(e4.1, 600);

    let mut pos5 = Game::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    let split = divide(&mut pos5, 2);
    assert_eq!(split.len(), 44);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 1486);
}
