use std::time::Duration;

use super::*;
use crate::perft::perft;

const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

fn unlimited() -> TimeControl {
    TimeControl::unlimited()
}

const PLAIN: SearchOptions = SearchOptions {
    alpha_beta: false,
    move_ordering: false,
};

const PRUNED: SearchOptions = SearchOptions {
    alpha_beta: true,
    move_ordering: false,
};

#[test]
fn test_finds_mate_in_one() {
    let mut g = game("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    for depth in [1, 2] {
        let outcome = g.search(depth, true);
        assert_eq!(
            outcome.best_move.map(|mv| mv.to_string()).as_deref(),
            Some("e1e8"),
            "depth {depth}"
        );
        assert_eq!(outcome.score, i32::MAX);
    }
}

#[test]
fn test_takes_hanging_queen() {
    let mut g = game("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let outcome = g.search(2, true);
    assert_eq!(outcome.best_move.unwrap().to_string(), "d2d5");
    assert!(outcome.score > 400);
}

#[test]
fn test_minimizing_role_plays_black() {
    let mut g = game("4k3/8/8/3Q4/8/8/3r4/4K3 b - - 0 1");
    let outcome = g.search(2, false);
    let best = outcome.best_move.unwrap();
    assert_eq!(best.piece.color, Color::Black);
    assert_eq!(best.to_string(), "d2d5");
    assert!(outcome.score < -400);
}

#[test]
fn test_first_move_seeds_best_when_everything_loses() {
    // Both pawn moves allow Qg2 mate.
    let mut g = game("8/8/8/8/8/6q1/P4k2/7K w - - 0 1");
    for options in [PLAIN, PRUNED] {
        let outcome = search_with(&mut g, 2, true, options, &unlimited());
        assert_eq!(outcome.score, i32::MIN);
        assert_eq!(outcome.best_move.unwrap().to_string(), "a2a4");
    }
}

#[test]
fn test_terminal_root_has_no_move() {
    let mut mated = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let outcome = mated.search(3, true);
    assert!(outcome.best_move.is_none());
    assert_eq!(outcome.score, i32::MIN);
    assert_eq!(outcome.nodes, 1);

    let mut start = Game::new();
    let shallow = start.search(0, true);
    assert!(shallow.best_move.is_none());
    assert_eq!(shallow.score, 0);
}

#[test]
fn test_unpruned_node_count_matches_perft() {
    let mut g = Game::new();
    for depth in 1..=3 {
        let outcome = search_with(&mut g, depth, true, PLAIN, &unlimited());
        assert_eq!(outcome.nodes, perft(&mut g, depth), "depth {depth}");
    }
}

#[test]
fn test_alpha_beta_matches_minimax_with_fewer_nodes() {
    for (fen, maximizing) in [
        (crate::fen::START_FEN, true),
        (POSITION_5, true),
        (POSITION_5, false),
    ] {
        let mut g = game(fen);
        let plain = search_with(&mut g, 3, maximizing, PLAIN, &unlimited());
        let pruned = search_with(&mut g, 3, maximizing, PRUNED, &unlimited());
        assert_eq!(pruned.best_move, plain.best_move, "{fen}");
        assert_eq!(pruned.score, plain.score, "{fen}");
        assert!(
            pruned.nodes < plain.nodes,
            "{fen}: {} pruned vs {} plain",
            pruned.nodes,
            plain.nodes
        );
    }
}

#[test]
fn test_ordering_keeps_the_score() {
    let mut g = game(POSITION_5);
    let unordered = search_with(&mut g, 3, true, PRUNED, &unlimited());
    let ordered = search_with(&mut g, 3, true, SearchOptions::default(), &unlimited());
    assert_eq!(ordered.score, unordered.score);
}

#[test]
fn test_search_leaves_game_untouched() {
    let mut g = game(POSITION_5);
    let before = g.clone();
    g.search(3, true);
    assert_eq!(g, before);
}

#[test]
fn test_parallel_matches_sequential() {
    for fen in [crate::fen::START_FEN, POSITION_5] {
        let g = game(fen);
        for options in [PRUNED, SearchOptions::default()] {
            let sequential = search_with(&mut g.clone(), 3, true, options, &unlimited());
            let parallel = search_parallel(&g, 3, true, options, &unlimited());
            assert_eq!(parallel.best_move, sequential.best_move, "{fen}");
            assert_eq!(parallel.score, sequential.score, "{fen}");
            assert!(!parallel.stopped);
        }
    }
}

#[test]
fn test_stopped_before_start_returns_nothing() {
    let mut g = Game::new();
    let tc = TimeControl::unlimited();
    tc.stop();
    let outcome = search_with(&mut g, 4, true, SearchOptions::default(), &tc);
    assert!(outcome.stopped);
    assert!(outcome.best_move.is_none());
    assert_eq!(outcome.nodes, 0);

    let parallel = search_parallel(&g, 4, true, SearchOptions::default(), &tc);
    assert!(parallel.stopped);
    assert!(parallel.best_move.is_none());
}

#[test]
fn test_expired_clock_stops_and_restores() {
    let mut g = Game::new();
    let before = g.clone();
    let tc = TimeControl::new(Some(Duration::ZERO));
    tc.start();
    let outcome = search_with(&mut g, 4, true, PLAIN, &tc);
    assert!(outcome.stopped);
    assert!(tc.is_stopped());
    assert_eq!(g, before);
    assert_eq!(g.to_fen(), crate::fen::START_FEN);
}
