//! Minimax search with optional alpha-beta pruning.
//!
//! Scores are always from White's point of view: the maximizing role plays
//! White's moves and the minimizing role Black's. Every child position is
//! visited through a [`SimulatedMove`](crate::board::SimulatedMove) guard, so
//! the game is restored on every exit path, cancellation included.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::board::Game;
use crate::moves::Move;
use crate::ordering::order_moves;
use crate::time_control::TimeControl;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub alpha_beta: bool,
    pub move_ordering: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            move_ordering: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    /// `None` only for terminal roots or a search stopped before its first
    /// root move finished.
    pub best_move: Option<Move>,
    /// Terminal positions evaluated.
    pub nodes: u64,
    pub stopped: bool,
}

struct SearchContext<'a> {
    options: SearchOptions,
    tc: &'a TimeControl,
    nodes: u64,
    calls: u64,
    stopped: bool,
}

impl<'a> SearchContext<'a> {
    fn new(options: SearchOptions, tc: &'a TimeControl) -> Self {
        Self {
            options,
            tc,
            nodes: 0,
            calls: 0,
            stopped: false,
        }
    }

    /// Polled on every recursive entry.
    fn should_stop(&mut self) -> bool {
        if !self.stopped {
            self.calls += 1;
            self.stopped = self.tc.poll(self.calls);
        }
        self.stopped
    }
}

fn role_color(maximizing: bool) -> Color {
    if maximizing { Color::White } else { Color::Black }
}

fn improves(maximizing: bool, score: i32, best: i32) -> bool {
    if maximizing { score > best } else { score < best }
}

fn recurse(
    game: &mut Game,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    if ctx.should_stop() {
        return (best_score, None);
    }
    if depth == 0 || game.is_game_over() {
        ctx.nodes += 1;
        return (game.evaluate(), None);
    }

    let mut moves = game.generate_moves(role_color(maximizing));
    if ctx.options.move_ordering {
        order_moves(&mut moves);
    }

    let mut best_move = None;
    for mv in moves {
        let (score, _) = {
            let mut child = game.simulate(mv);
            recurse(&mut child, depth - 1, !maximizing, alpha, beta, ctx)
        };
        if ctx.stopped {
            break;
        }

        // The first move seeds the best so a lost position still has a reply.
        if best_move.is_none() || improves(maximizing, score, best_score) {
            best_score = score;
            best_move = Some(mv);
        }

        if ctx.options.alpha_beta {
            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if beta <= alpha {
                break;
            }
        }
    }
    (best_score, best_move)
}

fn finish(
    game: &Game,
    (score, best_move): (i32, Option<Move>),
    nodes: u64,
    stopped: bool,
) -> SearchOutcome {
    let score = if best_move.is_none() && stopped {
        let (white, black) = game.evaluation();
        white + black
    } else {
        score
    };
    SearchOutcome {
        score,
        best_move,
        nodes,
        stopped,
    }
}

/// Searches `depth` plies below the root inside the `(alpha, beta)` window.
pub fn minimax(
    game: &mut Game,
    depth: u8,
    maximizing: bool,
    alpha: i32,
    beta: i32,
    options: SearchOptions,
    tc: &TimeControl,
) -> SearchOutcome {
    let mut ctx = SearchContext::new(options, tc);
    let result = recurse(game, depth, maximizing, alpha, beta, &mut ctx);
    finish(game, result, ctx.nodes, ctx.stopped)
}

/// Full-window search from the root.
#[instrument(level = "debug", skip(game, options, tc))]
pub fn search_with(
    game: &mut Game,
    depth: u8,
    maximizing: bool,
    options: SearchOptions,
    tc: &TimeControl,
) -> SearchOutcome {
    let outcome = minimax(game, depth, maximizing, i32::MIN, i32::MAX, options, tc);
    debug!(
        nodes = outcome.nodes,
        score = outcome.score,
        stopped = outcome.stopped,
        best = ?outcome.best_move.map(|mv| mv.to_string()),
        "search finished"
    );
    outcome
}

/// Searches every root move on its own clone of `game` across the rayon pool.
///
/// Each root child gets a full window, and results are combined in root
/// order with the same first-best rule as [`search_with`], so the move and
/// score agree with the sequential search. Node counts are larger because
/// no bound is shared between root moves.
#[instrument(level = "debug", skip(game, options, tc))]
pub fn search_parallel(
    game: &Game,
    depth: u8,
    maximizing: bool,
    options: SearchOptions,
    tc: &TimeControl,
) -> SearchOutcome {
    let mut root = game.clone();
    if depth == 0 || root.is_game_over() {
        return search_with(&mut root, depth, maximizing, options, tc);
    }

    let mut moves = root.generate_moves(role_color(maximizing));
    if options.move_ordering {
        order_moves(&mut moves);
    }

    let root = &root;
    let results: Vec<(Move, i32, u64, bool)> = moves
        .par_iter()
        .map(|&mv| {
            let mut local = root.clone();
            let mut ctx = SearchContext::new(options, tc);
            let (score, _) = {
                let mut child = local.simulate(mv);
                recurse(&mut child, depth - 1, !maximizing, i32::MIN, i32::MAX, &mut ctx)
            };
            (mv, score, ctx.nodes, ctx.stopped)
        })
        .collect();

    let mut best: (i32, Option<Move>) = (0, None);
    let mut nodes = 0;
    let mut stopped = false;
    for (mv, score, child_nodes, child_stopped) in results {
        nodes += child_nodes;
        if child_stopped {
            stopped = true;
            continue;
        }
        if best.1.is_none() || improves(maximizing, score, best.0) {
            best = (score, Some(mv));
        }
    }

    let outcome = finish(root, best, nodes, stopped);
    debug!(
        nodes = outcome.nodes,
        score = outcome.score,
        stopped = outcome.stopped,
        best = ?outcome.best_move.map(|mv| mv.to_string()),
        "parallel search finished"
    );
    outcome
}

impl Game {
    /// Best move for the given role with pruning and ordering enabled and no
    /// time limit.
    pub fn search(&mut self, depth: u8, white_maximizing: bool) -> SearchOutcome {
        search_with(
            self,
            depth,
            white_maximizing,
            SearchOptions::default(),
            &TimeControl::unlimited(),
        )
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
