//! Move ordering for the search: MVV-LVA for captures plus flat bonuses.

use std::cmp::Reverse;

use crate::moves::Move;
use crate::types::Square;

pub const PROMOTION_BONUS: i32 = 900;
pub const CASTLE_BONUS: i32 = 30;
pub const CENTER_BONUS: i32 = 10;

fn is_center(sq: Square) -> bool {
    (3..=4).contains(&sq.row()) && (3..=4).contains(&sq.col())
}

/// Heuristic score of a single move. Higher is searched first.
pub fn score_move(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured {
        score += 10 * victim.kind.material() - mv.piece.kind.material();
    }
    if mv.promotion.is_some() {
        score += PROMOTION_BONUS;
    }
    if mv.is_castle() {
        score += CASTLE_BONUS;
    }
    if is_center(mv.to) {
        score += CENTER_BONUS;
    }
    score
}

/// Scores every move and sorts them best first. The sort is stable, so equal
/// scores keep generation order.
pub fn order_moves(moves: &mut [Move]) {
    for mv in moves.iter_mut() {
        mv.score = score_move(mv);
    }
    moves.sort_by_key(|mv| Reverse(mv.score));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
