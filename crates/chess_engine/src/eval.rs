//! Static evaluation: material plus piece-square tables, always from White's
//! point of view.

use crate::board::Game;
use crate::types::*;

// Tables read as the board is printed from White's side: index 0 is a8.
// Black pieces use the vertically mirrored square.

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
     0,   0,   5,   5,   5,   5,   0,  -5,
   -10,   5,   5,   5,   5,   5,   0, -10,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,   0,   0,   0,   0,  20,  20,
    20,  30,  10,   0,   0,  10,  30,  20,
];

/// Positional bonus for `piece` standing on `sq`, from its owner's view.
pub fn piece_square_value(piece: Piece, sq: Square) -> i32 {
    let table = match piece.kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    };
    let index = match piece.color {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    };
    table[index]
}

/// Signed contribution of one piece: material plus its table bonus, positive
/// for White and negative for Black.
fn piece_score(piece: Piece, sq: Square) -> i32 {
    let pst = piece_square_value(piece, sq);
    match piece.color {
        Color::White => piece.value() + pst,
        Color::Black => piece.value() - pst,
    }
}

impl Game {
    /// Score of the position. Positive favours White.
    ///
    /// A mated Black king scores `i32::MAX` and a mated White king `i32::MIN`.
    /// Stalemate and repetition score 0, as does the fifty-move draw when the
    /// rule is enabled.
    pub fn evaluate(&mut self) -> i32 {
        let white_stuck = !self.has_legal_move(Color::White);
        let black_stuck = !self.has_legal_move(Color::Black);
        if black_stuck && self.is_king_in_check(Color::Black) {
            return i32::MAX;
        }
        if white_stuck && self.is_king_in_check(Color::White) {
            return i32::MIN;
        }
        if white_stuck
            || black_stuck
            || self.is_threefold_repetition()
            || (self.config.fifty_move_rule && self.is_fifty_move_draw())
        {
            return 0;
        }
        let (white, black) = self.evaluation();
        white + black
    }

    /// Material and placement split by color: White's sum is positive and
    /// Black's negative.
    pub fn evaluation(&self) -> (i32, i32) {
        self.pieces()
            .fold((0, 0), |(white, black), (sq, pc)| match pc.color {
                Color::White => (white + piece_score(pc, sq), black),
                Color::Black => (white, black + piece_score(pc, sq)),
            })
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
