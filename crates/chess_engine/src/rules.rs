//! Piece movement rules, attack detection and game termination.
//!
//! Legality is decided in two steps: a per-kind pseudo-legality test on the
//! geometry and the occupancy of the board, then a simulated make that
//! rejects the move if it leaves the mover's king attacked.

use crate::board::Game;
use crate::moves::Move;
use crate::types::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate { stalemated: Color },
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

fn is_knight_jump(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

fn is_king_step(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    from != to && dr.abs() <= 1 && dc.abs() <= 1
}

fn is_diagonal(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr != 0 && dr.abs() == dc.abs()
}

fn is_straight(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    (dr == 0) != (dc == 0)
}

impl Game {
    /// Whether the piece on `from` may legally move to `to`.
    ///
    /// Works for either color regardless of whose turn it is. Moves that
    /// land on a king are never legal.
    pub fn is_legal_move(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if from == to {
            return false;
        }
        if let Some(target) = self.piece_at(to)
            && (target.color == piece.color || target.kind == PieceKind::King)
        {
            return false;
        }
        if !self.is_pseudo_legal(piece, from, to) {
            return false;
        }

        let mv = self.build_move(from, to, None);
        let after = self.simulate(mv);
        !after.is_king_in_check(piece.color)
    }

    /// Alias of [`Game::is_legal_move`] under the name the board UI uses.
    pub fn is_valid_move(&mut self, from: Square, to: Square) -> bool {
        self.is_legal_move(from, to)
    }

    fn is_pseudo_legal(&self, piece: Piece, from: Square, to: Square) -> bool {
        match piece.kind {
            PieceKind::Pawn => self.is_pawn_move(piece, from, to),
            PieceKind::Knight => is_knight_jump(from, to),
            PieceKind::Bishop => is_diagonal(from, to) && self.path_clear(from, to),
            PieceKind::Rook => is_straight(from, to) && self.path_clear(from, to),
            PieceKind::Queen => {
                (is_diagonal(from, to) || is_straight(from, to)) && self.path_clear(from, to)
            }
            PieceKind::King => is_king_step(from, to) || self.can_castle(piece, from, to),
        }
    }

    /// Squares strictly between two aligned squares are empty.
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let (dr, dc) = deltas(from, to);
        let step = (dr.signum(), dc.signum());
        let mut sq = from;
        while let Some(next) = sq.offset(step.0, step.1) {
            if next == to {
                return true;
            }
            if self.piece_at(next).is_some() {
                return false;
            }
            sq = next;
        }
        false
    }

    fn is_pawn_move(&self, pawn: Piece, from: Square, to: Square) -> bool {
        let dir = pawn.color.forward();
        let (dr, dc) = deltas(from, to);
        let target = self.piece_at(to);

        if dc == 0 {
            if target.is_some() {
                return false;
            }
            if dr == dir {
                return true;
            }
            dr == 2 * dir
                && from.row() == pawn.color.pawn_start_row()
                && from
                    .offset(dir, 0)
                    .is_some_and(|mid| self.piece_at(mid).is_none())
        } else if dc.abs() == 1 && dr == dir {
            match target {
                Some(victim) => victim.color != pawn.color,
                None => self.en_passant_allowed(pawn, from, to),
            }
        } else {
            false
        }
    }

    /// The previous ply was an enemy double push that landed beside `from`
    /// on the file being moved to.
    fn en_passant_allowed(&self, pawn: Piece, from: Square, to: Square) -> bool {
        self.move_history.last().is_some_and(|last| {
            last.is_double_pawn_push()
                && last.piece.color != pawn.color
                && last.to == Square::at(from.row(), to.col())
        })
    }

    fn can_castle(&self, king: Piece, from: Square, to: Square) -> bool {
        let (dr, dc) = deltas(from, to);
        if king.has_moved() || dr != 0 || dc.abs() != 2 {
            return false;
        }
        let row = from.row();
        let rook_col = if dc > 0 { 7 } else { 0 };
        let rook_ready = self
            .piece_at(Square::at(row, rook_col))
            .is_some_and(|r| r.is(king.color, PieceKind::Rook) && !r.has_moved());
        if !rook_ready {
            return false;
        }

        let (lo, hi) = if dc > 0 {
            (from.col() + 1, rook_col)
        } else {
            (1, from.col())
        };
        if (lo..hi).any(|col| self.piece_at(Square::at(row, col)).is_some()) {
            return false;
        }

        let enemy = king.color.other();
        if self.is_square_attacked(from, enemy) {
            return false;
        }
        // Queenside also refuses an attacked b-file square.
        let transit = if dc > 0 {
            from.col() + 1..=to.col()
        } else {
            1..=from.col() - 1
        };
        transit
            .into_iter()
            .all(|col| !self.is_square_attacked(Square::at(row, col), enemy))
    }

    /// Builds a classified move for the piece on `from` without checking
    /// legality. A pawn reaching the last rank promotes to `promotion`, or to
    /// a queen when none is given.
    pub(crate) fn build_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Move {
        let piece = self
            .piece_at(from)
            .unwrap_or_else(|| panic!("build_move: no piece on {from}"));
        let is_pawn = piece.kind == PieceKind::Pawn;
        let en_passant = is_pawn && from.col() != to.col() && self.piece_at(to).is_none();
        let captured = if en_passant {
            self.piece_at(Square::at(from.row(), to.col()))
        } else {
            self.piece_at(to)
        };
        let promotion = (is_pawn && to.row() == piece.color.promotion_row())
            .then(|| promotion.unwrap_or(PieceKind::Queen));
        Move::classify(from, to, piece, captured, en_passant, promotion)
    }

    /// Whether any piece of color `by` attacks `target`.
    ///
    /// Pawns attack both forward diagonals whether or not the target is
    /// occupied. Castling never counts as an attack.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let behind = -by.forward();
        for dc in [-1, 1] {
            if let Some(sq) = target.offset(behind, dc)
                && self.holds(sq, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(sq) = target.offset(dr, dc)
                && self.holds(sq, by, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for (dr, dc) in KING_OFFSETS {
            if let Some(sq) = target.offset(dr, dc)
                && self.holds(sq, by, &[PieceKind::King])
            {
                return true;
            }
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(dr, dc) in dirs {
                let mut sq = target;
                while let Some(next) = sq.offset(dr, dc) {
                    if self.piece_at(next).is_some() {
                        if self.holds(next, by, &sliders) {
                            return true;
                        }
                        break;
                    }
                    sq = next;
                }
            }
        }

        false
    }

    fn holds(&self, sq: Square, color: Color, kinds: &[PieceKind]) -> bool {
        self.piece_at(sq)
            .is_some_and(|pc| pc.color == color && kinds.contains(&pc.kind))
    }

    pub fn king_position(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// # Panics
    /// If `color` has no king on the board.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        let king = self
            .king_position(color)
            .unwrap_or_else(|| panic!("{color:?} has no king on the board"));
        self.is_square_attacked(king, color.other())
    }

    /// Probes every (piece, destination) pair of `color` and stops at the
    /// first legal one.
    pub fn has_legal_move(&mut self, color: Color) -> bool {
        for from in Square::all() {
            if !self.piece_at(from).is_some_and(|pc| pc.color == color) {
                continue;
            }
            for to in Square::all() {
                if self.is_legal_move(from, to) {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_king_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_king_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.position_history.values().any(|&count| count >= 3)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// The first game-ending condition that holds, if any. The side to move
    /// is examined before its opponent.
    pub fn outcome(&mut self) -> Option<Outcome> {
        let to_move = self.side_to_move;
        for color in [to_move, to_move.other()] {
            if !self.has_legal_move(color) {
                return Some(if self.is_king_in_check(color) {
                    Outcome::Checkmate {
                        winner: color.other(),
                    }
                } else {
                    Outcome::Stalemate { stalemated: color }
                });
            }
        }
        if self.is_threefold_repetition() {
            return Some(Outcome::ThreefoldRepetition);
        }
        if self.config.fifty_move_rule && self.is_fifty_move_draw() {
            return Some(Outcome::FiftyMoveRule);
        }
        None
    }

    pub fn is_game_over(&mut self) -> bool {
        self.outcome().is_some()
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
