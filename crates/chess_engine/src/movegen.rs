use crate::board::Game;
use crate::moves::Move;
use crate::notation::MoveRequest;
use crate::types::*;

/// Legal moves for the side to move on a scratch copy of `game`.
pub fn legal_moves(game: &Game) -> Vec<Move> {
    let mut tmp = game.clone();
    tmp.legal_moves()
}

impl Game {
    /// Legal moves of the piece on `from`, destinations in row-major order.
    /// A pawn reaching the last rank yields one move per promotion choice.
    pub fn moves_for_piece(&mut self, from: Square) -> Vec<Move> {
        let mut out = Vec::with_capacity(28);
        self.moves_for_piece_into(from, &mut out);
        out
    }

    fn moves_for_piece_into(&mut self, from: Square, out: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        for to in Square::all() {
            if !self.is_legal_move(from, to) {
                continue;
            }
            if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
                for kind in PieceKind::PROMOTIONS {
                    out.push(self.build_move(from, to, Some(kind)));
                }
            } else {
                out.push(self.build_move(from, to, None));
            }
        }
    }

    /// Every legal move of `color`, source squares in row-major order.
    pub fn generate_moves(&mut self, color: Color) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.generate_moves_into(color, &mut out);
        out
    }

    /// Same as [`Game::generate_moves`], reusing the caller's buffer.
    pub fn generate_moves_into(&mut self, color: Color, out: &mut Vec<Move>) {
        out.clear();
        for from in Square::all() {
            if self.piece_at(from).is_some_and(|pc| pc.color == color) {
                self.moves_for_piece_into(from, out);
            }
        }
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.generate_moves(self.side_to_move)
    }

    /// Resolves a from/to pair into a legal move. `promotion` defaults to a
    /// queen when the move needs one and is refused when it does not.
    pub fn find_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        if promotion.is_some_and(|kind| !PieceKind::PROMOTIONS.contains(&kind)) {
            return None;
        }
        if !self.is_legal_move(from, to) {
            return None;
        }
        let mv = self.build_move(from, to, promotion);
        if promotion.is_some() && mv.promotion.is_none() {
            return None;
        }
        Some(mv)
    }

    /// Commits the requested move for the side to move. Illegal or
    /// out-of-turn requests return `None` and leave the game untouched.
    pub fn play(&mut self, request: MoveRequest) -> Option<Move> {
        if !self
            .piece_at(request.from)
            .is_some_and(|pc| pc.color == self.side_to_move)
        {
            return None;
        }
        let mv = self.find_move(request.from, request.to, request.promotion)?;
        Some(self.make_move(mv, true))
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
