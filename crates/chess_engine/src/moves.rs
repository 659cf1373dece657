use crate::types::{Piece, PieceKind, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    Promotion,
}

/// One ply together with everything needed to take it back.
///
/// `piece` is the mover as it stood before the move, including its
/// `move_count`. For en passant `captured` is the pawn on the passed-over
/// square rather than whatever sits on `to`.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
    /// Ordering heuristic only; ignored by equality.
    pub score: i32,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.piece == other.piece
            && self.captured == other.captured
            && self.kind == other.kind
            && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Move {
    /// Classifies a move from its geometry and the pieces involved.
    ///
    /// Promotion wins over en passant, en passant over capture and capture over
    /// castling. A capturing promotion stays `Promotion` with `captured` set.
    pub fn classify(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        en_passant: bool,
        promotion: Option<PieceKind>,
    ) -> Self {
        let col_delta = to.col() as i8 - from.col() as i8;
        let kind = if promotion.is_some() {
            MoveKind::Promotion
        } else if en_passant {
            MoveKind::EnPassant
        } else if captured.is_some() {
            MoveKind::Capture
        } else if piece.kind == PieceKind::King && col_delta == 2 {
            MoveKind::CastleKingSide
        } else if piece.kind == PieceKind::King && col_delta == -2 {
            MoveKind::CastleQueenSide
        } else {
            MoveKind::Normal
        };
        Self {
            from,
            to,
            piece,
            captured,
            kind,
            promotion,
            score: 0,
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide
        )
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Same squares and promotion choice; the rest of the record may differ.
    pub fn same_ply(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }

    /// Square of the pawn removed by an en passant capture.
    pub fn en_passant_square(&self) -> Square {
        Square::at(self.from.row(), self.to.col())
    }

    /// Rook origin and destination for a castling move.
    pub fn castle_rook_squares(&self) -> Option<(Square, Square)> {
        let row = self.from.row();
        match self.kind {
            MoveKind::CastleKingSide => {
                Some((Square::at(row, 7), Square::at(row, self.to.col() - 1)))
            }
            MoveKind::CastleQueenSide => {
                Some((Square::at(row, 0), Square::at(row, self.to.col() + 1)))
            }
            _ => None,
        }
    }
}
