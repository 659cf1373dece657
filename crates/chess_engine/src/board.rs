use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::config::GameConfig;
use crate::fen::MAX_COUNTER;
use crate::moves::{Move, MoveKind};
use crate::types::*;
use crate::zobrist;

/// Castling availability as derived from the pieces' move counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn any(&self) -> bool {
        self.wk || self.wq || self.bk || self.bq
    }
}

/// Full game state: the grid plus everything needed for repetition, the
/// fifty-move clock and exact undo.
///
/// Moves are either committed (permanent, they advance the clocks and the
/// position history) or simulated (temporary, always undone in reverse
/// order). `committed` is the number of history entries that can never be
/// taken back.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub(crate) board: [[Option<Piece>; 8]; 8],
    pub(crate) side_to_move: Color,
    pub(crate) halfmove_clock: u32,
    pub(crate) ply: u32,
    pub(crate) move_history: Vec<Move>,
    pub(crate) committed: usize,
    pub(crate) position_history: HashMap<u64, u32>,
    pub(crate) config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// The standard starting position.
    pub fn new() -> Self {
        let mut game = Self::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            game.board[0][col] = Some(Piece::new(kind, Color::Black));
            game.board[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            game.board[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            game.board[7][col] = Some(Piece::new(kind, Color::White));
        }
        game.record_position();
        game
    }

    /// A board with no pieces, used as the starting point for decoding.
    pub(crate) fn empty() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::White,
            halfmove_clock: 0,
            ply: 0,
            move_history: Vec::new(),
            committed: 0,
            position_history: HashMap::new(),
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.row() as usize][sq.col() as usize]
    }

    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.row() as usize][sq.col() as usize] = piece;
    }

    fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.row() as usize][sq.col() as usize].take()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Half-moves played since the start of the game.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn fullmove_number(&self) -> u32 {
        self.ply / 2 + 1
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    /// Number of simulated moves not yet undone.
    pub fn simulation_depth(&self) -> usize {
        self.move_history.len() - self.committed
    }

    /// How often the position with this key has occurred in committed play.
    pub fn position_count(&self, key: u64) -> u32 {
        self.position_history.get(&key).copied().unwrap_or(0)
    }

    pub fn position_key(&self) -> u64 {
        zobrist::position_key(self)
    }

    pub(crate) fn record_position(&mut self) {
        let key = zobrist::position_key(self);
        *self.position_history.entry(key).or_insert(0) += 1;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        CastlingRights {
            wk: self.castle_available(Color::White, 7),
            wq: self.castle_available(Color::White, 0),
            bk: self.castle_available(Color::Black, 7),
            bq: self.castle_available(Color::Black, 0),
        }
    }

    fn castle_available(&self, color: Color, rook_col: u8) -> bool {
        let row = color.back_row();
        let king_home = self
            .piece_at(Square::at(row, 4))
            .is_some_and(|k| k.is(color, PieceKind::King) && !k.has_moved());
        let rook_home = self
            .piece_at(Square::at(row, rook_col))
            .is_some_and(|r| r.is(color, PieceKind::Rook) && !r.has_moved());
        king_home && rook_home
    }

    /// The square passed over by the last move when it was a two-square pawn
    /// advance.
    pub fn en_passant_target(&self) -> Option<Square> {
        let last = self.move_history.last()?;
        if !last.is_double_pawn_push() {
            return None;
        }
        let row = (last.from.row() + last.to.row()) / 2;
        Some(Square::at(row, last.from.col()))
    }

    /// Applies `mv` and returns the record pushed onto the history.
    ///
    /// The mover and the captured piece are read from the board, so a move
    /// built against an earlier state still records the exact pieces it
    /// disturbs. Committed moves update the half-move clock and the position
    /// history; simulated moves must be reverted with [`Game::undo_move`].
    ///
    /// # Panics
    /// If the source square is empty, or if `committed` is set while
    /// simulated moves are outstanding.
    pub fn make_move(&mut self, mv: Move, committed: bool) -> Move {
        if committed {
            assert_eq!(
                self.move_history.len(),
                self.committed,
                "cannot commit {mv} while simulated moves are outstanding"
            );
        }

        let piece = self
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("make_move {mv}: no piece on {}", mv.from));
        let captured = if mv.kind == MoveKind::EnPassant {
            self.take_piece(mv.en_passant_square())
        } else {
            self.piece_at(mv.to)
        };
        let record = Move {
            piece,
            captured,
            ..mv
        };

        self.set_piece(mv.from, None);
        let mut moved = piece;
        moved.move_count += 1;
        if let Some(kind) = record.promotion {
            moved.kind = kind;
        }
        self.set_piece(mv.to, Some(moved));

        if let Some((rook_from, rook_to)) = record.castle_rook_squares() {
            let mut rook = self
                .take_piece(rook_from)
                .unwrap_or_else(|| panic!("castling {mv} without a rook on {rook_from}"));
            rook.move_count += 1;
            self.set_piece(rook_to, Some(rook));
        }

        self.side_to_move = self.side_to_move.other();
        self.ply += 1;
        self.move_history.push(record);

        if committed {
            self.committed = self.move_history.len();
            self.halfmove_clock = if piece.kind == PieceKind::Pawn || captured.is_some() {
                0
            } else {
                (self.halfmove_clock + 1).min(MAX_COUNTER)
            };
            self.record_position();
        }

        record
    }

    /// Reverts the most recent simulated move.
    ///
    /// # Panics
    /// If there is no simulated move to revert (committed moves are
    /// permanent) or if `mv` is not the top of the history.
    pub fn undo_move(&mut self, mv: &Move) {
        assert!(
            self.move_history.len() > self.committed,
            "undo_move {mv}: no simulated move outstanding"
        );
        let record = self
            .move_history
            .pop()
            .expect("history holds the simulated move");
        assert!(
            record.same_ply(mv),
            "undo_move out of order: top of history is {record}, asked to undo {mv}"
        );

        self.set_piece(record.to, None);
        if let Some((rook_from, rook_to)) = record.castle_rook_squares() {
            let mut rook = self
                .take_piece(rook_to)
                .unwrap_or_else(|| panic!("undo {record}: castled rook missing from {rook_to}"));
            rook.move_count -= 1;
            self.set_piece(rook_from, Some(rook));
        }
        self.set_piece(record.from, Some(record.piece));
        if let Some(captured) = record.captured {
            let sq = if record.kind == MoveKind::EnPassant {
                record.en_passant_square()
            } else {
                record.to
            };
            self.set_piece(sq, Some(captured));
        }

        self.side_to_move = self.side_to_move.other();
        self.ply -= 1;
    }

    /// Plays `mv` as a simulated move that is undone when the guard drops.
    pub fn simulate(&mut self, mv: Move) -> SimulatedMove<'_> {
        let record = self.make_move(mv, false);
        SimulatedMove { game: self, record }
    }
}

/// Scoped simulated move. Derefs to the game in the post-move state and
/// restores the previous state on drop.
pub struct SimulatedMove<'a> {
    game: &'a mut Game,
    record: Move,
}

impl Deref for SimulatedMove<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for SimulatedMove<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        self.game.undo_move(&self.record);
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let ch = self
                    .piece_at(Square::at(row, col))
                    .map_or('.', |pc| pc.fen_char());
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
