//! Forsyth-Edwards Notation decoding and encoding.
//!
//! Castling rights and the en passant target are not stored on [`Game`].
//! Decoding translates them into move counters and a placeholder history
//! entry, and encoding derives them back from the same sources.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::board::Game;
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest half-move clock or full-move number accepted by [`decode`]. The
/// ply count derived from it stays far below `u32::MAX`.
pub const MAX_COUNTER: u32 = 1 << 24;

/// Parses a six-field FEN string into a game.
pub fn decode(text: &str) -> Result<Game> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [placement, side, castling, en_passant, halfmove, fullmove] = fields[..] else {
        return Err(ChessError::fen(format!(
            "expected 6 fields, found {}",
            fields.len()
        )));
    };

    let mut game = Game::empty();
    parse_placement(placement, &mut game)?;
    for color in Color::BOTH {
        let kings = game
            .pieces()
            .filter(|(_, pc)| pc.is(color, PieceKind::King))
            .count();
        if kings != 1 {
            return Err(ChessError::fen(format!(
                "expected exactly one {color:?} king, found {kings}"
            )));
        }
    }

    game.side_to_move = match side {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(ChessError::fen(format!("invalid side to move {side:?}"))),
    };

    apply_castling(castling, &mut game)?;
    apply_en_passant(en_passant, &mut game)?;

    game.halfmove_clock = parse_counter(halfmove, "halfmove clock")?;
    let fullmove = parse_counter(fullmove, "fullmove number")?;
    if fullmove == 0 {
        return Err(ChessError::fen("fullmove number must be at least 1"));
    }
    game.ply = 2 * (fullmove - 1) + u32::from(game.side_to_move == Color::Black);

    game.record_position();
    Ok(game)
}

/// Parses a move counter no larger than [`MAX_COUNTER`].
fn parse_counter(text: &str, what: &str) -> Result<u32> {
    match text.parse::<u32>() {
        Ok(value) if value <= MAX_COUNTER => Ok(value),
        Ok(_) => Err(ChessError::fen(format!(
            "{what} {text} exceeds {MAX_COUNTER}"
        ))),
        Err(_) => Err(ChessError::fen(format!("invalid {what} {text:?}"))),
    }
}

fn parse_placement(placement: &str, game: &mut Game) -> Result<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0u8;
        for ch in rank.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessError::fen(format!("invalid empty run {ch:?}")));
                }
                col += run as u8;
            } else {
                let piece = Piece::from_fen_char(ch)
                    .ok_or_else(|| ChessError::fen(format!("unknown piece letter {ch:?}")))?;
                if col >= 8 {
                    return Err(ChessError::fen(format!("rank {} overflows", 8 - row)));
                }
                game.set_piece(Square::at(row as u8, col), Some(piece));
                col += 1;
            }
            if col > 8 {
                return Err(ChessError::fen(format!("rank {} overflows", 8 - row)));
            }
        }
        if col != 8 {
            return Err(ChessError::fen(format!("rank {} is short", 8 - row)));
        }
    }
    Ok(())
}

/// Marks every king and rook whose castling letter is absent as moved.
fn apply_castling(field: &str, game: &mut Game) -> Result<()> {
    let mut letters = Vec::new();
    if field != "-" {
        for ch in field.chars() {
            if !"KQkq".contains(ch) || letters.contains(&ch) {
                return Err(ChessError::fen(format!("invalid castling field {field:?}")));
            }
            letters.push(ch);
        }
    }

    for color in Color::BOTH {
        let (king_side, queen_side) = match color {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };
        let row = color.back_row();
        let home = Square::at(row, 4);

        for (letter, rook_col) in [(king_side, 7), (queen_side, 0)] {
            let corner = Square::at(row, rook_col);
            let rook_home = game
                .piece_at(corner)
                .is_some_and(|pc| pc.is(color, PieceKind::Rook));
            if letters.contains(&letter) {
                let king_home = game
                    .piece_at(home)
                    .is_some_and(|pc| pc.is(color, PieceKind::King));
                if !king_home || !rook_home {
                    return Err(ChessError::fen(format!(
                        "castling right {letter} without king and rook on their home squares"
                    )));
                }
            } else if rook_home {
                mark_moved(game, corner);
            }
        }

        let keeps_right = letters.contains(&king_side) || letters.contains(&queen_side);
        let king_sq = game
            .king_position(color)
            .ok_or_else(|| ChessError::fen(format!("missing {color:?} king")))?;
        if !keeps_right || king_sq != home {
            mark_moved(game, king_sq);
        }
    }
    Ok(())
}

fn mark_moved(game: &mut Game, sq: Square) {
    if let Some(mut piece) = game.piece_at(sq) {
        piece.move_count = piece.move_count.max(1);
        game.set_piece(sq, Some(piece));
    }
}

/// Replays the double push that created the target as a committed
/// placeholder so the en passant rule can see it.
fn apply_en_passant(field: &str, game: &mut Game) -> Result<()> {
    if field == "-" {
        return Ok(());
    }
    let target = Square::from_algebraic(field)
        .map_err(|_| ChessError::fen(format!("invalid en passant square {field:?}")))?;

    let pusher = game.side_to_move.other();
    let expected_row = (pusher.pawn_start_row() as i8 + pusher.forward()) as u8;
    let pawn_sq = target.offset(pusher.forward(), 0);
    let origin = target.offset(-pusher.forward(), 0);
    let (Some(pawn_sq), Some(origin)) = (pawn_sq, origin) else {
        return Err(ChessError::fen(format!("en passant square {field} off its rank")));
    };
    let pawn = game.piece_at(pawn_sq);
    if target.row() != expected_row
        || !pawn.is_some_and(|pc| pc.is(pusher, PieceKind::Pawn))
        || game.piece_at(target).is_some()
        || game.piece_at(origin).is_some()
    {
        return Err(ChessError::fen(format!(
            "en passant square {field} does not follow a double pawn push"
        )));
    }

    let unmoved = Piece::new(PieceKind::Pawn, pusher);
    let push = Move::classify(origin, pawn_sq, unmoved, None, false, None);
    mark_moved(game, pawn_sq);
    game.move_history.push(push);
    game.committed = game.move_history.len();
    Ok(())
}

/// Serializes the game, deriving castling rights and the en passant target
/// from the board and the move history.
pub fn encode(game: &Game) -> String {
    let mut out = String::with_capacity(90);
    for row in 0..8u8 {
        let mut empty = 0;
        for col in 0..8u8 {
            match game.piece_at(Square::at(row, col)) {
                Some(pc) => {
                    if empty > 0 {
                        let _ = write!(out, "{empty}");
                        empty = 0;
                    }
                    out.push(pc.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            let _ = write!(out, "{empty}");
        }
        if row < 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match game.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = game.castling_rights();
    if rights.any() {
        for (held, letter) in [
            (rights.wk, 'K'),
            (rights.wq, 'Q'),
            (rights.bk, 'k'),
            (rights.bq, 'q'),
        ] {
            if held {
                out.push(letter);
            }
        }
    } else {
        out.push('-');
    }

    match game.en_passant_target() {
        Some(sq) => {
            let _ = write!(out, " {sq}");
        }
        None => out.push_str(" -"),
    }

    let _ = write!(
        out,
        " {} {}",
        game.halfmove_clock,
        game.fullmove_number()
    );
    out
}

impl Game {
    pub fn from_fen(text: &str) -> Result<Self> {
        decode(text)
    }

    pub fn to_fen(&self) -> String {
        encode(self)
    }
}

impl FromStr for Game {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
