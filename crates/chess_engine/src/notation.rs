//! Coordinate move text: `e2e4`, `e7e8q`.

use std::fmt;
use std::str::FromStr;

use crate::board::Game;
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::types::{PieceKind, Square};

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// A requested move as it arrives from a user: two squares and an optional
/// promotion choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for MoveRequest {
    type Err = ChessError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || ChessError::InvalidMoveText(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2]).map_err(|_| invalid())?;
        let to = Square::from_algebraic(&text[2..4]).map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(ch) => match PieceKind::from_char(ch) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

/// Parses move text and resolves it against the legal moves of `game`.
/// Well-formed text naming an illegal move yields `Ok(None)`.
pub fn parse_move(game: &mut Game, text: &str) -> Result<Option<Move>> {
    let request: MoveRequest = text.parse()?;
    Ok(game.find_move(request.from, request.to, request.promotion))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
