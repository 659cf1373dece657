//! Error type shared by the parser, the coordinate constructors and the
//! configuration loader.
//!
//! Illegal moves are not errors: legality queries answer `false` and move
//! lookups answer `None`. Broken internal invariants (a missing king, an
//! out-of-order undo) panic instead, because the board can no longer be
//! trusted once they happen.

use thiserror::Error;

/// Errors produced by the engine's public entry points.
#[derive(Debug, Error)]
pub enum ChessError {
    /// The position text could not be decoded.
    #[error("invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// A raw board coordinate was outside `0..8`.
    #[error("square ({row}, {col}) is off the board")]
    SquareOutOfRange { row: i32, col: i32 },

    /// Algebraic square text such as `"e4"` could not be parsed.
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    /// Coordinate move text such as `"e7e8q"` could not be parsed.
    #[error("invalid move text: {0:?}")]
    InvalidMoveText(String),

    /// Engine configuration failed to parse or validate.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChessError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            reason: reason.into(),
        }
    }

    /// True for every variant caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ChessError::Io(_))
    }
}

pub type Result<T, E = ChessError> = std::result::Result<T, E>;
