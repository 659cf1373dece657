//! Zobrist keys for position identity.
//!
//! A key covers what the first four FEN fields describe: piece placement,
//! side to move, derived castling rights and the en passant file. Clocks are
//! left out so repeated positions hash equal regardless of move numbers.

use crate::board::Game;
use crate::types::{Color, Piece, Square};

/// Pre-computed random values, generated at compile time from a fixed seed.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when Black is to move
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// En passant file (0-7)
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    /// Key for a piece on a square. Move counters do not contribute.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }

    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hashes placement, side to move, castling rights and the en passant file.
pub fn position_key(game: &Game) -> u64 {
    let mut key = game
        .pieces()
        .fold(0u64, |acc, (sq, pc)| acc ^ ZOBRIST.piece_key(pc, sq));

    if game.side_to_move() == Color::Black {
        key ^= ZOBRIST.side_to_move;
    }

    let rights = game.castling_rights();
    for (index, held) in [rights.wk, rights.wq, rights.bk, rights.bq]
        .into_iter()
        .enumerate()
    {
        if held {
            key ^= ZOBRIST.castling_key(index);
        }
    }

    if let Some(target) = game.en_passant_target() {
        key ^= ZOBRIST.ep_key(target.col());
    }
    key
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
