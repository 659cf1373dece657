pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod ordering;
pub mod perft;
pub mod rules;
pub mod search;
pub mod time_control;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use config::{EngineConfig, GameConfig, SearchConfig};
pub use engine::MinimaxEngine;
pub use error::{ChessError, Result};
pub use fen::START_FEN;
pub use movegen::*;
pub use moves::*;
pub use notation::*;
pub use ordering::order_moves;
pub use perft::{divide, perft};
pub use rules::Outcome;
pub use search::{SearchOptions, SearchOutcome, minimax, search_parallel, search_with};
pub use time_control::*;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: the seam between a search and its front end
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation in centipawns, positive favours White
    pub score: i32,
    /// Search depth requested
    pub depth: u8,
    /// Terminal nodes evaluated
    pub nodes: u64,
    /// Whether search was stopped early by the time control
    pub stopped: bool,
}

/// A move-picking engine driven by a front end.
pub trait Engine: Send {
    /// Search the game with the given limits. The game is left unchanged.
    fn search(&mut self, game: &Game, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}

    /// Set a named option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
