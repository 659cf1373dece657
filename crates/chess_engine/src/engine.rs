//! Minimax engine behind the [`Engine`](crate::Engine) trait.

use crate::board::Game;
use crate::config::SearchConfig;
use crate::search::{search_parallel, search_with};
use crate::time_control::SearchLimits;
use crate::types::Color;
use crate::{Engine, SearchResult};

/// Plays the side to move with minimax, configured by a [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: SearchConfig,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Terminal nodes evaluated since the last `new_game`.
    pub fn total_nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, game: &Game, limits: SearchLimits) -> SearchResult {
        limits.time_control.start();
        let maximizing = game.side_to_move() == Color::White;
        let options = self.config.options();
        let tc = &limits.time_control;

        let outcome = if self.config.parallel {
            search_parallel(game, limits.depth, maximizing, options, tc)
        } else {
            let mut scratch = game.clone();
            search_with(&mut scratch, limits.depth, maximizing, options, tc)
        };
        self.nodes += outcome.nodes;

        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: limits.depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let flag = match value {
            "true" => true,
            "false" => false,
            _ => return false,
        };
        match name {
            "alpha_beta" => self.config.alpha_beta = flag,
            "move_ordering" => self.config.move_ordering = flag,
            "parallel" => self.config.parallel = flag,
            _ => return false,
        }
        true
    }
}
