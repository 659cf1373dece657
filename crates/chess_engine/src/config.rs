//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [game]
//! fifty_move_rule = true
//!
//! [search]
//! depth = 5
//! alpha_beta = true
//! move_ordering = true
//! parallel = false
//! time_limit_ms = 2000
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, Result};
use crate::search::SearchOptions;

/// Deepest search the configuration accepts.
pub const MAX_DEPTH: u8 = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
}

/// Rules that vary between callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Treat a half-move clock of 100 as a finished game.
    pub fifty_move_rule: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub depth: u8,
    pub alpha_beta: bool,
    pub move_ordering: bool,
    /// Split the root moves across the rayon thread pool.
    pub parallel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            alpha_beta: true,
            move_ordering: true,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            alpha_beta: self.alpha_beta,
            move_ordering: self.move_ordering,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| ChessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ChessError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let depth = self.search.depth;
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ChessError::Config(format!(
                "search.depth must be between 1 and {MAX_DEPTH}, got {depth}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
