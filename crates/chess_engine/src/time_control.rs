//! Search budgets and cooperative cancellation.
//!
//! A [`TimeControl`] is a stop flag plus an optional wall-clock budget. Its
//! clones share both, so one thread can cancel a search another thread runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::config::SearchConfig;

/// Number of search calls between two reads of the clock.
pub const CLOCK_POLL_INTERVAL: u64 = 1024;

/// Depth and time budget for one engine search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Plies to search below the root
    pub depth: u8,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            time_control: TimeControl::unlimited(),
        }
    }

    pub fn timed(depth: u8, budget: Duration) -> Self {
        Self {
            depth,
            time_control: TimeControl::new(Some(budget)),
        }
    }

    /// Limits described by the `[search]` section of the configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        match config.time_limit() {
            Some(budget) => Self::timed(config.depth, budget),
            None => Self::depth(config.depth),
        }
    }

    pub fn move_time(&self) -> Option<Duration> {
        self.time_control.time_limit()
    }
}

#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started: Arc<RwLock<Option<Instant>>>,
    budget: Option<Duration>,
}

impl TimeControl {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Arc::new(RwLock::new(None)),
            budget,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Starts the clock and clears any earlier stop request.
    pub fn start(&self) {
        *self.started.write().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.budget
    }

    /// Time since [`start`](Self::start), zero before it.
    pub fn elapsed(&self) -> Duration {
        self.started
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map_or(Duration::ZERO, |at| at.elapsed())
    }

    /// Whether the search must stop after `calls` polls. The clock is only
    /// read on every [`CLOCK_POLL_INTERVAL`]th call.
    #[inline]
    pub fn poll(&self, calls: u64) -> bool {
        if self.is_stopped() {
            return true;
        }
        calls.is_multiple_of(CLOCK_POLL_INTERVAL) && self.check_time()
    }

    /// Reads the clock now and raises the stop flag once the budget is spent.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        let spent = match self.budget {
            Some(budget) => self.elapsed() >= budget && self.is_started(),
            None => false,
        };
        if spent {
            self.stop();
        }
        spent
    }

    fn is_started(&self) -> bool {
        self.started
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
