#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that aggregates finished games into session statistics.

use tilt_2048_core::{Event, GameResult};

/// Keeps every finished game of the session and derives averages from them.
#[derive(Debug, Default)]
pub struct Results {
    results: Vec<GameResult>,
}

impl Results {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events, recording one result per `GameEnded`.
    pub fn handle(&mut self, events: &[Event]) {
        for result in events.iter().filter_map(GameResult::from_event) {
            self.record(result);
        }
    }

    /// Adds a finished game.
    pub fn record(&mut self, result: GameResult) {
        self.results.push(result);
        log::debug!(
            "recorded game #{}: score={} max={}",
            self.results.len(),
            result.score,
            result.max_tile_value
        );
    }

    /// Every recorded game in completion order.
    #[must_use]
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Number of finished games.
    #[must_use]
    pub fn games_played(&self) -> usize {
        self.results.len()
    }

    /// Mean final score, `None` before any game ended.
    #[must_use]
    pub fn average_score(&self) -> Option<f64> {
        self.mean(|result| result.score as f64)
    }

    /// Mean largest tile, `None` before any game ended.
    #[must_use]
    pub fn average_max_tile(&self) -> Option<f64> {
        self.mean(|result| f64::from(result.max_tile_value))
    }

    /// Highest final score so far.
    #[must_use]
    pub fn best_score(&self) -> Option<u64> {
        self.results.iter().map(|result| result.score).max()
    }

    fn mean<F>(&self, metric: F) -> Option<f64>
    where
        F: Fn(&GameResult) -> f64,
    {
        if self.results.is_empty() {
            return None;
        }
        let total: f64 = self.results.iter().map(metric).sum();
        Some(total / self.results.len() as f64)
    }
}
