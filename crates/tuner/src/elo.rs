//! Match scores and Elo estimates

use serde::{Deserialize, Serialize};

/// Result of a paired match from configuration A's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            wins,
            losses,
            draws,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from A's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    /// Elo difference of A over B implied by this result
    pub fn elo_difference(&self) -> Option<f64> {
        elo_difference(self.score())
    }
}

/// Expected score for a player rated `diff` points above the opponent
pub fn expected_score(diff: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf(-diff / 400.0))
}

/// Rating difference implied by a score fraction.
///
/// Returns `None` for scores of exactly 0 or 1 (infinite difference) and for
/// values outside [0, 1].
pub fn elo_difference(score: f64) -> Option<f64> {
    if !(score > 0.0 && score < 1.0) {
        return None;
    }
    Some(-400.0 * (1.0 / score - 1.0).log10())
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
