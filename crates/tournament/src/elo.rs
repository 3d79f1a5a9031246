//! Elo rating calculation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// Starting rating for newly registered agents
pub const DEFAULT_RATING: f64 = 1200.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Outcome of a single game between agent A and agent B
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    AWon,
    BWon,
    Draw,
}

impl MatchOutcome {
    /// Actual scores `(A, B)`: 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn scores(self) -> (f64, f64) {
        match self {
            MatchOutcome::AWon => (1.0, 0.0),
            MatchOutcome::BWon => (0.0, 1.0),
            MatchOutcome::Draw => (0.5, 0.5),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            MatchOutcome::AWon => "A_WON",
            MatchOutcome::BWon => "B_WON",
            MatchOutcome::Draw => "DRAW",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MatchOutcome {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A_WON" | "LEFT_WON" => Ok(MatchOutcome::AWon),
            "B_WON" | "RIGHT_WON" => Ok(MatchOutcome::BWon),
            "DRAW" => Ok(MatchOutcome::Draw),
            _ => Err(RatingError::UnknownResult(s.to_string())),
        }
    }
}

/// Expected score of a player rated `rating_a` against one rated `rating_b`.
///
/// Same value as `10^(a/400) / (10^(a/400) + 10^(b/400))`, written in terms
/// of the rating difference so large ratings don't overflow.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / 400.0))
}

/// Expected scores `(A, B)`; they always sum to 1
pub fn expected_scores(rating_a: f64, rating_b: f64) -> (f64, f64) {
    let ea = expected_score(rating_a, rating_b);
    (ea, 1.0 - ea)
}

/// Ratings after a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub new_a: f64,
    pub new_b: f64,
    /// Points moved from B to A (negative when A lost points)
    pub delta: f64,
}

/// Elo rating updater with a fixed K-factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloUpdater {
    pub k_factor: f64,
}

impl Default for EloUpdater {
    fn default() -> Self {
        Self::new(K_FACTOR)
    }
}

impl EloUpdater {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    /// New ratings for A and B after `outcome`.
    ///
    /// Ratings are unbounded: no floor or ceiling is applied.
    pub fn update(&self, rating_a: f64, rating_b: f64, outcome: MatchOutcome) -> RatingUpdate {
        let (expected_a, _) = expected_scores(rating_a, rating_b);
        let (actual_a, _) = outcome.scores();

        let delta = self.k_factor * (actual_a - expected_a);

        RatingUpdate {
            new_a: rating_a + delta,
            new_b: rating_b - delta,
            delta,
        }
    }

    /// Same as [`EloUpdater::update`], for a result given as a tag
    pub fn update_tagged(
        &self,
        rating_a: f64,
        rating_b: f64,
        tag: &str,
    ) -> Result<RatingUpdate, RatingError> {
        let outcome = tag.parse::<MatchOutcome>()?;
        Ok(self.update(rating_a, rating_b, outcome))
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
