//! Weighting strategies for rating-biased agent selection
//!
//! A strategy turns a list of candidates into one weight per candidate.
//! [`Distribution`] normalizes those weights and performs the draw, so new
//! matchmaking policies only have to say how much each candidate counts.

use arena_core::AgentId;
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;
use tracing::warn;

/// An agent eligible for selection, with its current rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: AgentId,
    pub rating: f64,
}

impl Candidate {
    pub fn new(id: AgentId, rating: f64) -> Self {
        Self { id, rating }
    }
}

/// Trait implemented by every selection weighting.
pub trait WeightingStrategy: Send + Sync {
    /// One non-negative weight per candidate, in candidate order.
    ///
    /// `anchor` is the rating of an agent already chosen for the match, if
    /// any. Strategies that don't care about it ignore it.
    fn weights(&self, candidates: &[Candidate], anchor: Option<f64>) -> Vec<f64>;

    /// Returns the strategy's name for logging
    fn name(&self) -> &str;
}

/// Probability distribution over a candidate list
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probabilities: Vec<f64>,
}

impl Distribution {
    /// Normalize `weights` to probabilities.
    ///
    /// Negative or non-finite weights count as zero. If nothing is left
    /// (all weights zero, e.g. a kernel that underflowed) the distribution is
    /// uniform.
    pub fn from_weights(weights: &[f64]) -> Self {
        let cleaned: Vec<f64> = weights
            .iter()
            .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
            .collect();
        let total: f64 = cleaned.iter().sum();

        if total > 0.0 && total.is_finite() {
            Self {
                probabilities: cleaned.iter().map(|w| w / total).collect(),
            }
        } else {
            if !weights.is_empty() {
                warn!(
                    candidates = weights.len(),
                    "degenerate selection weights, falling back to uniform"
                );
            }
            Self::uniform(weights.len())
        }
    }

    pub fn uniform(n: usize) -> Self {
        Self {
            probabilities: vec![1.0 / n as f64; n],
        }
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Draw an index according to the distribution.
    ///
    /// Returns `None` only for an empty distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.probabilities.is_empty() {
            return None;
        }
        match WeightedIndex::new(&self.probabilities) {
            Ok(index) => Some(index.sample(rng)),
            Err(_) => Some(rng.gen_range(0..self.probabilities.len())),
        }
    }
}

/// Population standard deviation (divides by N); 0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

// =============================================================================
// Strategies
// =============================================================================

/// Weight proportional to rating rank: lowest rated gets 1, highest gets N.
///
/// Equal ratings keep their input order, so ties are broken the same way on
/// every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankWeighting;

impl WeightingStrategy for RankWeighting {
    fn weights(&self, candidates: &[Candidate], _anchor: Option<f64>) -> Vec<f64> {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| candidates[a].rating.total_cmp(&candidates[b].rating));

        let mut weights = vec![0.0; candidates.len()];
        for (rank, &i) in order.iter().enumerate() {
            weights[i] = (rank + 1) as f64;
        }
        weights
    }

    fn name(&self) -> &str {
        "rank"
    }
}

/// Gaussian kernel centered on the anchor rating.
///
/// The kernel width is the population standard deviation of the candidates'
/// ratings. When every candidate has the same rating all weights are equal.
/// Without an anchor the kernel is centered on the candidates' mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianKernelWeighting;

impl WeightingStrategy for GaussianKernelWeighting {
    fn weights(&self, candidates: &[Candidate], anchor: Option<f64>) -> Vec<f64> {
        let ratings: Vec<f64> = candidates.iter().map(|c| c.rating).collect();
        let std = population_std_dev(&ratings);

        if std == 0.0 {
            return vec![1.0; candidates.len()];
        }

        let center = anchor.unwrap_or_else(|| ratings.iter().sum::<f64>() / ratings.len() as f64);
        ratings
            .iter()
            .map(|r| (-(r - center).powi(2) / (2.0 * std * std)).exp())
            .collect()
    }

    fn name(&self) -> &str {
        "gaussian"
    }
}

/// Every candidate equally likely
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWeighting;

impl WeightingStrategy for UniformWeighting {
    fn weights(&self, candidates: &[Candidate], _anchor: Option<f64>) -> Vec<f64> {
        vec![1.0; candidates.len()]
    }

    fn name(&self) -> &str {
        "uniform"
    }
}

#[cfg(test)]
#[path = "weighting_tests.rs"]
mod weighting_tests;
