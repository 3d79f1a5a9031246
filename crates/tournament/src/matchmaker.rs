//! Rating-biased pairing of agents
//!
//! Two draws per match:
//! - the first agent is drawn with a bias toward strong agents
//! - the second is drawn from the rest with a bias toward agents rated close
//!   to the first
//!
//! The two picks are then seated in random order, so the slot an agent
//! plays from says nothing about how it was chosen.

use arena_core::{AgentId, Slot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::MatchmakingError;
use crate::weighting::{
    Candidate, Distribution, GaussianKernelWeighting, RankWeighting, WeightingStrategy,
};

/// Agents currently available for matches, keyed by id
#[derive(Debug, Clone, PartialEq)]
pub struct EligiblePool {
    ratings: BTreeMap<AgentId, f64>,
}

impl EligiblePool {
    /// Build a pool from `(id, rating)` pairs.
    ///
    /// Fails if fewer than 2 distinct agents are given or a rating is not a
    /// finite number. A repeated id keeps its last rating.
    pub fn new<I>(ratings: I) -> Result<Self, MatchmakingError>
    where
        I: IntoIterator<Item = (AgentId, f64)>,
    {
        let ratings: BTreeMap<AgentId, f64> = ratings.into_iter().collect();

        if let Some((&agent, &rating)) = ratings.iter().find(|(_, r)| !r.is_finite()) {
            return Err(MatchmakingError::InvalidRating { agent, rating });
        }
        if ratings.len() < 2 {
            return Err(MatchmakingError::InsufficientPool {
                available: ratings.len(),
            });
        }
        Ok(Self { ratings })
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.ratings.contains_key(&id)
    }

    pub fn rating(&self, id: AgentId) -> Option<f64> {
        self.ratings.get(&id).copied()
    }

    /// Candidates in ascending id order
    pub fn candidates(&self) -> Vec<Candidate> {
        self.ratings
            .iter()
            .map(|(&id, &rating)| Candidate::new(id, rating))
            .collect()
    }
}

/// Two agents chosen for a match.
///
/// `first`/`second` record how the agents were picked; `left`/`right` are
/// the seats they take in the simulation. Games are played and rated by
/// seat, via [`Pairing::agent_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub first: AgentId,
    pub second: AgentId,
    pub left: AgentId,
    pub right: AgentId,
}

impl Pairing {
    /// Seat the two picks; `first_left` decides who plays left
    pub fn seat(first: AgentId, second: AgentId, first_left: bool) -> Self {
        let (left, right) = if first_left {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            first,
            second,
            left,
            right,
        }
    }

    /// Agent seated in `slot`
    pub fn agent_at(&self, slot: Slot) -> AgentId {
        match slot {
            Slot::Left => self.left,
            Slot::Right => self.right,
        }
    }
}

/// Chooses pairs of agents using one weighting per pick
pub struct Matchmaker {
    first: Box<dyn WeightingStrategy>,
    second: Box<dyn WeightingStrategy>,
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::new(Box::new(RankWeighting), Box::new(GaussianKernelWeighting))
    }
}

impl fmt::Debug for Matchmaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matchmaker")
            .field("first", &self.first.name())
            .field("second", &self.second.name())
            .finish()
    }
}

impl Matchmaker {
    pub fn new(first: Box<dyn WeightingStrategy>, second: Box<dyn WeightingStrategy>) -> Self {
        Self { first, second }
    }

    /// Choose two distinct agents from `pool`, drawing randomness from `rng`
    pub fn choose_pair<R: Rng + ?Sized>(
        &self,
        pool: &EligiblePool,
        rng: &mut R,
    ) -> Result<Pairing, MatchmakingError> {
        let candidates = pool.candidates();
        if candidates.len() < 2 {
            return Err(MatchmakingError::InsufficientPool {
                available: candidates.len(),
            });
        }

        let first = pick(self.first.as_ref(), &candidates, None, rng)?;

        let others: Vec<Candidate> = candidates
            .iter()
            .filter(|c| c.id != first.id)
            .copied()
            .collect();
        let second = pick(self.second.as_ref(), &others, Some(first.rating), rng)?;

        let pairing = Pairing::seat(first.id, second.id, rng.gen_bool(0.5));
        debug!(
            first = %pairing.first,
            second = %pairing.second,
            left = %pairing.left,
            right = %pairing.right,
            "pairing chosen"
        );
        Ok(pairing)
    }

    /// Choose a pair with a generator freshly seeded from the clock
    pub fn choose_pair_reseeded(&self, pool: &EligiblePool) -> Result<Pairing, MatchmakingError> {
        self.choose_pair(pool, &mut clock_seeded_rng())
    }
}

fn pick<R: Rng + ?Sized>(
    strategy: &dyn WeightingStrategy,
    candidates: &[Candidate],
    anchor: Option<f64>,
    rng: &mut R,
) -> Result<Candidate, MatchmakingError> {
    let dist = Distribution::from_weights(&strategy.weights(candidates, anchor));
    debug!(
        strategy = strategy.name(),
        probabilities = ?dist.probabilities(),
        "selection distribution"
    );

    dist.sample(rng)
        .map(|i| candidates[i])
        .ok_or(MatchmakingError::InsufficientPool {
            available: candidates.len(),
        })
}

static RESEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generator seeded from the nanosecond wall clock.
///
/// A per-process counter is mixed in so two calls within the same clock
/// tick still get different seeds.
pub fn clock_seeded_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let count = RESEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = (nanos as u64) ^ ((nanos >> 64) as u64) ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
#[path = "matchmaker_tests.rs"]
mod matchmaker_tests;
