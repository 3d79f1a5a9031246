//! Built-in bandit agent policies

use arena_core::SimulationError;
use rand::{Rng, RngCore};

use crate::Observation;

/// Trait implemented by every bandit agent.
pub trait BanditPolicy: Send {
    /// Choose the machine to pull on this step
    fn act(&mut self, obs: &Observation, rng: &mut dyn RngCore) -> u32;

    /// Returns the policy's name for logging
    fn name(&self) -> &str;
}

/// Resolve an agent's executable tag into a policy.
///
/// Known tags: `random`, `greedy`, `epsilon:<e>` with `0 <= e <= 1`.
pub fn policy_from_tag(tag: &str) -> Result<Box<dyn BanditPolicy>, SimulationError> {
    let tag = tag.trim();
    let (kind, arg) = match tag.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (tag, None),
    };

    match (kind.to_lowercase().as_str(), arg) {
        ("random", None) => Ok(Box::new(RandomPolicy)),
        ("greedy", None) => Ok(Box::new(GreedyPolicy::new())),
        ("epsilon", Some(arg)) => match arg.parse::<f64>() {
            Ok(epsilon) if (0.0..=1.0).contains(&epsilon) => {
                Ok(Box::new(EpsilonGreedyPolicy::new(epsilon)))
            }
            _ => Err(SimulationError::UnknownPolicy(tag.to_string())),
        },
        _ => Err(SimulationError::UnknownPolicy(tag.to_string())),
    }
}

/// Pulls a machine uniformly at random every step
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl BanditPolicy for RandomPolicy {
    fn act(&mut self, obs: &Observation, rng: &mut dyn RngCore) -> u32 {
        rng.gen_range(0..obs.bandit_count)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Pulls the machine with the best estimated payout.
///
/// Each machine's estimate is the Laplace-smoothed success rate of our own
/// pulls, shrunk by the decay every pull (ours and the opponent's) has
/// already applied to it.
#[derive(Debug, Clone, Default)]
pub struct GreedyPolicy {
    wins: Vec<u32>,
    losses: Vec<u32>,
    pulls: Vec<u32>,
    decay_rate: f64,
}

impl GreedyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&mut self, obs: &Observation) {
        let n = obs.bandit_count as usize;
        if self.pulls.len() != n {
            self.wins = vec![0; n];
            self.losses = vec![0; n];
            self.pulls = vec![0; n];
        }
        self.decay_rate = obs.decay_rate;

        if let Some(action) = obs.last_action {
            let i = action as usize;
            if obs.last_reward > 0 {
                self.wins[i] += 1;
            } else {
                self.losses[i] += 1;
            }
            self.pulls[i] += 1;
        }
        if let Some(action) = obs.opponent_last_action {
            self.pulls[action as usize] += 1;
        }
    }

    /// Estimated payout of `machine`
    pub fn estimate(&self, machine: usize) -> f64 {
        let wins = f64::from(self.wins[machine]);
        let losses = f64::from(self.losses[machine]);
        let mean = (wins + 1.0) / (wins + losses + 2.0);
        mean * self.decay_rate.powi(self.pulls[machine] as i32)
    }

    fn best(&self) -> u32 {
        let mut best = 0;
        for i in 1..self.pulls.len() {
            if self.estimate(i) > self.estimate(best) {
                best = i;
            }
        }
        best as u32
    }
}

impl BanditPolicy for GreedyPolicy {
    fn act(&mut self, obs: &Observation, _rng: &mut dyn RngCore) -> u32 {
        self.observe(obs);
        self.best()
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Greedy, except a random machine is tried with probability `epsilon`
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPolicy {
    epsilon: f64,
    greedy: GreedyPolicy,
}

impl EpsilonGreedyPolicy {
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_nan() {
            0.0
        } else {
            epsilon.clamp(0.0, 1.0)
        };
        Self {
            epsilon,
            greedy: GreedyPolicy::new(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl BanditPolicy for EpsilonGreedyPolicy {
    fn act(&mut self, obs: &Observation, rng: &mut dyn RngCore) -> u32 {
        self.greedy.observe(obs);
        if rng.gen_bool(self.epsilon) {
            rng.gen_range(0..obs.bandit_count)
        } else {
            self.greedy.best()
        }
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
