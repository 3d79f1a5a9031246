//! Multi-Armed Bandit Engine
//!
//! Two agents share a row of slot machines. Each machine pays out with a
//! hidden probability, and every pull makes that machine a little stingier.
//! Agents see their own last reward and the machine the opponent pulled, so
//! good policies balance exploration against following the opponent.
//!
//! Useful for:
//! - Running the arena end to end without an external engine
//! - Baseline comparisons between simple policies

mod policy;

pub use policy::*;

use arena_core::{Episode, SimulationEngine, SimulationError, StepRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rules of a bandit game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditConfig {
    /// Number of machines on the table
    pub bandit_count: u32,
    /// Number of pulls each agent makes
    pub episode_steps: u32,
    /// Multiplier applied to a machine's threshold for every pull
    pub decay_rate: f64,
    /// Upper bound of the threshold scale
    pub sample_resolution: u32,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            bandit_count: 100,
            episode_steps: 2000,
            decay_rate: 0.97,
            sample_resolution: 100,
        }
    }
}

impl BanditConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.bandit_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "bandit_count must be positive".to_string(),
            ));
        }
        if self.sample_resolution == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "sample_resolution must be positive".to_string(),
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "decay_rate must be in (0, 1], got {}",
                self.decay_rate
            )));
        }
        Ok(())
    }
}

/// What an agent sees before choosing its next machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub step: u32,
    pub bandit_count: u32,
    pub decay_rate: f64,
    pub last_action: Option<u32>,
    pub last_reward: u32,
    pub opponent_last_action: Option<u32>,
}

/// Bandit environment implementing `SimulationEngine`
pub struct BanditEngine {
    config: BanditConfig,
    rng: StdRng,
    thresholds: Vec<f64>,
    initial: Vec<u32>,
    ready: bool,
}

impl BanditEngine {
    pub fn new(config: BanditConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a fixed seed, for reproducible games
    pub fn with_seed(config: BanditConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BanditConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            thresholds: Vec::new(),
            initial: Vec::new(),
            ready: false,
        }
    }

    pub fn config(&self) -> &BanditConfig {
        &self.config
    }

    /// Current (decayed) machine thresholds
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    fn pull(&mut self, machine: u32) -> u32 {
        let threshold = self.thresholds[machine as usize];
        let draw = self.rng.gen::<f64>() * f64::from(self.config.sample_resolution);
        u32::from(draw < threshold)
    }
}

impl SimulationEngine for BanditEngine {
    fn reset(&mut self) {
        let resolution = self.config.sample_resolution;
        self.initial = (0..self.config.bandit_count)
            .map(|_| self.rng.gen_range(0..=resolution))
            .collect();
        self.thresholds = self.initial.iter().map(|&t| f64::from(t)).collect();
        self.ready = true;
    }

    fn run(&mut self, left: &str, right: &str) -> Result<Episode, SimulationError> {
        self.config.validate()?;
        if !self.ready {
            return Err(SimulationError::Failed(
                "engine must be reset before each run".to_string(),
            ));
        }
        self.ready = false;

        let mut policies = [policy_from_tag(left)?, policy_from_tag(right)?];
        let configuration = serde_json::to_value(&self.config)
            .map_err(|e| SimulationError::Failed(e.to_string()))?;
        let mut episode = Episode::new(configuration, self.initial.clone());

        let bandit_count = self.config.bandit_count;
        let mut last: [Option<StepRecord>; 2] = [None, None];

        for step in 0..self.config.episode_steps {
            let mut actions = [0u32; 2];
            for (seat, policy) in policies.iter_mut().enumerate() {
                let other = 1 - seat;
                let obs = Observation {
                    step,
                    bandit_count,
                    decay_rate: self.config.decay_rate,
                    last_action: last[seat].map(|r| r.action),
                    last_reward: last[seat].map_or(0, |r| r.reward),
                    opponent_last_action: last[other].map(|r| r.action),
                };
                // Out-of-range picks wrap instead of aborting the game
                actions[seat] = policy.act(&obs, &mut self.rng) % bandit_count;
            }

            let rewards = [self.pull(actions[0]), self.pull(actions[1])];
            for &machine in &actions {
                self.thresholds[machine as usize] *= self.config.decay_rate;
            }

            let records = [
                StepRecord {
                    action: actions[0],
                    reward: rewards[0],
                },
                StepRecord {
                    action: actions[1],
                    reward: rewards[1],
                },
            ];
            last = [Some(records[0]), Some(records[1])];
            episode.steps.push(records);
        }

        debug!(
            left,
            right,
            steps = episode.num_steps(),
            "bandit game finished"
        );
        Ok(episode)
    }

    fn name(&self) -> &str {
        "Bandit v1.0"
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
