//! Step traces produced by a simulation engine.

use serde::{Deserialize, Serialize};

use crate::Slot;

/// What one agent did on one step, and the reward it earned for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub action: u32,
    pub reward: u32,
}

/// One step of a two-player game: `[left, right]`
pub type Step = [StepRecord; 2];

/// Full trace of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Engine configuration the game ran with
    pub configuration: serde_json::Value,
    /// Hidden state the game started from (e.g. machine thresholds)
    pub initial_conditions: Vec<u32>,
    /// Per-step records, excluding the initial observation
    pub steps: Vec<Step>,
}

impl Episode {
    pub fn new(configuration: serde_json::Value, initial_conditions: Vec<u32>) -> Self {
        Self {
            configuration,
            initial_conditions,
            steps: Vec::new(),
        }
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    fn index(slot: Slot) -> usize {
        match slot {
            Slot::Left => 0,
            Slot::Right => 1,
        }
    }

    /// Actions taken by the agent in `slot`, in step order
    pub fn actions(&self, slot: Slot) -> Vec<u32> {
        let i = Self::index(slot);
        self.steps.iter().map(|s| s[i].action).collect()
    }

    /// Per-step rewards earned by the agent in `slot`
    pub fn rewards(&self, slot: Slot) -> Vec<u32> {
        let i = Self::index(slot);
        self.steps.iter().map(|s| s[i].reward).collect()
    }

    /// Accumulated reward of the agent in `slot`
    pub fn total_reward(&self, slot: Slot) -> u64 {
        let i = Self::index(slot);
        self.steps.iter().map(|s| u64::from(s[i].reward)).sum()
    }
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod trace_tests;
