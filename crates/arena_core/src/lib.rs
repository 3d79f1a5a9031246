//! Arena Core
//!
//! Shared kernel for the agent arena: agent identifiers, the per-step
//! trace an engine produces for a game, and the `SimulationEngine` trait
//! that every game environment implements.

pub mod trace;
pub mod types;

pub use trace::*;
pub use types::*;

use thiserror::Error;

// =============================================================================
// Engine trait: implemented by every game environment
// =============================================================================

/// Errors raised by a simulation engine while running a game
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("unknown agent policy '{0}'")]
    UnknownPolicy(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfiguration(String),

    #[error("engine failed: {0}")]
    Failed(String),
}

/// Trait that all game environments must implement.
///
/// An engine plays exactly two agents against each other. The agents are
/// handed over as their executable tags (whatever the engine understands as
/// a runnable agent) in slot order: `left` is player 0, `right` player 1.
pub trait SimulationEngine {
    /// Prepare a fresh game. Called once before every `run`.
    fn reset(&mut self);

    /// Play one full game and return the step-indexed trace.
    fn run(&mut self, left: &str, right: &str) -> Result<Episode, SimulationError>;

    /// Returns the engine's name for logging
    fn name(&self) -> &str;
}
