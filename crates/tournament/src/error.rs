//! Error types for matchmaking, rating and match orchestration

use arena_core::{AgentId, SimulationError};
use thiserror::Error;

/// Errors raised while choosing a pair of agents
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchmakingError {
    #[error("at least 2 eligible agents are required, found {available}")]
    InsufficientPool { available: usize },

    #[error("agent {agent} has non-finite rating {rating}")]
    InvalidRating { agent: AgentId, rating: f64 },
}

/// Errors raised by the rating updater
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("unknown result '{0}'")]
    UnknownResult(String),
}

/// Errors raised by an agent repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),

    #[error("failed to access store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize store: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a single match attempt
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("agents must be different, got {0} twice")]
    DuplicateAgent(AgentId),

    #[error("can't find agent with id {0}")]
    UnknownAgent(AgentId),

    #[error("agent {0} has no executable attached")]
    AgentNotRunnable(AgentId),

    #[error(transparent)]
    Matchmaking(#[from] MatchmakingError),

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
