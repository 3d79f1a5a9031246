//! Tournament Runner for agent arenas
//!
//! This crate provides infrastructure for:
//! - Choosing pairs of agents, biased toward strong and evenly matched games
//! - Updating Elo ratings from game results
//! - Running games on a `SimulationEngine` and storing the outcome
//!
//! # Usage
//!
//! ```bash
//! # Register two agents and play 20 rated games between the enabled agents
//! cargo run -p tournament -- add-agent alice greedy
//! cargo run -p tournament -- add-agent bob epsilon:0.1
//! cargo run -p tournament -- run --games 20
//!
//! # Show ratings
//! cargo run -p tournament -- leaderboard
//! ```

mod config;
mod elo;
mod error;
mod match_runner;
mod matchmaker;
mod repository;
mod weighting;

pub use config::*;
pub use elo::*;
pub use error::*;
pub use match_runner::*;
pub use matchmaker::*;
pub use repository::*;
pub use weighting::*;
