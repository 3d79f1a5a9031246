//! Agent and game storage
//!
//! The orchestration only talks to the [`AgentRepository`] trait. The
//! bundled [`ArenaStore`] keeps everything in memory and can be saved to and
//! loaded from a JSON file.

use arena_core::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use crate::elo::{MatchOutcome, DEFAULT_RATING};
use crate::error::RepositoryError;

/// A registered agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    pub rating: f64,
    pub enabled: bool,
    /// What the engine runs for this agent; `None` until one is attached
    pub executable: Option<String>,
}

impl AgentRecord {
    /// Enabled and runnable
    pub fn is_eligible(&self) -> bool {
        self.enabled && self.executable.is_some()
    }
}

/// Result of a game, by seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameResult {
    LeftWon,
    RightWon,
    Draw,
}

impl GameResult {
    /// Higher total reward wins; equal totals are always a draw
    pub fn from_totals(left_total: u64, right_total: u64) -> Self {
        match left_total.cmp(&right_total) {
            std::cmp::Ordering::Greater => GameResult::LeftWon,
            std::cmp::Ordering::Less => GameResult::RightWon,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

impl From<GameResult> for MatchOutcome {
    /// Left is player A, right is player B
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::LeftWon => MatchOutcome::AWon,
            GameResult::RightWon => MatchOutcome::BWon,
            GameResult::Draw => MatchOutcome::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Finished,
}

/// Everything recorded about one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: Uuid,
    pub left_agent: AgentId,
    pub right_agent: AgentId,
    /// Ratings before the game
    pub left_current_rating: f64,
    pub right_current_rating: f64,
    pub configuration: serde_json::Value,
    pub initial_conditions: Vec<u32>,
    pub left_actions: Vec<u32>,
    pub right_actions: Vec<u32>,
    pub left_rewards: Vec<u32>,
    pub right_rewards: Vec<u32>,
    pub result: Option<GameResult>,
    pub status: GameStatus,
    pub left_new_rating: Option<f64>,
    pub right_new_rating: Option<f64>,
    pub created: DateTime<Utc>,
    pub finished: Option<DateTime<Utc>>,
}

impl GameRecord {
    /// A game that has started but not produced a result yet
    pub fn start(left: &AgentRecord, right: &AgentRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            left_agent: left.id,
            right_agent: right.id,
            left_current_rating: left.rating,
            right_current_rating: right.rating,
            configuration: serde_json::Value::Null,
            initial_conditions: Vec::new(),
            left_actions: Vec::new(),
            right_actions: Vec::new(),
            left_rewards: Vec::new(),
            right_rewards: Vec::new(),
            result: None,
            status: GameStatus::Running,
            left_new_rating: None,
            right_new_rating: None,
            created: Utc::now(),
            finished: None,
        }
    }

    pub fn involves(&self, id: AgentId) -> bool {
        self.left_agent == id || self.right_agent == id
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.result {
            Some(GameResult::LeftWon) => "1-0",
            Some(GameResult::RightWon) => "0-1",
            Some(GameResult::Draw) => "1/2",
            None => "*",
        };
        write!(
            f,
            "{} ({:.1}) vs {} ({:.1}): {}",
            self.left_agent,
            self.left_current_rating,
            self.right_agent,
            self.right_current_rating,
            result
        )?;
        if let (Some(l), Some(r)) = (self.left_new_rating, self.right_new_rating) {
            write!(f, " -> {:.1} / {:.1}", l, r)?;
        }
        Ok(())
    }
}

/// Storage the orchestration reads agents from and writes results to.
pub trait AgentRepository {
    /// `(id, rating)` of every agent currently available for matches
    fn eligible_ratings(&self) -> Result<Vec<(AgentId, f64)>, RepositoryError>;

    /// Look up an agent; `Ok(None)` if it doesn't exist
    fn agent(&self, id: AgentId) -> Result<Option<AgentRecord>, RepositoryError>;

    /// Store a game together with the new ratings of its agents.
    ///
    /// Either everything is written or nothing is: an unknown agent id in
    /// `ratings` fails the call before the game or any rating changes. A game
    /// with the same id as a stored one replaces it.
    fn record_game(
        &mut self,
        game: &GameRecord,
        ratings: [(AgentId, f64); 2],
    ) -> Result<(), RepositoryError>;
}

/// In-memory agent store with JSON persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaStore {
    agents: Vec<AgentRecord>,
    games: Vec<GameRecord>,
}

impl ArenaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load store from a JSON file
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load store from a JSON file, or start empty if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, RepositoryError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save store to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Add an enabled agent with the given starting rating
    pub fn register_agent_with_rating(
        &mut self,
        name: &str,
        executable: Option<String>,
        rating: f64,
    ) -> AgentId {
        let id = AgentId(self.agents.iter().map(|a| a.id.get()).max().unwrap_or(0) + 1);
        self.agents.push(AgentRecord {
            id,
            name: name.to_string(),
            rating,
            enabled: true,
            executable,
        });
        id
    }

    /// Add an enabled agent at the default rating
    pub fn register_agent(&mut self, name: &str, executable: Option<String>) -> AgentId {
        self.register_agent_with_rating(name, executable, DEFAULT_RATING)
    }

    pub fn set_enabled(&mut self, id: AgentId, enabled: bool) -> Result<(), RepositoryError> {
        let agent = self.agent_mut(id)?;
        agent.enabled = enabled;
        Ok(())
    }

    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn games_played(&self, id: AgentId) -> usize {
        self.games
            .iter()
            .filter(|g| g.status == GameStatus::Finished && g.involves(id))
            .count()
    }

    fn agent_mut(&mut self, id: AgentId) -> Result<&mut AgentRecord, RepositoryError> {
        self.agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::UnknownAgent(id))
    }

    /// Agents sorted by rating, best first, with games played
    pub fn leaderboard(&self) -> Vec<(&AgentRecord, usize)> {
        let mut entries: Vec<_> = self
            .agents
            .iter()
            .map(|a| (a, self.games_played(a.id)))
            .collect();
        entries.sort_by(|a, b| b.0.rating.total_cmp(&a.0.rating));
        entries
    }

    /// Leaderboard as a text table
    pub fn format_leaderboard(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Agent Leaderboard ===\n");
        report.push_str(&format!(
            "{:<6} {:<24} {:<16} {:>8} {:>6} {:>8}\n",
            "Id", "Agent", "Policy", "Rating", "Games", "Enabled"
        ));
        report.push_str(&"-".repeat(73));
        report.push('\n');
        for (agent, games) in self.leaderboard() {
            report.push_str(&format!(
                "{:<6} {:<24} {:<16} {:>8.1} {:>6} {:>8}\n",
                agent.id.get(),
                agent.name,
                agent.executable.as_deref().unwrap_or("-"),
                agent.rating,
                games,
                if agent.enabled { "yes" } else { "no" }
            ));
        }
        report
    }
}

impl AgentRepository for ArenaStore {
    fn eligible_ratings(&self) -> Result<Vec<(AgentId, f64)>, RepositoryError> {
        Ok(self
            .agents
            .iter()
            .filter(|a| a.is_eligible())
            .map(|a| (a.id, a.rating))
            .collect())
    }

    fn agent(&self, id: AgentId) -> Result<Option<AgentRecord>, RepositoryError> {
        Ok(self.agents.iter().find(|a| a.id == id).cloned())
    }

    fn record_game(
        &mut self,
        game: &GameRecord,
        ratings: [(AgentId, f64); 2],
    ) -> Result<(), RepositoryError> {
        if let Some(&(missing, _)) = ratings
            .iter()
            .find(|(id, _)| !self.agents.iter().any(|a| a.id == *id))
        {
            return Err(RepositoryError::UnknownAgent(missing));
        }

        for (id, rating) in ratings {
            self.agent_mut(id)?.rating = rating;
        }
        match self.games.iter_mut().find(|g| g.id == game.id) {
            Some(existing) => *existing = game.clone(),
            None => self.games.push(game.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod repository_tests;
