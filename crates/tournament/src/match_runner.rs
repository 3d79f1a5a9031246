//! Match runner for playing rated games between agents

use arena_core::{AgentId, SimulationEngine, Slot};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::elo::EloUpdater;
use crate::error::MatchError;
use crate::matchmaker::{clock_seeded_rng, EligiblePool, Matchmaker, Pairing};
use crate::repository::{AgentRecord, AgentRepository, GameRecord, GameResult, GameStatus};

/// Picks agents, plays them against each other and moves their ratings
#[derive(Debug, Default)]
pub struct MatchRunner {
    matchmaker: Matchmaker,
    updater: EloUpdater,
}

impl MatchRunner {
    pub fn new(matchmaker: Matchmaker, updater: EloUpdater) -> Self {
        Self {
            matchmaker,
            updater,
        }
    }

    pub fn updater(&self) -> &EloUpdater {
        &self.updater
    }

    /// Choose the next pairing from the repository's eligible agents
    pub fn next_pairing<Repo, G>(&self, repo: &Repo, rng: &mut G) -> Result<Pairing, MatchError>
    where
        Repo: AgentRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let pool = EligiblePool::new(repo.eligible_ratings()?)?;
        Ok(self.matchmaker.choose_pair(&pool, rng)?)
    }

    /// Choose a pairing and play it
    pub fn play_next<E, Repo, G>(
        &self,
        engine: &mut E,
        repo: &mut Repo,
        rng: &mut G,
    ) -> Result<GameRecord, MatchError>
    where
        E: SimulationEngine + ?Sized,
        Repo: AgentRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let pairing = self.next_pairing(repo, rng)?;
        self.run_game(
            engine,
            repo,
            pairing.agent_at(Slot::Left),
            pairing.agent_at(Slot::Right),
        )
    }

    /// `play_next` with a generator reseeded from the clock for this decision
    pub fn play_next_reseeded<E, Repo>(
        &self,
        engine: &mut E,
        repo: &mut Repo,
    ) -> Result<GameRecord, MatchError>
    where
        E: SimulationEngine + ?Sized,
        Repo: AgentRepository + ?Sized,
    {
        self.play_next(engine, repo, &mut clock_seeded_rng())
    }

    /// Play one game with `left_id` in the left seat and `right_id` in the
    /// right seat, then store the game and both new ratings.
    ///
    /// The left agent is player A for the rating update and the right agent
    /// is player B, so each delta lands on the agent that earned it.
    /// The game and both ratings are stored in one `record_game` call, so a
    /// failed attempt leaves the repository as it was.
    pub fn run_game<E, Repo>(
        &self,
        engine: &mut E,
        repo: &mut Repo,
        left_id: AgentId,
        right_id: AgentId,
    ) -> Result<GameRecord, MatchError>
    where
        E: SimulationEngine + ?Sized,
        Repo: AgentRepository + ?Sized,
    {
        if left_id == right_id {
            return Err(MatchError::DuplicateAgent(left_id));
        }

        let left = lookup(repo, left_id)?;
        let right = lookup(repo, right_id)?;
        let left_exe = runnable(&left)?;
        let right_exe = runnable(&right)?;

        let mut game = GameRecord::start(&left, &right);

        engine.reset();
        debug!(engine = engine.name(), left = %left.id, right = %right.id, "running game");
        let episode = engine.run(left_exe, right_exe)?;

        let left_total = episode.total_reward(Slot::Left);
        let right_total = episode.total_reward(Slot::Right);
        let result = GameResult::from_totals(left_total, right_total);

        let update = self.updater.update(left.rating, right.rating, result.into());

        game.left_actions = episode.actions(Slot::Left);
        game.right_actions = episode.actions(Slot::Right);
        game.left_rewards = episode.rewards(Slot::Left);
        game.right_rewards = episode.rewards(Slot::Right);
        game.configuration = episode.configuration;
        game.initial_conditions = episode.initial_conditions;
        game.result = Some(result);
        game.status = GameStatus::Finished;
        game.left_new_rating = Some(update.new_a);
        game.right_new_rating = Some(update.new_b);
        game.finished = Some(Utc::now());

        repo.record_game(
            &game,
            [(left.id, update.new_a), (right.id, update.new_b)],
        )?;

        info!(
            game = %game.id,
            left = %left.id,
            right = %right.id,
            left_total,
            right_total,
            result = ?result,
            delta = update.delta,
            "game finished"
        );
        Ok(game)
    }
}

fn lookup<Repo>(repo: &Repo, id: AgentId) -> Result<AgentRecord, MatchError>
where
    Repo: AgentRepository + ?Sized,
{
    repo.agent(id)?.ok_or(MatchError::UnknownAgent(id))
}

fn runnable(agent: &AgentRecord) -> Result<&str, MatchError> {
    agent
        .executable
        .as_deref()
        .ok_or(MatchError::AgentNotRunnable(agent.id))
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
