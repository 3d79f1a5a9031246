use super::*;
use arena_core::Slot;

fn small_config() -> BanditConfig {
    BanditConfig {
        bandit_count: 10,
        episode_steps: 50,
        ..Default::default()
    }
}

#[test]
fn bandit_game_has_one_step_per_pull() {
    let mut engine = BanditEngine::with_seed(small_config(), 7);
    engine.reset();

    let episode = engine.run("random", "greedy").unwrap();

    assert_eq!(episode.num_steps(), 50);
    assert_eq!(episode.initial_conditions.len(), 10);
    assert!(episode.initial_conditions.iter().all(|&t| t <= 100));
    for step in &episode.steps {
        for record in step {
            assert!(record.action < 10);
            assert!(record.reward <= 1);
        }
    }
}

#[test]
fn bandit_reports_its_configuration() {
    let mut engine = BanditEngine::with_seed(small_config(), 1);
    engine.reset();

    let episode = engine.run("random", "random").unwrap();

    assert_eq!(episode.configuration["bandit_count"], 10);
    assert_eq!(episode.configuration["episode_steps"], 50);
}

#[test]
fn bandit_thresholds_decay_per_pull() {
    let config = BanditConfig {
        bandit_count: 1,
        episode_steps: 3,
        decay_rate: 0.5,
        sample_resolution: 100,
    };
    let mut engine = BanditEngine::with_seed(config, 3);
    engine.reset();
    let start = f64::from(engine.initial[0]);

    engine.run("random", "random").unwrap();

    // Two pulls per step on the only machine
    let expected = start * 0.5f64.powi(6);
    assert!((engine.thresholds()[0] - expected).abs() < 1e-9);
}

#[test]
fn bandit_zero_threshold_never_pays() {
    let config = BanditConfig {
        bandit_count: 1,
        episode_steps: 20,
        ..Default::default()
    };
    let mut engine = BanditEngine::with_seed(config, 11);
    engine.reset();
    engine.thresholds[0] = 0.0;

    let episode = engine.run("greedy", "random").unwrap();

    assert_eq!(episode.total_reward(Slot::Left), 0);
    assert_eq!(episode.total_reward(Slot::Right), 0);
}

#[test]
fn bandit_same_seed_same_game() {
    let mut a = BanditEngine::with_seed(small_config(), 42);
    let mut b = BanditEngine::with_seed(small_config(), 42);
    a.reset();
    b.reset();

    assert_eq!(
        a.run("epsilon:0.2", "random").unwrap(),
        b.run("epsilon:0.2", "random").unwrap()
    );
}

#[test]
fn bandit_requires_reset_before_each_run() {
    let mut engine = BanditEngine::with_seed(small_config(), 5);

    assert!(matches!(
        engine.run("random", "random"),
        Err(SimulationError::Failed(_))
    ));

    engine.reset();
    assert!(engine.run("random", "random").is_ok());
    assert!(engine.run("random", "random").is_err());
}

#[test]
fn bandit_rejects_unknown_policy() {
    let mut engine = BanditEngine::with_seed(small_config(), 5);
    engine.reset();

    let err = engine.run("random", "./agent.py").unwrap_err();

    assert_eq!(err, SimulationError::UnknownPolicy("./agent.py".to_string()));
}

#[test]
fn bandit_rejects_bad_configuration() {
    let config = BanditConfig {
        decay_rate: 1.5,
        ..small_config()
    };
    let mut engine = BanditEngine::with_seed(config, 5);
    engine.reset();

    assert!(matches!(
        engine.run("random", "random"),
        Err(SimulationError::InvalidConfiguration(_))
    ));
}
