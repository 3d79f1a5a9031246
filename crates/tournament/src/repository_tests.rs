use super::*;

fn temp_store_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("arena_store_{}.json", Uuid::new_v4()))
}

#[test]
fn register_assigns_sequential_ids() {
    let mut store = ArenaStore::new();

    let a = store.register_agent("alpha", Some("random".into()));
    let b = store.register_agent("beta", Some("greedy".into()));

    assert_eq!(a, AgentId(1));
    assert_eq!(b, AgentId(2));
    assert_eq!(store.agents()[0].rating, DEFAULT_RATING);
}

#[test]
fn only_enabled_runnable_agents_are_eligible() {
    let mut store = ArenaStore::new();
    let a = store.register_agent("alpha", Some("random".into()));
    let _no_exe = store.register_agent("beta", None);
    let c = store.register_agent_with_rating("gamma", Some("greedy".into()), 1500.0);
    let d = store.register_agent("delta", Some("greedy".into()));
    store.set_enabled(d, false).unwrap();

    let eligible = store.eligible_ratings().unwrap();

    assert_eq!(eligible, vec![(a, DEFAULT_RATING), (c, 1500.0)]);
}

#[test]
fn unknown_agent_lookups() {
    let mut store = ArenaStore::new();

    assert_eq!(store.agent(AgentId(5)).unwrap(), None);
    assert!(store.set_enabled(AgentId(5), true).is_err());
}

#[test]
fn record_game_upserts_by_id() {
    let mut store = ArenaStore::new();
    let a = store.register_agent("alpha", Some("random".into()));
    let b = store.register_agent("beta", Some("random".into()));
    let left = store.agent(a).unwrap().unwrap();
    let right = store.agent(b).unwrap().unwrap();

    let mut game = GameRecord::start(&left, &right);
    store.record_game(&game, [(a, 1200.0), (b, 1200.0)]).unwrap();
    assert_eq!(store.games_played(a), 0);

    game.status = GameStatus::Finished;
    game.result = Some(GameResult::LeftWon);
    store.record_game(&game, [(a, 1216.0), (b, 1184.0)]).unwrap();

    assert_eq!(store.games().len(), 1);
    assert_eq!(store.games_played(a), 1);
    assert_eq!(store.games_played(b), 1);
    assert_eq!(store.agent(a).unwrap().unwrap().rating, 1216.0);
    assert_eq!(store.agent(b).unwrap().unwrap().rating, 1184.0);
}

#[test]
fn record_game_with_unknown_agent_writes_nothing() {
    let mut store = ArenaStore::new();
    let a = store.register_agent("alpha", Some("random".into()));
    let b = store.register_agent("beta", Some("random".into()));
    let game = GameRecord::start(
        &store.agent(a).unwrap().unwrap(),
        &store.agent(b).unwrap().unwrap(),
    );
    let before = store.clone();

    let err = store
        .record_game(&game, [(a, 1224.3), (AgentId(77), 1175.7)])
        .unwrap_err();

    assert!(matches!(err, RepositoryError::UnknownAgent(AgentId(77))));
    assert_eq!(store, before);
    assert!(store.games().is_empty());
    assert_eq!(store.agent(a).unwrap().unwrap().rating, DEFAULT_RATING);
}

#[test]
fn leaderboard_sorts_by_rating() {
    let mut store = ArenaStore::new();
    store.register_agent_with_rating("low", Some("random".into()), 900.0);
    store.register_agent_with_rating("high", Some("greedy".into()), 1700.0);
    store.register_agent_with_rating("mid", None, 1300.0);

    let names: Vec<&str> = store
        .leaderboard()
        .iter()
        .map(|(a, _)| a.name.as_str())
        .collect();

    assert_eq!(names, vec!["high", "mid", "low"]);
    let report = store.format_leaderboard();
    assert!(report.contains("Agent Leaderboard"));
    assert!(report.find("high").unwrap() < report.find("low").unwrap());
}

#[test]
fn store_survives_save_and_load() {
    let path = temp_store_path();
    let mut store = ArenaStore::new();
    let a = store.register_agent("alpha", Some("epsilon:0.1".into()));
    let b = store.register_agent("beta", Some("greedy".into()));
    let left = store.agent(a).unwrap().unwrap();
    let right = store.agent(b).unwrap().unwrap();
    store
        .record_game(&GameRecord::start(&left, &right), [(a, 1210.0), (b, 1190.0)])
        .unwrap();

    store.save(&path).unwrap();
    let loaded = ArenaStore::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, store);
}

#[test]
fn missing_store_file_starts_empty() {
    let path = temp_store_path();

    let store = ArenaStore::load_or_default(&path).unwrap();

    assert!(store.agents().is_empty());
    assert!(matches!(ArenaStore::load(&path), Err(RepositoryError::Io(_))));
}

#[test]
fn result_follows_totals() {
    assert_eq!(GameResult::from_totals(10, 3), GameResult::LeftWon);
    assert_eq!(GameResult::from_totals(3, 10), GameResult::RightWon);
    assert_eq!(GameResult::from_totals(7, 7), GameResult::Draw);
    assert_eq!(MatchOutcome::from(GameResult::RightWon), MatchOutcome::BWon);
}

#[test]
fn game_summary_line() {
    let mut store = ArenaStore::new();
    let a = store.register_agent("alpha", Some("random".into()));
    let b = store.register_agent_with_rating("beta", Some("random".into()), 1300.0);
    let mut game = GameRecord::start(
        &store.agent(a).unwrap().unwrap(),
        &store.agent(b).unwrap().unwrap(),
    );

    assert_eq!(game.to_string(), "#1 (1200.0) vs #2 (1300.0): *");

    game.result = Some(GameResult::LeftWon);
    game.left_new_rating = Some(1220.5);
    game.right_new_rating = Some(1279.5);
    assert_eq!(
        game.to_string(),
        "#1 (1200.0) vs #2 (1300.0): 1-0 -> 1220.5 / 1279.5"
    );
}
