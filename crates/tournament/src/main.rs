//! Arena CLI
//!
//! Register agents, play rated bandit games between them and show ratings.

use anyhow::{bail, Context, Result};
use arena_core::AgentId;
use bandit_engine::{policy_from_tag, BanditEngine};
use std::env;
use std::path::{Path, PathBuf};
use tournament::{ArenaConfig, ArenaStore, EloUpdater, MatchRunner, Matchmaker};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "arena.toml";
const DEFAULT_GAMES: u32 = 10;

fn print_usage() {
    println!("Agent Arena");
    println!();
    println!("Usage:");
    println!("  arena run [--games N] [--config FILE]");
    println!("  arena add-agent <name> <policy> [--config FILE]");
    println!("  arena disable <id> [--config FILE]");
    println!("  arena enable <id> [--config FILE]");
    println!("  arena leaderboard [--config FILE]");
    println!();
    println!("Policies:");
    println!("  random        - Pull a random machine");
    println!("  greedy        - Pull the machine with the best estimated payout");
    println!("  epsilon:E     - Greedy, exploring with probability E");
    println!();
    println!("Examples:");
    println!("  arena add-agent alice greedy");
    println!("  arena run --games 50");
}

/// Positional arguments plus the options every command accepts
struct Args {
    positional: Vec<String>,
    games: u32,
    config: PathBuf,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        positional: Vec::new(),
        games: DEFAULT_GAMES,
        config: PathBuf::from(DEFAULT_CONFIG),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-n" => {
                let value = args.get(i + 1).context("--games needs a value")?;
                parsed.games = value
                    .parse()
                    .with_context(|| format!("invalid game count '{}'", value))?;
                i += 1;
            }
            "--config" | "-c" => {
                let value = args.get(i + 1).context("--config needs a value")?;
                parsed.config = PathBuf::from(value);
                i += 1;
            }
            other => parsed.positional.push(other.to_string()),
        }
        i += 1;
    }
    Ok(parsed)
}

fn load(config_path: &Path) -> Result<(ArenaConfig, ArenaStore)> {
    let config = ArenaConfig::load(config_path)?;
    let store = ArenaStore::load_or_default(&config.store.path)
        .with_context(|| format!("loading store {}", config.store.path.display()))?;
    Ok((config, store))
}

fn save(config: &ArenaConfig, store: &ArenaStore) -> Result<()> {
    store
        .save(&config.store.path)
        .with_context(|| format!("saving store {}", config.store.path.display()))
}

fn run_games(args: &Args) -> Result<()> {
    let (config, mut store) = load(&args.config)?;
    let runner = MatchRunner::new(Matchmaker::default(), EloUpdater::new(config.rating.k_factor));
    let mut engine = BanditEngine::new(config.bandit.clone());

    info!(games = args.games, k_factor = config.rating.k_factor, "starting session");

    for c in 1..=args.games {
        match runner.play_next_reseeded(&mut engine, &mut store) {
            Ok(game) => println!("{}/{} - {}", c, args.games, game),
            Err(e) => {
                error!("game {} failed: {}", c, e);
                save(&config, &store)?;
                return Err(e.into());
            }
        }
    }

    save(&config, &store)?;
    println!();
    print!("{}", store.format_leaderboard());
    Ok(())
}

fn add_agent(args: &Args) -> Result<()> {
    let [_, name, policy] = args.positional.as_slice() else {
        bail!("add-agent requires a name and a policy");
    };
    // Refuse tags the engine would reject at game time
    policy_from_tag(policy)?;

    let (config, mut store) = load(&args.config)?;
    let id = store.register_agent_with_rating(
        name,
        Some(policy.clone()),
        config.rating.initial_rating,
    );
    save(&config, &store)?;

    println!("Registered {} as agent {}", name, id);
    Ok(())
}

fn set_enabled(args: &Args, enabled: bool) -> Result<()> {
    let [_, id] = args.positional.as_slice() else {
        bail!("expected a single agent id");
    };
    let id = AgentId(id.parse().with_context(|| format!("invalid agent id '{}'", id))?);

    let (config, mut store) = load(&args.config)?;
    store.set_enabled(id, enabled)?;
    save(&config, &store)?;

    println!("Agent {} {}", id, if enabled { "enabled" } else { "disabled" });
    Ok(())
}

fn show_leaderboard(args: &Args) -> Result<()> {
    let (_, store) = load(&args.config)?;
    if store.agents().is_empty() {
        println!("No agents registered. Add some with `arena add-agent`!");
    } else {
        print!("{}", store.format_leaderboard());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    let Some(command) = args.positional.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "run" => run_games(&args),
        "add-agent" => add_agent(&args),
        "disable" => set_enabled(&args, false),
        "enable" => set_enabled(&args, true),
        "leaderboard" | "elo" => show_leaderboard(&args),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {}", other)
        }
    }
}
