use boss_raid::{
    create_boss, create_party, default_party, parse_party, Battle, BattleConfig, BattleOutcome,
    BattleResult, TurnRng, BOSS_NAMES,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "boss-raid",
    version,
    about = "Simulate a party of adventurers against a raid boss"
)]
struct Cli {
    /// Seed for the battle's random stream. Omit for a fresh random battle.
    #[arg(long)]
    seed: Option<u64>,

    /// Boss difficulty preset. Ignored when --boss-level is given.
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    #[arg(long)]
    boss_level: Option<u32>,

    /// Boss name. Defaults to a random pick from the built-in names.
    #[arg(long)]
    boss_name: Option<String>,

    /// Party roster as comma-separated archetype:name pairs, e.g. warrior:Aria,mage:Bram
    #[arg(long)]
    party: Option<String>,

    /// Level of every party member
    #[arg(long, default_value_t = 5)]
    level: u32,

    /// JSON file overriding battle parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the battle log here when the fight ends
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a JSON snapshot of the final state here
    #[arg(long)]
    save_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    fn boss_level(self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Normal => 5,
            Difficulty::Hard => 8,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(outcome) if outcome.is_victory() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> BattleResult<BattleOutcome> {
    let config = match &cli.config {
        Some(path) => BattleConfig::from_json_file(path)?,
        None => BattleConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => TurnRng::seeded(seed),
        None => TurnRng::new_random(),
    };

    let party = match &cli.party {
        Some(roster) => create_party(&parse_party(roster)?, cli.level)?,
        None => default_party(cli.level)?,
    };

    let boss_name = match cli.boss_name {
        Some(name) => name,
        None => BOSS_NAMES[rng.choose_index(BOSS_NAMES.len(), "boss name")].to_string(),
    };
    let boss_level = cli.boss_level.unwrap_or_else(|| cli.difficulty.boss_level());
    let boss = create_boss(boss_name, boss_level)?;

    let mut battle = Battle::with_config(party, boss, rng, config)?;
    println!("Turn order:");
    for line in battle.turn_order_summary() {
        println!("  {}", line);
    }

    let outcome = battle.run();

    if let Some(path) = &cli.save_file {
        battle.save_state(path)?;
    }
    if let Some(path) = &cli.log_file {
        battle.write_log(path)?;
    }

    println!("{}", battle.log_text());
    println!();
    println!("{}", battle.status_report());
    println!();
    match outcome {
        BattleOutcome::Victory => println!("Outcome: victory"),
        BattleOutcome::Defeat => println!("Outcome: defeat"),
        BattleOutcome::RoundCapReached => println!("Outcome: defeat (round limit reached)"),
    }
    Ok(outcome)
}
