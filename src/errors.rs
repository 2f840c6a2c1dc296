use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the boss-raid battle engine.
///
/// Only construction-time and I/O failures end up here. Rule violations during
/// a fight (wrong target, dead actor, skill on cooldown, ...) are ordinary game
/// events and are reported as event text instead.
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// A stat was assigned a value outside its allowed range
    #[error("Stat error: {0}")]
    Stat(#[from] StatError),
    /// The battle roster is unusable
    #[error("Battle setup error: {0}")]
    Setup(#[from] SetupError),
    /// Battle configuration failed validation or could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Writing the log or a save snapshot failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors raised by bounded stat assignment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatError {
    #[error("{stat} must be between {min} and {max}, got {value}")]
    OutOfRange {
        stat: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to assembling a battle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("the party has no members")]
    EmptyParty,
    #[error("{0} is not a boss-faction combatant")]
    BossNotInBossFaction(String),
    #[error("{0} is a boss-faction combatant and cannot join the party")]
    PartyMemberInBossFaction(String),
    #[error("invalid party member spec '{0}', expected archetype:name")]
    InvalidMemberSpec(String),
}

/// Errors related to battle configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_rounds must be at least 1")]
    ZeroRoundCap,
    #[error("{field} must be a probability between 0 and 1, got {value}")]
    InvalidProbability { field: &'static str, value: f64 },
    #[error("party_attack_chance + party_skill_chance must not exceed 1, got {0}")]
    PolicyWeightsExceedOne(f64),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors related to writing battle artifacts to disk
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize battle state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using StatError
pub type StatResult<T> = Result<T, StatError>;
