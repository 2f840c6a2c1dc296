// In: src/lib.rs

//! Boss Raid Battle Engine
//!
//! A turn-based party-versus-boss battle simulator: agility-ranked turn
//! order, timed status effects, a boss whose tactics shift with its HP, and
//! a seedable random stream so every battle can be replayed exactly.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod effects;
pub mod errors;
pub mod items;
pub mod skills;
pub mod stats;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Static data tables.
pub use schema::{
    Archetype, BaseStats, Faction, ItemKind, SkillData, SkillKind, TargetClass, BOSS_NAMES,
};

// --- From this crate's modules (`src/`) ---

// Battle controller and its observable state.
pub use battle::engine::Battle;
pub use battle::snapshot::{BossSnapshot, MemberSnapshot, SaveState};
pub use battle::state::{
    BattleEvent, BattleLog, BattleOutcome, LogEntry, RandomSource, ScriptedRolls, TurnRng,
};
pub use battle::strategy::BossPhase;
pub use battle::turn_order::{CombatantId, TurnOrder};

// Combatants and what they carry.
pub use combatant::Combatant;
pub use effects::{Effect, EffectKind};
pub use items::Inventory;
pub use skills::{Skill, SkillOutcome};

pub use config::BattleConfig;
pub use teams::{create_boss, create_party, default_party, parse_party, MemberSpec};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, ConfigError, PersistenceError, SetupError, StatError,
    StatResult,
};
