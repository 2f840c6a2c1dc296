//! Tunable battle parameters.
//!
//! Defaults reproduce the stock game. A JSON file can override any subset of
//! fields; missing fields fall back to their defaults.

use crate::errors::ConfigError;
use schema::ItemKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_ROUNDS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Hard round cap. Reaching it ends the battle as a forced defeat.
    pub max_rounds: u32,
    /// Chance that the boss reaches for its phase skill instead of a basic attack.
    pub boss_skill_chance: f64,
    /// The boss only considers its phase skill while its MP is above this.
    pub boss_skill_min_mp: f64,
    pub party_attack_chance: f64,
    pub party_skill_chance: f64,
    /// Party members only consider their skill while their MP is above this.
    pub party_skill_min_mp: f64,
    /// Appended to every party member's inventory when the battle is built.
    pub starting_items: Vec<ItemKind>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            boss_skill_chance: 0.5,
            boss_skill_min_mp: 20.0,
            party_attack_chance: 0.6,
            party_skill_chance: 0.3,
            party_skill_min_mp: 10.0,
            starting_items: vec![ItemKind::health_potion(), ItemKind::mana_potion()],
        }
    }
}

impl BattleConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BattleConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRoundCap);
        }
        for (field, value) in [
            ("boss_skill_chance", self.boss_skill_chance),
            ("party_attack_chance", self.party_attack_chance),
            ("party_skill_chance", self.party_skill_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        let combined = self.party_attack_chance + self.party_skill_chance;
        if combined > 1.0 {
            return Err(ConfigError::PolicyWeightsExceedOne(combined));
        }
        Ok(())
    }
}
