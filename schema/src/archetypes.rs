use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumString;

use crate::skill_data::SkillKind;

/// Which side of the fight a combatant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Party,
    Boss,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Faction::Party => "party",
            Faction::Boss => "boss",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Archetype {
    Warrior,
    Mage,
    Healer,
    Boss,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stats derived from an archetype at a given level, before range validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: f64,
    pub agility: f64,
    pub intellect: f64,
    pub max_hp: f64,
    pub max_mp: f64,
}

impl Archetype {
    pub fn faction(self) -> Faction {
        match self {
            Archetype::Boss => Faction::Boss,
            _ => Faction::Party,
        }
    }

    /// Stat formulas per archetype. The values are not range-checked here;
    /// the engine rejects anything that falls outside its bounded stats.
    pub fn base_stats(self, level: u32) -> BaseStats {
        let l = level as f64;
        match self {
            Archetype::Warrior => BaseStats {
                strength: 20.0 + l * 2.0,
                agility: 15.0 + l,
                intellect: 5.0 + l,
                max_hp: 100.0 + l * 15.0,
                max_mp: 30.0 + l * 2.0,
            },
            Archetype::Mage => BaseStats {
                strength: 5.0 + l,
                agility: 10.0 + l,
                intellect: 25.0 + l * 3.0,
                max_hp: 60.0 + l * 8.0,
                max_mp: 80.0 + l * 10.0,
            },
            Archetype::Healer => BaseStats {
                strength: 8.0 + l,
                agility: 12.0 + l,
                intellect: 20.0 + l * 2.0,
                max_hp: 80.0 + l * 10.0,
                max_mp: 60.0 + l * 8.0,
            },
            Archetype::Boss => BaseStats {
                strength: 15.0 + l * 3.0,
                agility: 20.0 + l * 2.0,
                intellect: 15.0 + l * 2.0,
                max_hp: 200.0 + l * 50.0,
                max_mp: 100.0 + l * 20.0,
            },
        }
    }

    /// The skills a fresh combatant of this archetype starts with.
    /// The boss has none; its skill is the phase strategy.
    pub fn starting_skills(self) -> &'static [SkillKind] {
        match self {
            Archetype::Warrior => &[SkillKind::PowerStrike],
            Archetype::Mage => &[SkillKind::Fireball],
            Archetype::Healer => &[SkillKind::Heal],
            Archetype::Boss => &[],
        }
    }
}

pub const BOSS_NAMES: [&str; 3] = ["Gimmelut the Dragon", "Capuchin the Demon", "Sphincterion"];
