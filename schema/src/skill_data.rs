use serde::{Deserialize, Serialize};
use std::fmt;

/// Which faction a skill may be aimed at, relative to its caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetClass {
    Ally,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    PowerStrike,
    Fireball,
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillData {
    pub name: &'static str,
    pub mp_cost: f64,
    pub cooldown: u32,
    pub target: TargetClass,
}

impl SkillKind {
    pub fn data(self) -> SkillData {
        match self {
            SkillKind::PowerStrike => SkillData {
                name: "Power Strike",
                mp_cost: 10.0,
                cooldown: 1,
                target: TargetClass::Enemy,
            },
            SkillKind::Fireball => SkillData {
                name: "Fireball",
                mp_cost: 15.0,
                cooldown: 2,
                target: TargetClass::Enemy,
            },
            SkillKind::Heal => SkillData {
                name: "Heal",
                mp_cost: 20.0,
                cooldown: 3,
                target: TargetClass::Ally,
            },
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data().name)
    }
}
