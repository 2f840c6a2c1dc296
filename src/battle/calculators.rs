//! Shared combat math: attack formulas, critical-hit rolls and skill power.
//!
//! Every random draw goes through the [`TurnRng`] handed in by the caller, so a
//! seeded battle stays reproducible.

use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use schema::{Archetype, SkillKind};

/// Which attribute an attack scales from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    Strength,
    Intellect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritProfile {
    pub chance: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub scaling: Scaling,
    pub multiplier: f64,
    pub crit: Option<CritProfile>,
    /// Magic attacks are reported differently from weapon swings.
    pub magical: bool,
}

/// Result of a damage roll before it reaches the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub amount: f64,
    pub critical: bool,
}

pub fn basic_attack_profile(archetype: Archetype) -> AttackProfile {
    match archetype {
        Archetype::Warrior => AttackProfile {
            scaling: Scaling::Strength,
            multiplier: 0.8,
            crit: Some(CritProfile {
                chance: 0.15,
                multiplier: 1.5,
            }),
            magical: false,
        },
        Archetype::Mage => AttackProfile {
            scaling: Scaling::Intellect,
            multiplier: 0.6,
            crit: None,
            magical: true,
        },
        Archetype::Healer => AttackProfile {
            scaling: Scaling::Strength,
            multiplier: 0.7,
            crit: None,
            magical: false,
        },
        Archetype::Boss => AttackProfile {
            scaling: Scaling::Strength,
            multiplier: 1.0,
            crit: Some(CritProfile {
                chance: 0.2,
                multiplier: 2.0,
            }),
            magical: false,
        },
    }
}

fn scaled(attacker: &Combatant, scaling: Scaling) -> f64 {
    match scaling {
        Scaling::Strength => attacker.strength(),
        Scaling::Intellect => attacker.intellect(),
    }
}

/// Roll for a critical hit. Without a crit profile no random value is consumed.
pub fn roll_crit(base_damage: f64, crit: Option<CritProfile>, rng: &mut TurnRng) -> DamageRoll {
    match crit {
        Some(profile) if rng.roll("critical hit") < profile.chance => DamageRoll {
            amount: base_damage * profile.multiplier,
            critical: true,
        },
        _ => DamageRoll {
            amount: base_damage,
            critical: false,
        },
    }
}

pub fn basic_attack_damage(attacker: &Combatant, rng: &mut TurnRng) -> DamageRoll {
    let profile = basic_attack_profile(attacker.archetype());
    let base = scaled(attacker, profile.scaling) * profile.multiplier;
    roll_crit(base, profile.crit, rng)
}

/// Damage dealt (or HP restored, for healing skills) by a skill.
pub fn skill_power(kind: SkillKind, caster: &Combatant) -> f64 {
    match kind {
        SkillKind::PowerStrike => caster.strength() * 2.0,
        SkillKind::Fireball => caster.intellect() * 1.5,
        SkillKind::Heal => caster.intellect() * 2.0,
    }
}
