//! The boss's phase strategies.
//!
//! The active phase is a pure function of the boss's HP ratio, evaluated every
//! time the boss uses its skill. Nothing is cached, so the phase can flip back
//! and forth if the boss is healed across a threshold.

use crate::battle::state::TurnRng;
use crate::combatant::{describe_hit, Combatant};
use crate::effects::Effect;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const AGGRESSIVE_THRESHOLD: f64 = 0.6;
pub const AREA_THRESHOLD: f64 = 0.3;

pub const AGGRESSIVE_MULTIPLIER: f64 = 1.2;
pub const AREA_MULTIPLIER: f64 = 0.8;
pub const DEBUFF_POISON_DAMAGE: f64 = 10.0;
pub const DEBUFF_SHIELD_CAPACITY: f64 = 30.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossPhase {
    /// HP ratio strictly above 0.6: one heavy hit on the weakest target
    Aggressive,
    /// HP ratio in (0.3, 0.6]: every living target takes a lighter hit
    Area,
    /// HP ratio of 0.3 or less: poison a random target and raise a shield
    Debuff,
}

/// The two events a phase skill produces: the phase announcement and the
/// combat result of the strategy itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAction {
    pub phase: BossPhase,
    pub announcement: String,
    pub event: String,
}

impl BossPhase {
    pub fn from_hp_ratio(ratio: f64) -> Self {
        let phase = if ratio > AGGRESSIVE_THRESHOLD {
            BossPhase::Aggressive
        } else if ratio > AREA_THRESHOLD {
            BossPhase::Area
        } else {
            BossPhase::Debuff
        };
        tracing::debug!(ratio, ?phase, "boss phase evaluated");
        phase
    }

    pub fn key(self) -> &'static str {
        match self {
            BossPhase::Aggressive => "phase1",
            BossPhase::Area => "phase2",
            BossPhase::Debuff => "phase3",
        }
    }

    /// Run this phase's strategy. Dead entries in `targets` are ignored.
    pub fn execute(self, boss: &mut Combatant, targets: &mut [Combatant], rng: &mut TurnRng) -> String {
        let mut living: Vec<&mut Combatant> =
            targets.iter_mut().filter(|t| t.is_alive()).collect();
        if living.is_empty() {
            return "No targets to attack".to_string();
        }

        match self {
            BossPhase::Aggressive => {
                let weakest = living
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, t)| OrderedFloat(t.hp()))
                    .map_or(0, |(i, _)| i);
                let target = &mut *living[weakest];
                let damage = boss.strength() * AGGRESSIVE_MULTIPLIER;
                let hit = target.receive_hit(damage);
                format!(
                    "{} furiously attacks the weakest foe! {}",
                    boss.name(),
                    describe_hit(target, damage, &hit)
                )
            }
            BossPhase::Area => {
                let damage = boss.strength() * AREA_MULTIPLIER;
                let mut message = format!("{} unleashes an area attack!", boss.name());
                for target in living {
                    let hit = target.receive_hit(damage);
                    message.push(' ');
                    message.push_str(&describe_hit(target, damage, &hit));
                }
                message
            }
            BossPhase::Debuff => {
                let pick = rng.choose_index(living.len(), "debuff target");
                let target = &mut *living[pick];
                target.add_effect(Effect::poison(DEBUFF_POISON_DAMAGE));
                boss.add_effect(Effect::shield(DEBUFF_SHIELD_CAPACITY));
                format!(
                    "{} poisons {} and conjures a shield!",
                    boss.name(),
                    target.name()
                )
            }
        }
    }
}

impl fmt::Display for BossPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BossPhase::Aggressive => "aggressive",
            BossPhase::Area => "area",
            BossPhase::Debuff => "debuff",
        };
        write!(f, "{} ({}) phase", self.key(), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, BossPhase::Aggressive)]
    #[case(0.61, BossPhase::Aggressive)]
    #[case(0.6, BossPhase::Area)]
    #[case(0.59, BossPhase::Area)]
    #[case(0.31, BossPhase::Area)]
    #[case(0.3, BossPhase::Debuff)]
    #[case(0.0, BossPhase::Debuff)]
    fn test_phase_thresholds(#[case] ratio: f64, #[case] expected: BossPhase) {
        assert_eq!(BossPhase::from_hp_ratio(ratio), expected);
    }

    #[test]
    fn test_phase_keys() {
        assert_eq!(BossPhase::Aggressive.key(), "phase1");
        assert_eq!(BossPhase::Area.key(), "phase2");
        assert_eq!(BossPhase::Debuff.key(), "phase3");
    }
}
