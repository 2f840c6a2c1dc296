//! Timed status effects attached to a combatant.
//!
//! An effect ticks once per round: its per-round payload runs, then its
//! remaining duration drops by one. An effect whose duration reaches zero on a
//! tick still delivers that tick's payload before it is removed.

use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};

pub const POISON_DURATION: u32 = 3;
pub const SHIELD_DURATION: u32 = 2;
pub const REGENERATION_DURATION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    Poison { damage_per_turn: f64 },
    Shield { capacity: f64, remaining: f64 },
    Regeneration { heal_per_turn: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    kind: EffectKind,
    duration: u32,
    remaining_turns: u32,
}

impl Effect {
    fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            remaining_turns: duration,
        }
    }

    pub fn poison(damage_per_turn: f64) -> Self {
        Self::new(EffectKind::Poison { damage_per_turn }, POISON_DURATION)
    }

    pub fn shield(capacity: f64) -> Self {
        Self::new(
            EffectKind::Shield {
                capacity,
                remaining: capacity,
            },
            SHIELD_DURATION,
        )
    }

    pub fn regeneration(heal_per_turn: f64) -> Self {
        Self::new(
            EffectKind::Regeneration { heal_per_turn },
            REGENERATION_DURATION,
        )
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            EffectKind::Poison { .. } => "Poison",
            EffectKind::Shield { .. } => "Shield",
            EffectKind::Regeneration { .. } => "Regeneration",
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }

    /// Shield capacity left, or `None` for effects that are not shields.
    pub fn remaining_shield(&self) -> Option<f64> {
        match self.kind {
            EffectKind::Shield { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn on_apply(&self, target_name: &str) -> String {
        match self.kind {
            EffectKind::Poison { .. } => format!("{} is poisoned!", target_name),
            EffectKind::Shield { .. } => format!("{} gains a shield!", target_name),
            EffectKind::Regeneration { .. } => format!("{} begins to regenerate!", target_name),
        }
    }

    /// Deliver this round's payload to the combatant carrying the effect.
    pub fn on_turn(&self, target: &mut Combatant) -> String {
        match self.kind {
            EffectKind::Poison { damage_per_turn } => {
                target.take_damage(damage_per_turn);
                format!(
                    "{} takes {:.1} poison damage",
                    target.name(),
                    damage_per_turn
                )
            }
            EffectKind::Shield { remaining, .. } => {
                format!("Shield protects {} ({:.1} remaining)", target.name(), remaining)
            }
            EffectKind::Regeneration { heal_per_turn } => {
                target.heal(heal_per_turn);
                format!("{} regenerates {:.1} HP", target.name(), heal_per_turn)
            }
        }
    }

    /// Count down one round. Returns true once the effect has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.is_expired()
    }

    /// Soak up as much of `damage` as the shield can hold and return what is left over.
    /// Non-shield effects pass damage through untouched.
    pub fn absorb_damage(&mut self, damage: f64) -> f64 {
        match &mut self.kind {
            EffectKind::Shield { remaining, .. } => {
                if *remaining >= damage {
                    *remaining -= damage;
                    0.0
                } else {
                    let leftover = damage - *remaining;
                    *remaining = 0.0;
                    leftover
                }
            }
            _ => damage,
        }
    }
}
