//! The combatant model shared by party members and the boss.
//!
//! A single struct carries an [`Archetype`] tag; archetype-specific behaviour
//! (attack formulas, skill targeting rules) is dispatched by matching on it.
//! Every action returns an event string. Rule violations are returned as text
//! too, never as errors, since they are ordinary turns of the game.

use crate::battle::calculators::{basic_attack_damage, basic_attack_profile};
use crate::battle::state::TurnRng;
use crate::battle::strategy::{BossPhase, PhaseAction};
use crate::effects::Effect;
use crate::errors::{StatError, StatResult};
use crate::items::Inventory;
use crate::skills::{Skill, SkillOutcome};
use crate::stats::{self, BoundedStat};
use schema::{Archetype, BaseStats, Faction, ItemKind};
use std::fmt;

/// A mage keeps poisoning with its first skill while it has more MP than this.
pub const MAGE_POISON_MP_THRESHOLD: f64 = 20.0;
pub const MAGE_POISON_DAMAGE: f64 = 5.0;

/// How an incoming hit was split between shields and HP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub absorbed: f64,
    pub dealt: f64,
}

#[derive(Debug, Clone)]
pub struct Combatant {
    name: String,
    level: u32,
    archetype: Archetype,
    faction: Faction,
    hp: BoundedStat,
    max_hp: BoundedStat,
    mp: BoundedStat,
    max_mp: BoundedStat,
    strength: BoundedStat,
    agility: BoundedStat,
    intellect: BoundedStat,
    effects: Vec<Effect>,
    skills: Vec<Skill>,
    inventory: Option<Inventory>,
}

impl Combatant {
    /// Build a combatant with the stats its archetype derives at `level`.
    pub fn new(name: impl Into<String>, level: u32, archetype: Archetype) -> StatResult<Self> {
        Self::with_stats(name, level, archetype, archetype.base_stats(level))
    }

    /// Build a combatant from explicit stats. HP and MP start full.
    pub fn with_stats(
        name: impl Into<String>,
        level: u32,
        archetype: Archetype,
        base: BaseStats,
    ) -> StatResult<Self> {
        let faction = archetype.faction();
        Ok(Self {
            name: name.into(),
            level,
            archetype,
            faction,
            max_hp: BoundedStat::new(base.max_hp, stats::MAX_HP)?,
            hp: BoundedStat::new(base.max_hp, stats::HP)?,
            max_mp: BoundedStat::new(base.max_mp, stats::MAX_MP)?,
            mp: BoundedStat::new(base.max_mp, stats::MP)?,
            strength: BoundedStat::new(base.strength, stats::STRENGTH)?,
            agility: BoundedStat::new(base.agility, stats::AGILITY)?,
            intellect: BoundedStat::new(base.intellect, stats::INTELLECT)?,
            effects: Vec::new(),
            skills: archetype
                .starting_skills()
                .iter()
                .map(|kind| Skill::new(*kind))
                .collect(),
            inventory: match faction {
                Faction::Party => Some(Inventory::new()),
                Faction::Boss => None,
            },
        })
    }

    // --- Accessors ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn hp(&self) -> f64 {
        self.hp.get()
    }

    pub fn max_hp(&self) -> f64 {
        self.max_hp.get()
    }

    pub fn mp(&self) -> f64 {
        self.mp.get()
    }

    pub fn max_mp(&self) -> f64 {
        self.max_mp.get()
    }

    pub fn strength(&self) -> f64 {
        self.strength.get()
    }

    pub fn agility(&self) -> f64 {
        self.agility.get()
    }

    pub fn intellect(&self) -> f64 {
        self.intellect.get()
    }

    pub fn hp_ratio(&self) -> f64 {
        self.hp() / self.max_hp()
    }

    pub fn is_alive(&self) -> bool {
        self.hp() > 0.0
    }

    pub fn is_ally(&self, other: &Combatant) -> bool {
        self.faction == other.faction
    }

    pub fn is_enemy(&self, other: &Combatant) -> bool {
        self.faction != other.faction
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn active_effects(&self) -> Vec<&'static str> {
        self.effects.iter().map(Effect::name).collect()
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.as_ref()
    }

    pub fn items_count(&self) -> usize {
        self.inventory.as_ref().map_or(0, Inventory::items_count)
    }

    // --- Validated setters ---

    /// Set HP directly. Values outside `[0, max_hp]` are rejected.
    pub fn set_hp(&mut self, value: f64) -> StatResult<()> {
        if value > self.max_hp() {
            return Err(StatError::OutOfRange {
                stat: "hp",
                value,
                min: stats::HP.min,
                max: self.max_hp(),
            });
        }
        self.hp.set(value)
    }

    /// Set MP directly. Values outside `[0, max_mp]` are rejected.
    pub fn set_mp(&mut self, value: f64) -> StatResult<()> {
        if value > self.max_mp() {
            return Err(StatError::OutOfRange {
                stat: "mp",
                value,
                min: stats::MP.min,
                max: self.max_mp(),
            });
        }
        self.mp.set(value)
    }

    // --- Resource mutation ---

    pub fn take_damage(&mut self, amount: f64) {
        let next = (self.hp() - amount.max(0.0)).max(0.0);
        self.hp.set_clamped(next);
    }

    pub fn heal(&mut self, amount: f64) {
        let next = (self.hp() + amount.max(0.0)).min(self.max_hp());
        self.hp.set_clamped(next);
    }

    pub fn restore_mp(&mut self, amount: f64) {
        let next = (self.mp() + amount.max(0.0)).min(self.max_mp());
        self.mp.set_clamped(next);
    }

    pub fn spend_mp(&mut self, amount: f64) {
        let next = (self.mp() - amount.max(0.0)).max(0.0);
        self.mp.set_clamped(next);
    }

    /// Apply a hit from an attack, skill or boss strategy. Active shields soak
    /// damage in the order they were applied; the rest comes off HP.
    pub fn receive_hit(&mut self, amount: f64) -> HitReport {
        let mut leftover = amount.max(0.0);
        for effect in self.effects.iter_mut() {
            if leftover <= 0.0 {
                break;
            }
            leftover = effect.absorb_damage(leftover);
        }
        self.take_damage(leftover);
        HitReport {
            absorbed: amount.max(0.0) - leftover,
            dealt: leftover,
        }
    }

    // --- Effects and cooldowns ---

    pub fn add_effect(&mut self, effect: Effect) -> String {
        let message = effect.on_apply(&self.name);
        self.effects.push(effect);
        message
    }

    /// Tick every active effect once, in the order they were applied.
    /// An effect that runs out is removed right after its last payload, with
    /// its own "ended" event.
    pub fn process_effects(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        let ticking = std::mem::take(&mut self.effects);
        let mut still_active = Vec::with_capacity(ticking.len());

        for mut effect in ticking {
            events.push(effect.on_turn(self));
            if effect.tick() {
                events.push(format!("{}'s {} effect has ended", self.name, effect.name()));
            } else {
                still_active.push(effect);
            }
        }

        self.effects = still_active;
        events
    }

    /// Count every owned skill's cooldown down by one round.
    pub fn tick_cooldowns(&mut self) {
        for skill in self.skills.iter_mut() {
            skill.reduce_cooldown();
        }
    }

    pub fn add_item(&mut self, item: ItemKind) {
        self.inventory.get_or_insert_with(Inventory::new).add_item(item);
    }

    // --- Actions ---

    /// Shared liveness check for every action entry point.
    fn refuse_if_dead(&self, target: &Combatant) -> Option<String> {
        if !self.is_alive() {
            Some(format!("{} is dead and cannot act!", self.name))
        } else if !target.is_alive() {
            Some(format!("{} is already dead!", target.name))
        } else {
            None
        }
    }

    pub fn basic_attack(&self, target: &mut Combatant, rng: &mut TurnRng) -> String {
        if let Some(refusal) = self.refuse_if_dead(target) {
            return refusal;
        }
        if !self.is_enemy(target) {
            return format!("{} cannot attack ally {}!", self.name, target.name);
        }

        let roll = basic_attack_damage(self, rng);
        let hit = target.receive_hit(roll.amount);

        let mut message = if basic_attack_profile(self.archetype).magical {
            format!(
                "{} strikes {} with magic for {:.1} damage!",
                self.name, target.name, roll.amount
            )
        } else {
            format!(
                "{} attacks {} for {:.1} damage!",
                self.name, target.name, roll.amount
            )
        };
        if roll.critical {
            message.push_str(" Critical hit!");
        }
        push_absorbed(&mut message, &hit);
        message
    }

    /// Use the skill at `skill_index` on `target`.
    ///
    /// For the boss the index is ignored: its only skill is the current phase
    /// strategy, here aimed at the single target given.
    pub fn use_skill(
        &mut self,
        target: &mut Combatant,
        skill_index: usize,
        rng: &mut TurnRng,
    ) -> String {
        if let Some(refusal) = self.refuse_if_dead(target) {
            return refusal;
        }

        match self.archetype {
            Archetype::Warrior | Archetype::Mage => {
                if !self.is_enemy(target) {
                    return format!(
                        "{} cannot use a combat skill on ally {}!",
                        self.name, target.name
                    );
                }
            }
            Archetype::Healer => {
                if skill_index == 0 && !self.is_ally(target) {
                    return format!("{} cannot heal enemy {}!", self.name, target.name);
                }
            }
            Archetype::Boss => {
                if !self.is_enemy(target) {
                    return format!("{} cannot unleash its power on ally {}!", self.name, target.name);
                }
                let action = self.use_phase_skill(std::slice::from_mut(target), rng);
                return format!("{} {}", action.announcement, action.event);
            }
        }

        if skill_index >= self.skills.len() {
            return "Invalid skill index!".to_string();
        }

        let mut skill = self.skills[skill_index].clone();
        let outcome = skill.use_on(self, target);
        self.skills[skill_index] = skill;

        match outcome {
            SkillOutcome::Resolved(mut message) => {
                if self.archetype == Archetype::Mage
                    && skill_index == 0
                    && self.mp() > MAGE_POISON_MP_THRESHOLD
                {
                    target.add_effect(Effect::poison(MAGE_POISON_DAMAGE));
                    message.push_str(" The target is poisoned!");
                }
                message
            }
            SkillOutcome::Unavailable(message) => message,
        }
    }

    /// The boss's phase skill against the whole enemy roster. The phase is
    /// derived from the current HP ratio on every call.
    pub fn use_phase_skill(&mut self, targets: &mut [Combatant], rng: &mut TurnRng) -> PhaseAction {
        let phase = BossPhase::from_hp_ratio(self.hp_ratio());
        let announcement = format!("{} shifts into {}!", self.name, phase);
        let event = if self.is_alive() {
            phase.execute(self, targets, rng)
        } else {
            format!("{} is dead and cannot act!", self.name)
        };
        PhaseAction {
            phase,
            announcement,
            event,
        }
    }

    /// Use an inventory item on this combatant.
    pub fn use_item(&mut self, item_index: usize) -> String {
        match self.inventory.take() {
            Some(mut inventory) => {
                let message = inventory.use_item(item_index, self);
                self.inventory = Some(inventory);
                message
            }
            None => format!("{} has no inventory!", self.name),
        }
    }
}

fn push_absorbed(message: &mut String, hit: &HitReport) {
    if hit.absorbed > 0.0 {
        message.push_str(&format!(" (shield absorbed {:.1})", hit.absorbed));
    }
}

pub(crate) fn describe_hit(target: &Combatant, amount: f64, hit: &HitReport) -> String {
    let mut message = format!("{} takes {:.1} damage.", target.name(), amount);
    push_absorbed(&mut message, hit);
    message
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv. {}) HP: {:.1}/{} MP: {:.1}/{}",
            self.name,
            self.level,
            self.hp(),
            self.max_hp(),
            self.mp(),
            self.max_mp()
        )
    }
}
