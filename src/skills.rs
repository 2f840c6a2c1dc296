use crate::battle::calculators::skill_power;
use crate::combatant::{describe_hit, Combatant};
use schema::{SkillData, SkillKind, TargetClass};

/// What happened when a skill was invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillOutcome {
    /// MP was spent, the cooldown started and the skill took effect
    Resolved(String),
    /// Nothing changed; the skill could not be used right now
    Unavailable(String),
}

impl SkillOutcome {
    pub fn message(&self) -> &str {
        match self {
            SkillOutcome::Resolved(message) | SkillOutcome::Unavailable(message) => message,
        }
    }
}

/// A skill instance owned by a single caster.
///
/// The cooldown counter lives on the instance, so every combatant holds its own
/// copies and cooldowns never leak between casters.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    kind: SkillKind,
    current_cooldown: u32,
}

impl Skill {
    pub fn new(kind: SkillKind) -> Self {
        Self {
            kind,
            current_cooldown: 0,
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn data(&self) -> SkillData {
        self.kind.data()
    }

    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn can_use(&self, caster: &Combatant, target: &Combatant) -> bool {
        let data = self.data();
        if caster.mp() < data.mp_cost {
            return false;
        }
        if self.current_cooldown > 0 {
            return false;
        }
        match data.target {
            TargetClass::Ally => caster.is_ally(target),
            TargetClass::Enemy => caster.is_enemy(target),
        }
    }

    pub fn use_on(&mut self, caster: &mut Combatant, target: &mut Combatant) -> SkillOutcome {
        if !self.can_use(caster, target) {
            return SkillOutcome::Unavailable(format!("Skill {} is unavailable!", self.name()));
        }

        let data = self.data();
        caster.spend_mp(data.mp_cost);
        self.current_cooldown = data.cooldown;

        let power = skill_power(self.kind, caster);
        let message = match self.kind {
            SkillKind::PowerStrike | SkillKind::Fireball => {
                let hit = target.receive_hit(power);
                format!(
                    "{} uses {}! {}",
                    caster.name(),
                    data.name,
                    describe_hit(target, power, &hit)
                )
            }
            SkillKind::Heal => {
                target.heal(power);
                format!(
                    "{} uses {}! {} recovers {:.1} HP",
                    caster.name(),
                    data.name,
                    target.name(),
                    power
                )
            }
        };
        SkillOutcome::Resolved(message)
    }

    pub fn reduce_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}
