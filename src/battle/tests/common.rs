use crate::battle::engine::Battle;
use crate::battle::state::TurnRng;
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use schema::{Archetype, BaseStats};

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```
/// let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
///     .with_agility(1.0)
///     .with_hp(1.0)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    archetype: Archetype,
    level: u32,
    stats: BaseStats,
    current_hp: Option<f64>,
    current_mp: Option<f64>,
}

impl TestCombatantBuilder {
    /// Starts from the archetype's stats at `level`.
    pub fn new(name: &str, archetype: Archetype, level: u32) -> Self {
        Self {
            name: name.to_string(),
            archetype,
            level,
            stats: archetype.base_stats(level),
            current_hp: None,
            current_mp: None,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.stats.strength = strength;
        self
    }

    pub fn with_agility(mut self, agility: f64) -> Self {
        self.stats.agility = agility;
        self
    }

    pub fn with_max_hp(mut self, max_hp: f64) -> Self {
        self.stats.max_hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: f64) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_mp(mut self, mp: f64) -> Self {
        self.current_mp = Some(mp);
        self
    }

    pub fn build(self) -> Combatant {
        let mut combatant =
            match Combatant::with_stats(self.name.clone(), self.level, self.archetype, self.stats) {
                Ok(combatant) => combatant,
                Err(err) => panic!("Failed to build test combatant {}: {}", self.name, err),
            };
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp).unwrap();
        }
        if let Some(mp) = self.current_mp {
            combatant.set_mp(mp).unwrap();
        }
        combatant
    }
}

/// A scripted stream of mid-range rolls: party members always basic-attack,
/// the boss always basic-attacks, and nobody ever crits.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.5; 400])
}

pub fn battle_with(party: Vec<Combatant>, boss: Combatant, rng: TurnRng) -> Battle {
    match Battle::new(party, boss, rng) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to build test battle: {}", err),
    }
}

/// Same as `battle_with`, but with no starting items so inventories stay empty.
pub fn battle_without_items(party: Vec<Combatant>, boss: Combatant, rng: TurnRng) -> Battle {
    let config = BattleConfig {
        starting_items: Vec::new(),
        ..BattleConfig::default()
    };
    match Battle::with_config(party, boss, rng, config) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to build test battle: {}", err),
    }
}

/// Rendered event text (without the round tag) for every entry of `round`.
pub fn round_messages(battle: &Battle, round: u32) -> Vec<String> {
    battle
        .log()
        .iter()
        .filter(|entry| entry.round == round)
        .map(|entry| entry.event.to_string())
        .collect()
}
