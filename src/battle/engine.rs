//! The battle controller: round loop, action dispatch and terminal checks.

use crate::battle::state::{BattleEvent, BattleLog, BattleOutcome, LogEntry, TurnRng};
use crate::battle::turn_order::{CombatantId, TurnOrder};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::errors::{BattleResult, PersistenceError, SetupError};
use schema::Faction;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A single party-versus-boss fight. Owns every combatant, the random stream,
/// the turn order and the log for the battle's whole lifetime.
#[derive(Debug)]
pub struct Battle {
    pub(crate) party: Vec<Combatant>,
    pub(crate) boss: Combatant,
    pub(crate) round_number: u32,
    log: BattleLog,
    turn_order: TurnOrder,
    rng: TurnRng,
    config: BattleConfig,
    started: bool,
    outcome: Option<BattleOutcome>,
}

fn combatant_alive(party: &[Combatant], boss: &Combatant, id: CombatantId) -> bool {
    match id {
        CombatantId::Party(index) => party.get(index).is_some_and(Combatant::is_alive),
        CombatantId::Boss => boss.is_alive(),
    }
}

impl Battle {
    pub fn new(party: Vec<Combatant>, boss: Combatant, rng: TurnRng) -> BattleResult<Self> {
        Self::with_config(party, boss, rng, BattleConfig::default())
    }

    pub fn with_config(
        mut party: Vec<Combatant>,
        boss: Combatant,
        rng: TurnRng,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        config.validate()?;
        if party.is_empty() {
            return Err(SetupError::EmptyParty.into());
        }
        if boss.faction() != Faction::Boss {
            return Err(SetupError::BossNotInBossFaction(boss.name().to_string()).into());
        }
        if let Some(member) = party.iter().find(|m| m.faction() == Faction::Boss) {
            return Err(SetupError::PartyMemberInBossFaction(member.name().to_string()).into());
        }

        for member in party.iter_mut() {
            for item in &config.starting_items {
                member.add_item(*item);
            }
        }

        let turn_order = TurnOrder::new(
            party
                .iter()
                .enumerate()
                .map(|(i, m)| (CombatantId::Party(i), m))
                .chain(std::iter::once((CombatantId::Boss, &boss)))
                .filter(|(_, c)| c.is_alive())
                .map(|(id, c)| (id, c.agility())),
        );

        Ok(Self {
            party,
            boss,
            round_number: 0,
            log: BattleLog::new(),
            turn_order,
            rng,
            config,
            started: false,
            outcome: None,
        })
    }

    // --- Queries ---

    pub fn party(&self) -> &[Combatant] {
        &self.party
    }

    pub fn boss(&self) -> &Combatant {
        &self.boss
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    /// The whole log as newline-joined text.
    pub fn log_text(&self) -> String {
        self.log.to_string()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        match id {
            CombatantId::Party(index) => self.party.get(index),
            CombatantId::Boss => Some(&self.boss),
        }
    }

    /// The turn ranking as "name (agility: N)" lines.
    pub fn turn_order_summary(&self) -> Vec<String> {
        self.turn_order
            .current_order()
            .iter()
            .filter_map(|id| self.combatant(*id))
            .map(|c| format!("{} (agility: {})", c.name(), c.agility()))
            .collect()
    }

    fn party_alive(&self) -> bool {
        self.party.iter().any(Combatant::is_alive)
    }

    /// The battle goes on while the boss and at least one party member stand
    /// and the round cap has not been reached.
    pub fn battle_continues(&self) -> bool {
        self.boss.is_alive() && self.party_alive() && self.round_number < self.config.max_rounds
    }

    // --- Driving the battle ---

    /// Play rounds until the battle ends.
    pub fn run(&mut self) -> BattleOutcome {
        loop {
            if let Some(outcome) = self.play_round() {
                return outcome;
            }
        }
    }

    /// Play a single round. Returns the outcome once the battle is over; calling
    /// again after that is a no-op that returns the same outcome.
    pub fn play_round(&mut self) -> Option<BattleOutcome> {
        if let Some(outcome) = self.outcome {
            return Some(outcome);
        }
        if !self.started {
            self.started = true;
            tracing::info!(
                party = self.party.len(),
                boss = self.boss.name(),
                "battle starting"
            );
            self.record(BattleEvent::BattleStarted);
        }
        if !self.battle_continues() {
            return Some(self.conclude());
        }

        self.round_number += 1;
        self.record(BattleEvent::RoundStarted {
            round: self.round_number,
        });

        self.process_round_effects();
        self.execute_turns();

        if self.boss.is_alive() && self.party_alive() && self.round_number < self.config.max_rounds {
            None
        } else {
            Some(self.conclude())
        }
    }

    fn conclude(&mut self) -> BattleOutcome {
        let outcome = if !self.boss.is_alive() {
            self.record(BattleEvent::Victory);
            BattleOutcome::Victory
        } else if !self.party_alive() {
            self.record(BattleEvent::Defeat);
            BattleOutcome::Defeat
        } else {
            self.record(BattleEvent::RoundCapReached {
                max_rounds: self.config.max_rounds,
            });
            BattleOutcome::RoundCapReached
        };
        tracing::info!(?outcome, rounds = self.round_number, "battle finished");
        self.outcome = Some(outcome);
        outcome
    }

    fn record(&mut self, event: BattleEvent) {
        self.log.push(self.round_number, event);
    }

    fn record_text(&mut self, text: String) {
        self.record(BattleEvent::Combat(text));
    }

    /// Tick effects on every living combatant, then count every skill
    /// cooldown down by one.
    fn process_round_effects(&mut self) {
        let mut events = Vec::new();
        for member in self.party.iter_mut().chain(std::iter::once(&mut self.boss)) {
            if member.is_alive() {
                events.extend(member.process_effects());
            }
            member.tick_cooldowns();
        }
        for event in events {
            self.record_text(event);
        }
    }

    /// Walk the roster standing when the action phase begins, in party order
    /// then the boss. A slot whose occupant died before its turn is skipped
    /// without a draw, and nobody acts twice in one round.
    fn execute_turns(&mut self) {
        let roster: Vec<CombatantId> = (0..self.party.len())
            .map(CombatantId::Party)
            .chain(std::iter::once(CombatantId::Boss))
            .filter(|id| combatant_alive(&self.party, &self.boss, *id))
            .collect();
        let mut acted: HashSet<CombatantId> = HashSet::with_capacity(roster.len());

        for slot in roster {
            if !combatant_alive(&self.party, &self.boss, slot) {
                continue;
            }
            let Some(actor) = self.next_fresh_actor(&acted) else {
                break;
            };
            acted.insert(actor);
            self.execute_single_turn(actor);
        }
    }

    /// Draw from the turn order until someone who has not acted this round
    /// comes up. `None` once every living combatant has had its turn.
    fn next_fresh_actor(&mut self, acted: &HashSet<CombatantId>) -> Option<CombatantId> {
        let party = &self.party;
        let boss = &self.boss;
        let attempts = self.turn_order.current_order().len();
        for _ in 0..attempts {
            let actor = self
                .turn_order
                .next_actor(|id| combatant_alive(party, boss, id))?;
            if !acted.contains(&actor) {
                return Some(actor);
            }
        }
        None
    }

    fn execute_single_turn(&mut self, actor: CombatantId) {
        let Some(combatant) = self.combatant(actor) else {
            return;
        };
        if !combatant.is_alive() {
            return;
        }
        let name = combatant.name().to_string();
        self.record(BattleEvent::TurnStarted { actor: name });

        match actor {
            CombatantId::Boss => self.boss_turn(),
            CombatantId::Party(index) => self.party_member_turn(index),
        }
    }

    fn boss_turn(&mut self) {
        let living: Vec<usize> = self
            .party
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_alive())
            .map(|(i, _)| i)
            .collect();
        if living.is_empty() {
            self.record_text("No targets to attack".to_string());
            return;
        }

        let roll = self.rng.roll("boss action");
        if roll < self.config.boss_skill_chance && self.boss.mp() > self.config.boss_skill_min_mp {
            let action = self.boss.use_phase_skill(&mut self.party, &mut self.rng);
            self.record_text(action.announcement);
            self.record_text(action.event);
        } else {
            let pick = self.rng.choose_index(living.len(), "boss attack target");
            let target = &mut self.party[living[pick]];
            let event = self.boss.basic_attack(target, &mut self.rng);
            self.record_text(event);
        }
    }

    fn party_member_turn(&mut self, index: usize) {
        let attack_chance = self.config.party_attack_chance;
        let skill_threshold = attack_chance + self.config.party_skill_chance;
        let roll = self.rng.roll("party action");

        let member = &mut self.party[index];
        let event = if roll < attack_chance {
            if self.boss.is_alive() {
                member.basic_attack(&mut self.boss, &mut self.rng)
            } else {
                "No target to attack".to_string()
            }
        } else if roll < skill_threshold && member.mp() > self.config.party_skill_min_mp {
            if self.boss.is_alive() {
                member.use_skill(&mut self.boss, 0, &mut self.rng)
            } else {
                "No target for the skill".to_string()
            }
        } else if member.items_count() > 0 {
            member.use_item(0)
        } else {
            "No items to use".to_string()
        };
        self.record_text(event);
    }

    // --- Persistence ---

    /// Write the newline-joined log to `path`.
    pub fn write_log(&self, path: &Path) -> BattleResult<()> {
        fs::write(path, self.log_text()).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Write a JSON snapshot of the battle to `path` and log that it happened.
    pub fn save_state(&mut self, path: &Path) -> BattleResult<()> {
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot).map_err(PersistenceError::from)?;
        fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.record(BattleEvent::StateSaved {
            path: path.display().to_string(),
        });
        Ok(())
    }
}
