use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a battle ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The boss was defeated
    Victory,
    /// Every party member fell
    Defeat,
    /// The round cap was hit with both sides still standing. Counts as a defeat.
    RoundCapReached,
}

impl BattleOutcome {
    pub fn is_victory(self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted,
    RoundStarted { round: u32 },
    TurnStarted { actor: String },
    /// Text produced by an attack, skill, item, effect tick or phase change
    Combat(String),
    Victory,
    Defeat,
    RoundCapReached { max_rounds: u32 },
    StateSaved { path: String },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::BattleStarted => write!(f, "The battle begins!"),
            BattleEvent::RoundStarted { round } => write!(f, "=== Round {} ===", round),
            BattleEvent::TurnStarted { actor } => write!(f, "{}'s turn:", actor),
            BattleEvent::Combat(text) => write!(f, "{}", text),
            BattleEvent::Victory => write!(f, "VICTORY! The boss has been defeated!"),
            BattleEvent::Defeat => write!(f, "DEFEAT! The whole party has fallen!"),
            BattleEvent::RoundCapReached { max_rounds } => write!(
                f,
                "DEFEAT! The round limit of {} was reached before either side fell.",
                max_rounds
            ),
            BattleEvent::StateSaved { path } => write!(f, "Battle state saved to {}", path),
        }
    }
}

/// One line of the battle log, tagged with the round it happened in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub round: u32,
    pub event: BattleEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Round {}] {}", self.round, self.event)
    }
}

/// Append-only, ordered battle log.
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, event: BattleEvent) {
        tracing::info!(round, "{}", event);
        self.entries.push(LogEntry { round, event });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Rendered lines, one per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for BattleLog {
    /// Newline-joined log text, the form written to log files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// A pluggable source of uniform values in `[0, 1)`.
pub trait RandomSource: fmt::Debug {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// A fixed script of rolls, handed out in order. Meant for tests.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    index: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<f64>) -> Self {
        Self { rolls, index: 0 }
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        let roll = self.rolls.get(self.index).copied().unwrap_or_else(|| {
            panic!(
                "ScriptedRolls exhausted after {} rolls. Need more random values.",
                self.rolls.len()
            )
        });
        self.index += 1;
        roll
    }
}

/// The single random stream a battle draws from. Every draw carries a reason
/// label that shows up in trace logs.
#[derive(Debug)]
pub struct TurnRng {
    source: Box<dyn RandomSource>,
    draws: u64,
}

impl TurnRng {
    pub fn from_source(source: Box<dyn RandomSource>) -> Self {
        Self { source, draws: 0 }
    }

    /// Reproducible stream: the same seed yields the same battle.
    pub fn seeded(seed: u64) -> Self {
        Self::from_source(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn new_random() -> Self {
        Self::from_source(Box::new(StdRng::from_os_rng()))
    }

    pub fn new_for_test(rolls: Vec<f64>) -> Self {
        Self::from_source(Box::new(ScriptedRolls::new(rolls)))
    }

    pub fn roll(&mut self, reason: &str) -> f64 {
        let value = self.source.next_unit();
        self.draws += 1;
        tracing::trace!(draw = self.draws, value, reason, "rng draw");
        value
    }

    /// Pick an index in `0..len` with one draw. `len` must be non-zero.
    pub fn choose_index(&mut self, len: usize, reason: &str) -> usize {
        let value = self.roll(reason);
        ((value * len as f64) as usize).min(len.saturating_sub(1))
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded_streams_match() {
        let mut a = TurnRng::seeded(7);
        let mut b = TurnRng::seeded(7);
        for _ in 0..50 {
            assert_eq!(a.roll("test"), b.roll("test"));
        }
        assert_eq!(a.draws(), 50);
    }

    #[test]
    fn test_choose_index_maps_rolls_onto_range() {
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.34, 0.99]);
        assert_eq!(rng.choose_index(3, "pick"), 0);
        assert_eq!(rng.choose_index(3, "pick"), 1);
        assert_eq!(rng.choose_index(3, "pick"), 2);
    }

    #[test]
    #[should_panic(expected = "ScriptedRolls exhausted")]
    fn test_scripted_rolls_panic_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![0.5]);
        rng.roll("first");
        rng.roll("second");
    }

    #[test]
    fn test_log_entries_are_round_tagged() {
        let mut log = BattleLog::new();
        log.push(0, BattleEvent::BattleStarted);
        log.push(3, BattleEvent::Combat("Conan attacks".to_string()));
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.to_string(),
            "[Round 0] The battle begins!\n[Round 3] Conan attacks"
        );
    }
}
