use crate::battle::engine::Battle;
use crate::combatant::Combatant;
use schema::Archetype;
use serde::{Deserialize, Serialize};

/// Persisted picture of a battle. Field names are part of the save format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveState {
    pub round_number: u32,
    pub boss: BossSnapshot,
    pub party: Vec<MemberSnapshot>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BossSnapshot {
    pub name: String,
    pub hp: f64,
    pub max_hp: f64,
    pub mp: f64,
    pub max_mp: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MemberSnapshot {
    pub name: String,
    #[serde(rename = "class")]
    pub archetype: Archetype,
    pub hp: f64,
    pub max_hp: f64,
    pub mp: f64,
    pub max_mp: f64,
    pub level: u32,
}

impl From<&Combatant> for BossSnapshot {
    fn from(boss: &Combatant) -> Self {
        Self {
            name: boss.name().to_string(),
            hp: boss.hp(),
            max_hp: boss.max_hp(),
            mp: boss.mp(),
            max_mp: boss.max_mp(),
        }
    }
}

impl From<&Combatant> for MemberSnapshot {
    fn from(member: &Combatant) -> Self {
        Self {
            name: member.name().to_string(),
            archetype: member.archetype(),
            hp: member.hp(),
            max_hp: member.max_hp(),
            mp: member.mp(),
            max_mp: member.max_mp(),
            level: member.level(),
        }
    }
}

/// Local wall-clock time in ISO-8601 without an offset.
fn local_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

impl Battle {
    pub fn snapshot(&self) -> SaveState {
        self.snapshot_at(local_timestamp())
    }

    /// Snapshot with a caller-chosen timestamp.
    pub fn snapshot_at(&self, timestamp: impl Into<String>) -> SaveState {
        SaveState {
            round_number: self.round_number,
            boss: BossSnapshot::from(&self.boss),
            party: self.party.iter().map(MemberSnapshot::from).collect(),
            timestamp: timestamp.into(),
        }
    }

    /// Human-readable summary of where the battle stands.
    pub fn status_report(&self) -> String {
        let alive = self.party.iter().filter(|m| m.is_alive()).count();
        let mut lines = vec![
            format!("Round: {}", self.round_number),
            format!(
                "Boss {}: HP {:.1}/{}",
                self.boss.name(),
                self.boss.hp(),
                self.boss.max_hp()
            ),
            format!("Party alive: {}/{}", alive, self.party.len()),
        ];
        for member in &self.party {
            let marker = if member.is_alive() { "" } else { " (dead)" };
            lines.push(format!(
                "  {}: HP {:.1}/{}{}",
                member.name(),
                member.hp(),
                member.max_hp(),
                marker
            ));
        }
        lines.join("\n")
    }
}
