use serde::{Deserialize, Serialize};
use std::fmt;

pub const POTION_AMOUNT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion { heal_amount: f64 },
    ManaPotion { mana_amount: f64 },
    Elixir,
}

impl ItemKind {
    pub fn health_potion() -> Self {
        ItemKind::HealthPotion {
            heal_amount: POTION_AMOUNT,
        }
    }

    pub fn mana_potion() -> Self {
        ItemKind::ManaPotion {
            mana_amount: POTION_AMOUNT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion { .. } => "Health Potion",
            ItemKind::ManaPotion { .. } => "Mana Potion",
            ItemKind::Elixir => "Elixir",
        }
    }

    pub fn description(&self) -> String {
        match self {
            ItemKind::HealthPotion { heal_amount } => format!("Restores {} HP", heal_amount),
            ItemKind::ManaPotion { mana_amount } => format!("Restores {} MP", mana_amount),
            ItemKind::Elixir => "Fully restores HP and MP".to_string(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.description())
    }
}
