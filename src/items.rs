use crate::combatant::Combatant;
use schema::ItemKind;
use serde::{Deserialize, Serialize};

/// Apply a consumable to `target` and describe the result.
pub fn apply_item(item: ItemKind, target: &mut Combatant) -> String {
    match item {
        ItemKind::HealthPotion { heal_amount } => {
            if !target.is_alive() {
                return format!("{} is dead, the potion has no effect!", target.name());
            }
            let before = target.hp();
            target.heal(heal_amount);
            format!(
                "{} uses {} and recovers {:.1} HP!",
                target.name(),
                item.name(),
                target.hp() - before
            )
        }
        ItemKind::ManaPotion { mana_amount } => {
            let before = target.mp();
            target.restore_mp(mana_amount);
            format!(
                "{} uses {} and recovers {:.1} MP!",
                target.name(),
                item.name(),
                target.mp() - before
            )
        }
        ItemKind::Elixir => {
            if !target.is_alive() {
                return format!("{} is dead, the elixir has no effect!", target.name());
            }
            let hp_healed = target.max_hp() - target.hp();
            let mp_restored = target.max_mp() - target.mp();
            target.heal(hp_healed);
            target.restore_mp(mp_restored);
            format!(
                "{} uses {}! Restored {:.1} HP and {:.1} MP",
                target.name(),
                item.name(),
                hp_healed,
                mp_restored
            )
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<ItemKind>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: ItemKind) {
        self.items.push(item);
    }

    /// Use and consume the item at `index`. The item is spent even when it had
    /// nothing to restore.
    pub fn use_item(&mut self, index: usize, target: &mut Combatant) -> String {
        if index >= self.items.len() {
            return "Invalid item index!".to_string();
        }
        let item = self.items.remove(index);
        apply_item(item, target)
    }

    pub fn items(&self) -> &[ItemKind] {
        &self.items
    }

    pub fn items_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn list(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}: {}", i, item))
            .collect()
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.items.is_empty() {
            return write!(f, "Inventory is empty");
        }
        write!(f, "{}", self.list().join("\n"))
    }
}
