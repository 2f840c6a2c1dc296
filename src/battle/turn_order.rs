//! Cyclic, liveness-aware turn sequencing.
//!
//! Participants are ranked once by descending agility (ties keep insertion
//! order). Each request for the next actor first drops anyone who has died,
//! wraps the cursor if it ran past the end, then hands out the combatant at
//! the cursor. The cursor is a plain index into the filtered ranking, so a
//! death shifts who occupies each slot.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Stable handle for a combatant inside a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatantId {
    Party(usize),
    Boss,
}

#[derive(Debug, Clone)]
pub struct TurnOrder {
    ranked: Vec<CombatantId>,
    cursor: usize,
}

impl TurnOrder {
    /// Rank `(id, agility)` entries. Callers pass only living combatants.
    pub fn new(participants: impl IntoIterator<Item = (CombatantId, f64)>) -> Self {
        let mut entries: Vec<(CombatantId, f64)> = participants.into_iter().collect();
        // sort_by_key is stable, which keeps insertion order on equal agility
        entries.sort_by_key(|(_, agility)| Reverse(OrderedFloat(*agility)));
        Self {
            ranked: entries.into_iter().map(|(id, _)| id).collect(),
            cursor: 0,
        }
    }

    /// Hand out the next living actor, or `None` once nobody is left alive.
    pub fn next_actor(&mut self, is_alive: impl Fn(CombatantId) -> bool) -> Option<CombatantId> {
        self.ranked.retain(|id| is_alive(*id));
        if self.ranked.is_empty() {
            tracing::debug!("turn order exhausted");
            return None;
        }
        if self.cursor >= self.ranked.len() {
            self.cursor = 0;
        }
        let actor = self.ranked[self.cursor];
        self.cursor += 1;
        Some(actor)
    }

    /// The current ranking. Entries that died since the last draw are still
    /// listed until the next call to [`TurnOrder::next_actor`].
    pub fn current_order(&self) -> &[CombatantId] {
        &self.ranked
    }

    pub fn is_exhausted(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashSet;

    use CombatantId::{Boss, Party};

    fn order_with_agilities() -> TurnOrder {
        TurnOrder::new([(Party(0), 5.0), (Party(1), 20.0), (Party(2), 10.0)])
    }

    #[test]
    fn test_cycles_by_descending_agility() {
        let mut order = order_with_agilities();
        let draws: Vec<_> = (0..5).filter_map(|_| order.next_actor(|_| true)).collect();
        assert_eq!(draws, vec![Party(1), Party(2), Party(0), Party(1), Party(2)]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut order = TurnOrder::new([(Party(0), 10.0), (Party(1), 10.0), (Boss, 10.0)]);
        assert_eq!(order.current_order(), &[Party(0), Party(1), Boss]);
        assert_eq!(order.next_actor(|_| true), Some(Party(0)));
    }

    #[test]
    fn test_dead_combatant_drops_out_of_the_next_cycle() {
        let mut order = order_with_agilities();
        let dead = RefCell::new(HashSet::new());
        let alive = |id: CombatantId| !dead.borrow().contains(&id);

        for _ in 0..3 {
            order.next_actor(alive);
        }
        dead.borrow_mut().insert(Party(1));

        let draws: Vec<_> = (0..4).filter_map(|_| order.next_actor(alive)).collect();
        assert_eq!(draws, vec![Party(2), Party(0), Party(2), Party(0)]);
    }

    #[test]
    fn test_death_mid_cycle_shifts_slots() {
        let mut order = order_with_agilities();
        let dead = RefCell::new(HashSet::new());
        let alive = |id: CombatantId| !dead.borrow().contains(&id);

        assert_eq!(order.next_actor(alive), Some(Party(1)));
        dead.borrow_mut().insert(Party(1));

        // Cursor 1 now points at the agility-5 combatant, skipping agility 10 this lap.
        assert_eq!(order.next_actor(alive), Some(Party(0)));
        assert_eq!(order.next_actor(alive), Some(Party(2)));
    }

    #[test]
    fn test_exhaustion_when_everyone_is_dead() {
        let mut order = order_with_agilities();
        assert_eq!(order.next_actor(|_| false), None);
        assert!(order.is_exhausted());

        let mut empty = TurnOrder::new(Vec::new());
        assert_eq!(empty.next_actor(|_| true), None);
    }
}
