#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleOutcome, TurnRng};
    use crate::battle::tests::common::{
        battle_with, battle_without_items, predictable_rng, round_messages, TestCombatantBuilder,
    };
    use crate::config::BattleConfig;
    use crate::battle::engine::Battle;
    use pretty_assertions::assert_eq;
    use schema::Archetype;

    #[test]
    fn test_one_hp_boss_falls_in_round_one() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_agility(50.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_hp(1.0)
            .build();
        let mut battle = battle_with(vec![warrior], boss, predictable_rng());

        let outcome = battle.run();

        assert_eq!(outcome, BattleOutcome::Victory);
        assert_eq!(battle.round_number(), 1);
        assert!(!battle.boss().is_alive());

        let lines: Vec<String> = battle.log_text().lines().map(String::from).collect();
        assert_eq!(lines[0], "[Round 0] The battle begins!");
        assert_eq!(lines[1], "[Round 1] === Round 1 ===");
        assert_eq!(lines[2], "[Round 1] Aria's turn:");
        assert_eq!(lines[3], "[Round 1] Aria attacks Gorath for 24.0 damage!");
        assert_eq!(
            lines.last().unwrap(),
            "[Round 1] VICTORY! The boss has been defeated!"
        );
    }

    #[test]
    fn test_stalemate_stops_at_round_fifty() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_strength(1.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_strength(1.0)
            .build();
        let mut battle = battle_with(vec![warrior], boss, predictable_rng());

        let outcome = battle.run();

        assert_eq!(outcome, BattleOutcome::RoundCapReached);
        assert!(!outcome.is_victory());
        assert_eq!(battle.round_number(), 50);
        assert!(battle.boss().is_alive());
        assert!(battle.party()[0].is_alive());
        assert!(!battle.battle_continues());
        assert_eq!(
            battle.log().last().unwrap().to_string(),
            "[Round 50] DEFEAT! The round limit of 50 was reached before either side fell."
        );
    }

    #[test]
    fn test_configured_round_cap() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_strength(1.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_strength(1.0)
            .build();
        let config = BattleConfig {
            max_rounds: 3,
            ..BattleConfig::default()
        };
        let mut battle =
            Battle::with_config(vec![warrior], boss, predictable_rng(), config).unwrap();

        assert_eq!(battle.run(), BattleOutcome::RoundCapReached);
        assert_eq!(battle.round_number(), 3);
    }

    #[test]
    fn test_play_round_after_the_end_changes_nothing() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_agility(50.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_hp(1.0)
            .build();
        let mut battle = battle_with(vec![warrior], boss, predictable_rng());

        assert_eq!(battle.play_round(), Some(BattleOutcome::Victory));
        let entries = battle.log().len();

        assert_eq!(battle.play_round(), Some(BattleOutcome::Victory));
        assert_eq!(battle.outcome(), Some(BattleOutcome::Victory));
        assert_eq!(battle.log().len(), entries);
        assert_eq!(battle.round_number(), 1);
    }

    #[test]
    fn test_boss_kills_last_member_for_defeat() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_hp(1.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(90.0)
            .build();
        // boss action (basic attack), target pick, crit roll
        let rng = TurnRng::new_for_test(vec![0.9, 0.0, 0.9]);
        let mut battle = battle_with(vec![warrior], boss, rng);

        assert_eq!(battle.run(), BattleOutcome::Defeat);
        let messages = round_messages(&battle, 1);
        assert_eq!(messages[1], "Gorath's turn:");
        assert_eq!(messages[2], "Gorath attacks Aria for 24.0 damage!");
        assert_eq!(messages.last().unwrap(), "DEFEAT! The whole party has fallen!");
        assert!(!messages.iter().any(|m| m == "Aria's turn:"));
    }

    #[test]
    fn test_cooldowns_recover_between_rounds() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5).build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(1.0)
            .build();
        // Each round: Aria picks her skill, the boss basic-attacks without a crit.
        let rng = TurnRng::new_for_test(vec![0.7, 0.9, 0.0, 0.9, 0.7, 0.9, 0.0, 0.9]);
        let mut battle = battle_with(vec![warrior], boss, rng);

        assert_eq!(battle.play_round(), None);
        assert_eq!(battle.party()[0].skills()[0].current_cooldown(), 1);
        assert_eq!(battle.play_round(), None);

        let strike = "Aria uses Power Strike! Gorath takes 60.0 damage.";
        assert!(round_messages(&battle, 1).iter().any(|m| m == strike));
        assert!(round_messages(&battle, 2).iter().any(|m| m == strike));
        assert_eq!(battle.party()[0].mp(), 20.0);
        assert_eq!(battle.boss().hp(), 230.0);
    }

    #[test]
    fn test_high_roll_uses_first_item() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_hp(100.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(1.0)
            .build();
        let rng = TurnRng::new_for_test(vec![0.95, 0.9, 0.0, 0.9]);
        let mut battle = battle_with(vec![warrior], boss, rng);

        battle.play_round();

        let messages = round_messages(&battle, 1);
        assert_eq!(messages[2], "Aria uses Health Potion and recovers 30.0 HP!");
        assert_eq!(battle.party()[0].items_count(), 1);
        assert_eq!(battle.party()[0].hp(), 130.0 - 24.0);
    }

    #[test]
    fn test_low_mana_skill_roll_falls_through_to_items() {
        let healer = TestCombatantBuilder::new("Bram", Archetype::Healer, 5)
            .with_mp(5.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(1.0)
            .build();
        let rng = TurnRng::new_for_test(vec![0.7, 0.9, 0.0, 0.9]);
        let mut battle = battle_without_items(vec![healer], boss, rng);

        battle.play_round();

        assert_eq!(round_messages(&battle, 1)[2], "No items to use");
    }

    #[test]
    fn test_dead_members_never_get_a_turn() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5).build();
        let fallen = TestCombatantBuilder::new("Bram", Archetype::Healer, 5)
            .with_hp(0.0)
            .build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(1.0)
            .build();
        let mut battle = battle_with(vec![warrior, fallen], boss, predictable_rng());

        battle.play_round();

        let messages = round_messages(&battle, 1);
        let turns: Vec<&String> = messages.iter().filter(|m| m.ends_with("'s turn:")).collect();
        assert_eq!(turns, vec!["Aria's turn:", "Gorath's turn:"]);
    }

    fn round_turns(battle: &Battle, round: u32) -> Vec<String> {
        round_messages(battle, round)
            .into_iter()
            .filter(|m| m.ends_with("'s turn:"))
            .collect()
    }

    fn rolls_then_mid(first: &[f64]) -> TurnRng {
        let mut rolls = first.to_vec();
        rolls.extend(std::iter::repeat(0.5).take(20));
        TurnRng::new_for_test(rolls)
    }

    #[test]
    fn test_slot_of_fallen_member_is_skipped_without_extra_boss_turn() {
        let aria = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_hp(1.0)
            .build();
        let bram = TestCombatantBuilder::new("Bram", Archetype::Healer, 5).build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(90.0)
            .build();
        // boss basic-attacks Aria without a crit
        let mut battle = battle_with(vec![aria, bram], boss, rolls_then_mid(&[0.9, 0.0, 0.9]));

        assert_eq!(battle.play_round(), None);

        assert!(!battle.party()[0].is_alive());
        assert_eq!(round_turns(&battle, 1), vec!["Gorath's turn:", "Bram's turn:"]);
    }

    #[test]
    fn test_every_survivor_acts_exactly_once_after_a_death() {
        let aria = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5)
            .with_agility(95.0)
            .with_hp(1.0)
            .build();
        let bram = TestCombatantBuilder::new("Bram", Archetype::Healer, 5).build();
        let cora = TestCombatantBuilder::new("Cora", Archetype::Mage, 5).build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3)
            .with_agility(90.0)
            .build();
        // Aria attacks (no crit), then the boss basic-attacks her without a crit
        let rng = rolls_then_mid(&[0.5, 0.5, 0.9, 0.0, 0.9]);
        let mut battle = battle_with(vec![aria, bram, cora], boss, rng);

        assert_eq!(battle.play_round(), None);

        let mut turns = round_turns(&battle, 1);
        assert_eq!(turns.len(), 4);
        assert_eq!(&turns[..2], &["Aria's turn:", "Gorath's turn:"]);
        turns.sort();
        turns.dedup();
        assert_eq!(turns.len(), 4);
    }

    #[test]
    fn test_turn_order_summary_ranks_by_agility() {
        let warrior = TestCombatantBuilder::new("Aria", Archetype::Warrior, 5).build();
        let mage = TestCombatantBuilder::new("Cora", Archetype::Mage, 5).build();
        let boss = TestCombatantBuilder::new("Gorath", Archetype::Boss, 3).build();
        let battle = battle_with(vec![warrior, mage], boss, predictable_rng());

        assert_eq!(
            battle.turn_order_summary(),
            vec![
                "Gorath (agility: 26)",
                "Aria (agility: 20)",
                "Cora (agility: 15)",
            ]
        );
    }
}
