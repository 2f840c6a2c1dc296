use crate::combatant::Combatant;
use crate::errors::{BattleResult, SetupError};
use schema::Archetype;
use std::str::FromStr;

/// One requested party member, written on the command line as `archetype:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    pub archetype: Archetype,
    pub name: String,
}

impl FromStr for MemberSpec {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SetupError::InvalidMemberSpec(s.to_string());
        let (archetype, name) = s.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        let archetype = Archetype::from_str(archetype.trim()).map_err(|_| invalid())?;
        Ok(Self {
            archetype,
            name: name.to_string(),
        })
    }
}

/// Parse a comma-separated roster such as `warrior:Aria,mage:Bram`.
pub fn parse_party(roster: &str) -> Result<Vec<MemberSpec>, SetupError> {
    roster
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(MemberSpec::from_str)
        .collect()
}

/// Build every requested member at the same level.
pub fn create_party(specs: &[MemberSpec], level: u32) -> BattleResult<Vec<Combatant>> {
    let party = specs
        .iter()
        .map(|spec| Combatant::new(spec.name.clone(), level, spec.archetype))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(party)
}

/// One of each party archetype, named after its class and slot.
pub fn default_party(level: u32) -> BattleResult<Vec<Combatant>> {
    let specs: Vec<MemberSpec> = [Archetype::Warrior, Archetype::Mage, Archetype::Healer]
        .into_iter()
        .enumerate()
        .map(|(i, archetype)| MemberSpec {
            archetype,
            name: format!("{}{}", archetype, i + 1),
        })
        .collect();
    create_party(&specs, level)
}

pub fn create_boss(name: impl Into<String>, level: u32) -> BattleResult<Combatant> {
    Ok(Combatant::new(name, level, Archetype::Boss)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BattleEngineError, StatError};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("warrior:Aria", Archetype::Warrior, "Aria")]
    #[case("Mage:Bram", Archetype::Mage, "Bram")]
    #[case(" healer : Cora ", Archetype::Healer, "Cora")]
    fn test_member_spec_parses(
        #[case] input: &str,
        #[case] archetype: Archetype,
        #[case] name: &str,
    ) {
        let spec: MemberSpec = input.parse().unwrap();
        assert_eq!(spec.archetype, archetype);
        assert_eq!(spec.name, name);
    }

    #[rstest]
    #[case("warrior")]
    #[case("warrior:")]
    #[case("paladin:Aria")]
    fn test_member_spec_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            input.parse::<MemberSpec>(),
            Err(SetupError::InvalidMemberSpec(input.to_string()))
        );
    }

    #[test]
    fn test_parse_party_keeps_order() {
        let specs = parse_party("mage:Bram,warrior:Aria,").unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bram", "Aria"]);
    }

    #[test]
    fn test_default_party() {
        let party = default_party(5).unwrap();
        let names: Vec<&str> = party.iter().map(Combatant::name).collect();
        assert_eq!(names, vec!["Warrior1", "Mage2", "Healer3"]);
        assert!(party.iter().all(|m| m.level() == 5));
    }

    #[test]
    fn test_create_boss_out_of_range_level() {
        let err = create_boss("Gorath", 20).unwrap_err();
        match err {
            BattleEngineError::Stat(StatError::OutOfRange { stat, .. }) => {
                assert_eq!(stat, "max_hp")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
