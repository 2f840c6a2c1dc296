//! Range-checked numeric stats.
//!
//! Every numeric field on a combatant is a [`BoundedStat`]: a value paired with
//! the closed range it must stay inside. Assignment outside that range is a
//! [`StatError`], which is a data/programming fault rather than a game event.

use crate::errors::{StatError, StatResult};

/// A closed `[min, max]` range for one named stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBounds {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl StatBounds {
    pub const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const HP: StatBounds = StatBounds::new("hp", 0.0, 1000.0);
pub const MAX_HP: StatBounds = StatBounds::new("max_hp", 1.0, 1000.0);
pub const MP: StatBounds = StatBounds::new("mp", 0.0, 500.0);
pub const MAX_MP: StatBounds = StatBounds::new("max_mp", 0.0, 500.0);
pub const STRENGTH: StatBounds = StatBounds::new("strength", 1.0, 100.0);
pub const AGILITY: StatBounds = StatBounds::new("agility", 1.0, 100.0);
pub const INTELLECT: StatBounds = StatBounds::new("intellect", 1.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedStat {
    value: f64,
    bounds: StatBounds,
}

impl BoundedStat {
    pub fn new(value: f64, bounds: StatBounds) -> StatResult<Self> {
        check(value, bounds)?;
        Ok(Self { value, bounds })
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> StatBounds {
        self.bounds
    }

    /// Assign a value pulled into range first. Used by damage and healing,
    /// which clamp rather than fail.
    pub fn set_clamped(&mut self, value: f64) {
        self.value = value.clamp(self.bounds.min, self.bounds.max);
    }

    /// Assign a new value, leaving the old one in place if the new one is out of range.
    pub fn set(&mut self, value: f64) -> StatResult<()> {
        check(value, self.bounds)?;
        self.value = value;
        Ok(())
    }
}

fn check(value: f64, bounds: StatBounds) -> StatResult<()> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(StatError::OutOfRange {
            stat: bounds.name,
            value,
            min: bounds.min,
            max: bounds.max,
        })
    }
}
