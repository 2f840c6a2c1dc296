// Boss Raid Schema - Shared data tables
// This crate holds the static enums and stat tables that both the battle
// engine and the command-line driver read from. Nothing in here carries
// battle state.

pub use archetypes::*;
pub use item_data::*;
pub use skill_data::*;

pub mod archetypes;
pub mod item_data;
pub mod skill_data;
