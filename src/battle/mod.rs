pub mod calculators;
pub mod engine;
pub mod snapshot;
pub mod state;
pub mod strategy;
pub mod turn_order;

#[cfg(test)]
mod tests;
