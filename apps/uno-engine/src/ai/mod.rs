//! Bot players - automated decisions for empty seats.
//!
//! This module provides:
//! - the [`BotPlayer`] trait every policy implements
//! - [`Heuristic`]: the default deterministic policy
//! - [`RandomPlayer`]: uniformly random legal decisions (seedable for tests)
//! - a static registry so sessions persist bots as name + seed

mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use trait_def::{BotAction, BotError, BotPlayer};

/// Create a bot by registry name.
///
/// Returns None if the name is unrecognized.
pub fn create_bot(name: &str, seed: Option<u64>) -> Option<Box<dyn BotPlayer>> {
    registry::by_name(name).map(|factory| (factory.make)(seed))
}
