//! How to register a bot
//!
//! 1) Implement `BotPlayer` for your type in its module.
//! 2) Add a `BotFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed ⇒ same behavior.

use crate::ai::{BotPlayer, Heuristic, RandomPlayer};

/// Policy used when nothing else is configured.
pub const DEFAULT_BOT: &str = Heuristic::NAME;

/// Factory definition for constructing bot implementations.
pub struct BotFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn BotPlayer>,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
    BotFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered factory by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_heuristic(seed: Option<u64>) -> Box<dyn BotPlayer> {
    Box::new(Heuristic::new(seed))
}

fn make_random_player(seed: Option<u64>) -> Box<dyn BotPlayer> {
    Box::new(RandomPlayer::new(seed))
}
