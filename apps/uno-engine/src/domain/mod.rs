//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
mod choices;
pub mod coins;
pub mod dealing;
pub mod deck;
mod drawing;
pub mod effects;
pub mod events;
pub mod legality;
mod play;
pub mod player_view;
pub mod rules;
pub mod settings;

pub mod game_transition;
pub mod snapshot;
pub mod state;


#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_drawing;
#[cfg(test)]
mod tests_effects_applied;
#[cfg(test)]
mod tests_play;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_turns;

// Re-exports for ergonomics
pub use actions::{
    activate_coin, apply_action, choose_color, choose_swap_target, declare_uno, draw_card,
    end_turn, force_draw, force_fold, leave, play_card, play_cards, select_coin_kind, Action,
};
pub use cards_logic::most_held_color;
pub use cards_types::{Card, CardFace, CardId, Color, ColoredKind, Side, WildKind};
pub use coins::{Coin, CoinKind};
pub use dealing::create_game;
pub use events::{ActionOutcome, DrawReason, GameEvent};
pub use game_transition::playable_for;
pub use legality::{can_play, playable_indices};
pub use player_view::VisibleGameState;
pub use settings::{Settings, Toggle, Variant};
pub use state::{EngineLimits, GameState, PendingChoice, PlayerId};
