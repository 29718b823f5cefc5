//! Bot player trait definition.

use std::fmt;

use crate::domain::player_view::VisibleGameState;
use crate::domain::{CoinKind, Color, PlayerId};
use crate::error::AppError;

/// Errors that can occur during bot decision-making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Bot encountered an internal error
    Internal(String),
    /// Bot was asked for a decision it cannot make from this view
    InvalidMove(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "Bot internal error: {msg}"),
            BotError::InvalidMove(msg) => write!(f, "Bot invalid move: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(format!("Bot error: {err}"))
    }
}

/// What a bot does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    /// Play the card at this hand index
    Play(usize),
    Draw,
    EndTurn,
}

/// Trait for bot players.
///
/// Implementations receive the view a human in the same seat would see and
/// answer through the same entry points a human uses, so every decision is
/// checked by the engine. Bots pick plays from
/// [`VisibleGameState::legal_plays`] instead of re-deriving the rules.
pub trait BotPlayer: Send + Sync {
    /// Choose the turn action.
    fn choose_turn(&self, view: &VisibleGameState) -> Result<BotAction, BotError>;

    /// Choose a color for a wild, a wild discard-all or a draw-color.
    fn choose_color(&self, view: &VisibleGameState) -> Result<Color, BotError>;

    /// Choose whose hand to take after a 7.
    fn choose_swap_target(&self, view: &VisibleGameState) -> Result<PlayerId, BotError>;

    /// Choose the coin kind (No Mercy+ only, once per game).
    fn choose_coin_kind(&self, view: &VisibleGameState) -> Result<CoinKind, BotError>;

    /// Whether to spend the selected coin before acting.
    fn wants_coin(&self, _view: &VisibleGameState) -> bool {
        false
    }

    /// Whether to call UNO before playing down to one card.
    fn calls_uno(&self, _view: &VisibleGameState) -> bool {
        true
    }
}
