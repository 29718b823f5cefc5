//! Heuristic: the default deterministic bot.
//!
//! Play: among the legal cards, prefer a plain color match, then a value
//! match, then a colored action card, and keep wilds for last. Ties go to
//! hand order. With nothing legal it draws, and ends the turn if it already
//! drew.
//!
//! Choices: the most-held color of the showing side, the opponent with the
//! fewest cards as swap target, and the mercy coin, spent once the hand
//! gets dangerously large.

use crate::ai::{BotAction, BotError, BotPlayer};
use crate::domain::player_view::VisibleGameState;
use crate::domain::{most_held_color, Card, CoinKind, Color, PlayerId};

/// Hand size at which a mercy coin is cashed in.
const MERCY_AT: usize = 16;

#[derive(Clone)]
pub struct Heuristic {
    _seed: Option<u64>, // reserved, decisions are fully deterministic
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self { _seed: seed }
    }

    /// Lower is better.
    fn rank(card: &Card, view: &VisibleGameState) -> u8 {
        if card.is_wild() {
            return 3;
        }
        if !card.face.is_number() {
            return 2;
        }
        if card.color() == Some(view.current_color) {
            0
        } else {
            1
        }
    }
}

impl BotPlayer for Heuristic {
    fn choose_turn(&self, view: &VisibleGameState) -> Result<BotAction, BotError> {
        if !view.is_my_turn() {
            return Err(BotError::InvalidMove("Not this bot's turn".into()));
        }
        let best = view
            .legal_plays()
            .iter()
            .filter_map(|&i| view.hand.get(i).map(|c| (Self::rank(c, view), i)))
            .min();
        if let Some((_, index)) = best {
            return Ok(BotAction::Play(index));
        }

        let holding_chain = view.layering.is_some_and(|c| c.player == view.player);
        if holding_chain || (view.has_drawn && view.draw_stack == 0) {
            Ok(BotAction::EndTurn)
        } else {
            Ok(BotAction::Draw)
        }
    }

    fn choose_color(&self, view: &VisibleGameState) -> Result<Color, BotError> {
        Ok(most_held_color(&view.hand, view.current_side.colors()))
    }

    fn choose_swap_target(&self, view: &VisibleGameState) -> Result<PlayerId, BotError> {
        view.opponents
            .iter()
            .min_by_key(|o| o.hand_size)
            .map(|o| o.player)
            .ok_or_else(|| BotError::InvalidMove("No opponent to swap with".into()))
    }

    fn choose_coin_kind(&self, _view: &VisibleGameState) -> Result<CoinKind, BotError> {
        Ok(CoinKind::Mercy)
    }

    fn wants_coin(&self, view: &VisibleGameState) -> bool {
        let Some(coin) = view.coin.filter(|c| !c.used) else {
            return false;
        };
        match coin.kind {
            Some(CoinKind::Mercy) => view.hand.len() >= MERCY_AT,
            Some(CoinKind::NoMercy) => {
                view.is_my_turn()
                    && view
                        .legal_plays()
                        .iter()
                        .any(|&i| view.hand.get(i).is_some_and(|c| c.face.is_draw()))
            }
            None => false,
        }
    }
}
