//! Random bot - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline policy for simulations and conformance
//! tests. With a seed it is fully reproducible.

use parking_lot::Mutex;
use rand::prelude::*;

use super::trait_def::{BotAction, BotError, BotPlayer};
use crate::domain::player_view::VisibleGameState;
use crate::domain::{CoinKind, Color, PlayerId};

/// Bot that picks uniformly among legal moves.
///
/// Draws only when nothing is playable. Uses `Mutex<StdRng>` because the
/// trait methods take `&self`.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible decisions, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick<T: Copy>(&self, options: &[T], what: &str) -> Result<T, BotError> {
        let mut rng = self.rng.lock();
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| BotError::InvalidMove(format!("No {what} available")))
    }
}

impl BotPlayer for RandomPlayer {
    fn choose_turn(&self, view: &VisibleGameState) -> Result<BotAction, BotError> {
        if !view.is_my_turn() {
            return Err(BotError::InvalidMove("Not this bot's turn".into()));
        }
        let legal = view.legal_plays();
        if !legal.is_empty() {
            return self.pick(legal, "legal play").map(BotAction::Play);
        }
        let holding_chain = view.layering.is_some_and(|c| c.player == view.player);
        if holding_chain || (view.has_drawn && view.draw_stack == 0) {
            Ok(BotAction::EndTurn)
        } else {
            Ok(BotAction::Draw)
        }
    }

    fn choose_color(&self, view: &VisibleGameState) -> Result<Color, BotError> {
        self.pick(&view.current_side.colors(), "color")
    }

    fn choose_swap_target(&self, view: &VisibleGameState) -> Result<PlayerId, BotError> {
        let targets: Vec<PlayerId> = view.opponents.iter().map(|o| o.player).collect();
        self.pick(&targets, "swap target")
    }

    fn choose_coin_kind(&self, _view: &VisibleGameState) -> Result<CoinKind, BotError> {
        self.pick(&[CoinKind::Mercy, CoinKind::NoMercy], "coin kind")
    }

    fn wants_coin(&self, view: &VisibleGameState) -> bool {
        let ready = view.coin.is_some_and(|c| c.kind.is_some() && !c.used && !c.armed);
        ready && self.rng.lock().random_bool(0.1)
    }
}
