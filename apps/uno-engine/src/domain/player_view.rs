//! Player view of game state - what information is visible to a player.
//!
//! [`VisibleGameState`] is the single interface between the engine and bot
//! policies, and it carries everything a human UI renders for one seat.
//! Opponent hands are reduced to their sizes.

use serde::{Deserialize, Serialize};

use crate::domain::coins::Coin;
use crate::domain::game_transition::playable_for;
use crate::domain::settings::Settings;
use crate::domain::state::{Direction, GameState, LayeringChain, PendingChoice, PlayerId};
use crate::domain::{Card, Color, Side};

/// Public facts about one seated opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub player: PlayerId,
    pub hand_size: usize,
    pub called_uno: bool,
}

/// Information visible to `player` at a decision point.
///
/// Bots receive this in every decision method and must choose among
/// [`legal_plays`](Self::legal_plays) rather than re-deriving the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleGameState {
    pub player: PlayerId,
    pub hand: Vec<Card>,
    /// Opponents in turn order starting after `player`.
    pub opponents: Vec<OpponentView>,
    pub top: Option<Card>,
    pub current_color: Color,
    pub current_side: Side,
    pub direction: Direction,
    pub draw_stack: u32,
    pub turn_holder: Option<PlayerId>,
    pub pending: PendingChoice,
    pub layering: Option<LayeringChain>,
    pub has_drawn: bool,
    pub coin: Option<Coin>,
    pub deck_count: usize,
    pub discard_count: usize,
    pub podium: Vec<PlayerId>,
    pub eliminated: Vec<PlayerId>,
    pub settings: Settings,
    playable: Vec<usize>,
}

impl VisibleGameState {
    /// Snapshot of `state` as seen from `player`'s seat.
    pub fn for_player(state: &GameState, player: PlayerId) -> Self {
        let seat = state.seat_of(player);
        let n = state.players.len();
        let opponents = match seat {
            Some(seat) => (1..n)
                .map(|step| state.players[state.seat_offset(seat, step)])
                .collect::<Vec<_>>(),
            None => state.players.clone(),
        }
        .into_iter()
        .map(|p| OpponentView {
            player: p,
            hand_size: state.hands.get(&p).map_or(0, Vec::len),
            called_uno: state.uno_called.contains(&p),
        })
        .collect();

        Self {
            player,
            hand: state.hand(player).map(<[Card]>::to_vec).unwrap_or_default(),
            opponents,
            top: state.top_card().copied(),
            current_color: state.current_color,
            current_side: state.current_side,
            direction: state.direction,
            draw_stack: state.draw_stack,
            turn_holder: state.current_player(),
            pending: state.pending,
            layering: state.layering,
            has_drawn: state.turn_flags.has_drawn,
            coin: state.coins.get(&player).copied(),
            deck_count: state.deck.len(),
            discard_count: state.discard.len(),
            podium: state.podium.clone(),
            eliminated: state.eliminated(),
            settings: state.settings.clone(),
            playable: playable_for(state, player),
        }
    }

    /// Hand indices that may be played right now, in hand order.
    pub fn legal_plays(&self) -> &[usize] {
        &self.playable
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn_holder == Some(self.player)
    }

    /// The open choice, if it is ours to answer.
    pub fn my_choice(&self) -> Option<PendingChoice> {
        (self.pending.owner() == Some(self.player)).then_some(self.pending)
    }

    /// The opponent who moves right after us.
    pub fn next_opponent(&self) -> Option<PlayerId> {
        self.opponents.first().map(|o| o.player)
    }
}
