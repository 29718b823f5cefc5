//! Card effects as data, and the precedence that turns them into a turn advance.
//!
//! Nothing here mutates the game: the state machine applies the result.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{PLAY_AGAIN_NUMBER, ROTATE_NUMBER, SWAP_NUMBER};
use crate::domain::state::GameState;
use crate::domain::{Card, CardFace, Color, ColoredKind, WildKind};

/// How the turn pointer moves once a play settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// The player keeps the turn.
    Hold,
    Next,
    SkipNext,
}

/// Discard-all target: fixed by a colored card, chosen for the wild one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardAll {
    Color(Color),
    Chosen,
}

/// Consequences of one played card (or one layered play).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectSet {
    pub skip_next: bool,
    pub skip_everyone: bool,
    pub reverse: bool,
    pub draw_penalty: u32,
    pub rotate_hands: bool,
    pub swap_hands: bool,
    pub discard_all: Option<DiscardAll>,
    pub draw_color: bool,
    pub final_attack: bool,
    pub sudden_death: bool,
    pub play_again: bool,
    pub flip: bool,
    /// The player owes a color choice.
    pub needs_color: bool,
}

impl EffectSet {
    /// Fold the next card of a layered play into this set.
    ///
    /// Penalties accumulate and a flip triggers once; the last card decides
    /// every turn-shaping effect.
    pub fn layer(self, next: EffectSet) -> EffectSet {
        EffectSet {
            draw_penalty: self.draw_penalty + next.draw_penalty,
            flip: self.flip || next.flip,
            ..next
        }
    }
}

/// Effects of `card`, already on the discard pile, given the game around it.
pub fn resolve_effects(card: &Card, state: &GameState) -> EffectSet {
    resolve_face(&card.face, state)
}

fn resolve_face(face: &CardFace, state: &GameState) -> EffectSet {
    let seven_zero = state.settings.seven_zero;
    let mut fx = EffectSet::default();
    match *face {
        CardFace::Colored { color, kind } => match kind {
            ColoredKind::Number(n) if n == PLAY_AGAIN_NUMBER => fx.play_again = true,
            ColoredKind::Number(n) if seven_zero && n == SWAP_NUMBER => fx.swap_hands = true,
            ColoredKind::Number(n) if seven_zero && n == ROTATE_NUMBER => fx.rotate_hands = true,
            ColoredKind::Number(_) => {}
            ColoredKind::Skip => fx.skip_next = true,
            ColoredKind::SkipEveryone => fx.skip_everyone = true,
            ColoredKind::Reverse => fx.reverse = true,
            ColoredKind::Draw(n) => fx.draw_penalty = u32::from(n),
            ColoredKind::DiscardAll => fx.discard_all = Some(DiscardAll::Color(color)),
            ColoredKind::Flip => fx.flip = true,
        },
        CardFace::Wild(kind) => {
            fx.needs_color = true;
            match kind {
                WildKind::Plain => {}
                WildKind::Draw(n) => fx.draw_penalty = u32::from(n),
                WildKind::ReverseDraw(n) => {
                    fx.draw_penalty = u32::from(n);
                    fx.reverse = true;
                }
                WildKind::DrawColor | WildKind::ColorRoulette => {
                    // The victim names the color, not the player
                    fx.needs_color = false;
                    fx.draw_color = true;
                }
                WildKind::Flip => fx.flip = true,
                WildKind::DiscardAll => {
                    fx.needs_color = false;
                    fx.discard_all = Some(DiscardAll::Chosen);
                }
                WildKind::FinalAttack => fx.final_attack = true,
                WildKind::SuddenDeath => fx.sudden_death = true,
            }
        }
    }
    fx
}

/// Turn advance for a settled play, highest precedence first:
/// play-again / two-player reverse, skip-everyone, layering continuation,
/// skip, then the ordinary single step.
///
/// A two-player reverse that also carries a draw penalty passes the turn,
/// otherwise the player would owe their own stack.
pub fn turn_advance(fx: &EffectSet, players: usize, can_layer: bool) -> Advance {
    let two_player_reverse = fx.reverse && players == 2 && fx.draw_penalty == 0;
    if fx.play_again || two_player_reverse || fx.skip_everyone {
        return Advance::Hold;
    }
    if can_layer {
        return Advance::Hold;
    }
    if fx.skip_next {
        return Advance::SkipNext;
    }
    Advance::Next
}

/// The advance a layering chain resolves to when it ends.
pub fn chain_end_advance(fx: &EffectSet, players: usize) -> Advance {
    turn_advance(fx, players, false)
}
