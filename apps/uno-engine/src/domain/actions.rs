//! Public action surface of the engine.
//!
//! Every function here runs transactionally: on `Err` the state is exactly
//! what it was before the call, on `Ok` the returned outcome lists what
//! happened in order.

use serde::{Deserialize, Serialize};

use crate::domain::choices;
use crate::domain::coins::{self, CoinKind};
use crate::domain::drawing;
use crate::domain::events::ActionOutcome;
use crate::domain::game_transition::{self, guard_pending, transact};
use crate::domain::play;
use crate::domain::state::{require_in_progress, GameState, PendingChoice, PlayerId};
use crate::domain::{most_held_color, Color};
use crate::errors::domain::{DomainError, ValidationKind};

/// One player input, as the interaction layer or a bot submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Play { indices: Vec<usize> },
    Draw,
    EndTurn,
    DeclareUno,
    ChooseColor { color: Color },
    ChooseSwapTarget { target: PlayerId },
    SelectCoinKind { kind: CoinKind },
    ActivateCoin,
    Leave,
}

pub fn apply_action(
    state: &mut GameState,
    who: PlayerId,
    action: &Action,
) -> Result<ActionOutcome, DomainError> {
    match action {
        Action::Play { indices } => play_cards(state, who, indices),
        Action::Draw => draw_card(state, who),
        Action::EndTurn => end_turn(state, who),
        Action::DeclareUno => declare_uno(state, who),
        Action::ChooseColor { color } => choose_color(state, who, *color),
        Action::ChooseSwapTarget { target } => choose_swap_target(state, who, *target),
        Action::SelectCoinKind { kind } => select_coin_kind(state, who, *kind),
        Action::ActivateCoin => activate_coin(state, who),
        Action::Leave => leave(state, who),
    }
}

pub fn play_card(
    state: &mut GameState,
    who: PlayerId,
    index: usize,
) -> Result<ActionOutcome, DomainError> {
    play_cards(state, who, &[index])
}

/// Play several cards in one turn under the layering rules.
pub fn play_cards(
    state: &mut GameState,
    who: PlayerId,
    indices: &[usize],
) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| play::play(s, ev, who, indices))
}

pub fn draw_card(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| drawing::draw(s, ev, who, false))
}

pub fn end_turn(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| game_transition::end_turn(s, ev, who, false))
}

pub fn declare_uno(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| choices::declare_uno(s, ev, who))
}

pub fn choose_color(
    state: &mut GameState,
    who: PlayerId,
    color: Color,
) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| choices::choose_color(s, ev, who, color))
}

pub fn choose_swap_target(
    state: &mut GameState,
    who: PlayerId,
    target: PlayerId,
) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| choices::choose_swap_target(s, ev, who, target))
}

pub fn select_coin_kind(
    state: &mut GameState,
    who: PlayerId,
    kind: CoinKind,
) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| {
        require_in_progress(s)?;
        coins::select_kind(s, ev, who, kind)
    })
}

/// Spend the player's selected coin. Allowed outside the player's turn.
pub fn activate_coin(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| {
        require_in_progress(s)?;
        if let Some(owner) = s.pending.owner().filter(|o| *o != who) {
            return Err(DomainError::validation(
                ValidationKind::PendingChoiceBlocking,
                format!("Waiting for player {owner}"),
            ));
        }
        coins::activate(s, ev, who)
    })
}

pub fn leave(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| game_transition::leave(s, ev, who))
}

/// Timeout fallback: settle whatever `who` owes so the game moves on.
///
/// An open choice gets a default answer (most-held color, the next player
/// as swap target, a mercy coin). Otherwise the player draws, ignoring
/// must-play, and the turn is ended if the draw left them holding it.
pub fn force_draw(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    transact(state, |s, ev| {
        require_in_progress(s)?;
        match s.pending {
            PendingChoice::AwaitingColor { player, .. }
            | PendingChoice::AwaitingDrawColor { player, .. }
                if player == who =>
            {
                let hand = s.hand(who).unwrap_or_default();
                let color = most_held_color(hand, s.current_side.colors());
                choices::choose_color(s, ev, who, color)
            }
            PendingChoice::AwaitingSwapTarget { player } if player == who => {
                let target = s.player_after(who, 1).ok_or_else(|| {
                    DomainError::validation(ValidationKind::InvalidTarget, "No opponent to swap with")
                })?;
                choices::choose_swap_target(s, ev, who, target)
            }
            PendingChoice::AwaitingCoinKind { player } if player == who => {
                coins::select_kind(s, ev, who, CoinKind::Mercy)
            }
            _ => {
                guard_pending(s, who)?;
                game_transition::require_turn_holder(s, who)?;
                let holding_chain = s.layering.is_some_and(|c| c.player == who);
                if holding_chain || (s.turn_flags.has_drawn && s.draw_stack == 0) {
                    return game_transition::end_turn(s, ev, who, true);
                }
                drawing::draw(s, ev, who, true)?;
                let still_holding = s.current_player() == Some(who)
                    && !s.pending.is_open()
                    && s.turn_flags.has_drawn;
                if still_holding {
                    game_transition::end_turn(s, ev, who, true)?;
                }
                Ok(())
            }
        }
    })
}

/// Timeout fallback for a player who should be removed outright.
pub fn force_fold(state: &mut GameState, who: PlayerId) -> Result<ActionOutcome, DomainError> {
    leave(state, who)
}
