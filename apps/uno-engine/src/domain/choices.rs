//! Answers to open choices, plus the UNO declaration.

use crate::domain::drawing::{draw_for_color, penalty_draw};
use crate::domain::effects::{resolve_effects, Advance};
use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::game_transition::{advance_turn, finish_player, guard_pending};
use crate::domain::play::{conclude_play, discard_color, swap_hands};
use crate::domain::state::{
    require_hand, require_in_progress, require_top, ColorPurpose, GameState, PendingChoice,
    PlayerId,
};
use crate::domain::Color;
use crate::errors::domain::{DomainError, ValidationKind};

fn wrong_choice(state: &GameState, who: PlayerId, expected: &str) -> DomainError {
    match state.pending.owner() {
        Some(owner) if owner != who => DomainError::validation(
            ValidationKind::PendingChoiceBlocking,
            format!("Waiting for player {owner}"),
        ),
        _ => DomainError::validation(
            ValidationKind::NoPendingChoice,
            format!("No {expected} choice is open for you"),
        ),
    }
}

fn require_side_color(state: &GameState, color: Color) -> Result<(), DomainError> {
    if color.side() != state.current_side {
        return Err(DomainError::validation(
            ValidationKind::IllegalCard,
            format!("{color:?} is not a color of the {:?} side", state.current_side),
        ));
    }
    Ok(())
}

pub(crate) fn choose_color(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    color: Color,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    match state.pending {
        PendingChoice::AwaitingColor { player, purpose } if player == who => {
            require_side_color(state, color)?;
            state.pending = PendingChoice::None;
            state.current_color = color;
            events.push(GameEvent::ColorChosen { player: who, color });
            match purpose {
                ColorPurpose::Wild { advance } => advance_turn(state, events, who, advance),
                ColorPurpose::DiscardAll => {
                    discard_color(state, events, who, color)?;
                    if require_hand(state, who)?.is_empty() {
                        finish_player(state, events, who, Advance::Next);
                    } else {
                        advance_turn(state, events, who, Advance::Next);
                    }
                }
            }
            Ok(())
        }
        PendingChoice::AwaitingDrawColor { player, .. } if player == who => {
            require_side_color(state, color)?;
            state.pending = PendingChoice::None;
            draw_for_color(state, events, who, color)
        }
        _ => Err(wrong_choice(state, who, "color")),
    }
}

pub(crate) fn choose_swap_target(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    target: PlayerId,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    if state.pending != (PendingChoice::AwaitingSwapTarget { player: who }) {
        return Err(wrong_choice(state, who, "swap target"));
    }
    if target == who || !state.is_active(target) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            format!("Player {target} is not an active opponent"),
        ));
    }

    state.pending = PendingChoice::None;
    swap_hands(state, who, target);
    events.push(GameEvent::HandsSwapped {
        player: who,
        target,
    });

    let top = require_top(state)?;
    let fx = resolve_effects(&top, state);
    if require_hand(state, who)?.is_empty() {
        finish_player(state, events, who, Advance::Next);
        return Ok(());
    }
    conclude_play(state, events, who, &fx, top.face);
    Ok(())
}

/// Call UNO ahead of the second-to-last play.
pub(crate) fn declare_uno(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    guard_pending(state, who)?;
    let size = require_hand(state, who)?.len();
    if !state.settings.uno_callout {
        return Ok(());
    }
    match size {
        0 => Ok(()),
        1 => Err(DomainError::validation(
            ValidationKind::UnoTooLate,
            "UNO must be called while holding two cards",
        )),
        2 => {
            if state.uno_called.insert(who) {
                events.push(GameEvent::UnoDeclared { player: who });
            }
            Ok(())
        }
        _ => {
            events.push(GameEvent::FalseUno { player: who });
            let amount = usize::from(state.settings.penalty_false_uno);
            penalty_draw(state, events, who, amount, DrawReason::FalseUno)?;
            Ok(())
        }
    }
}
