//! Drawing: voluntary draws, penalty draws, draw-color and elimination.

use tracing::warn;

use crate::domain::coins::apply_mercy;
use crate::domain::deck::draw_one;
use crate::domain::effects::Advance;
use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::game_transition::{
    advance_turn, guard_pending, playable_for, remove_player, require_turn_holder,
};
use crate::domain::legality::can_play;
use crate::domain::rules::{DRAW_COLOR_CAP, DRAW_UNTIL_PLAYABLE_CAP, ELIMINATION_THRESHOLD};
use crate::domain::state::{require_in_progress, DepartureReason, GameState, PlayerId};
use crate::domain::{Card, Color};
use crate::errors::domain::{DomainError, ValidationKind};

/// Put cards into the discard pile beneath the top card.
pub(crate) fn bury(state: &mut GameState, cards: Vec<Card>) {
    if cards.is_empty() {
        return;
    }
    let at = state.discard.len().saturating_sub(1);
    state.discard.splice(at..at, cards);
}

fn pull(state: &mut GameState) -> Option<Card> {
    draw_one(&mut state.deck, &mut state.discard, &mut state.rng)
}

/// Draw up to `n` cards into `who`'s hand. Returns how many arrived.
///
/// Running out of both piles is not an error: the shortfall is reported
/// as an event and the game carries on.
pub(crate) fn draw_into(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    n: usize,
    reason: DrawReason,
) -> usize {
    let mut drawn = Vec::with_capacity(n);
    for _ in 0..n {
        match pull(state) {
            Some(card) => drawn.push(card),
            None => break,
        }
    }
    let got = drawn.len();
    if let Some(hand) = state.hands.get_mut(&who) {
        hand.extend(drawn);
    } else {
        bury(state, drawn);
    }
    state.uno_called.remove(&who);
    if got > 0 {
        events.push(GameEvent::CardsDrawn {
            player: who,
            count: got,
            reason,
        });
    }
    if got < n {
        warn!(player = who.0, wanted = n, got, "Deck and discard exhausted during draw");
        events.push(GameEvent::DrawShort {
            player: who,
            wanted: n,
            got,
        });
    }
    got
}

/// Knock `who` out if their hand reached the threshold.
///
/// A ready mercy coin is spent instead. Returns true when the player left
/// the turn sequence.
pub(crate) fn check_elimination(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<bool, DomainError> {
    if !state.settings.elimination || state.is_over() {
        return Ok(false);
    }
    let size = state.hands.get(&who).map_or(0, Vec::len);
    if size < ELIMINATION_THRESHOLD {
        return Ok(false);
    }
    if state.coins.get(&who).is_some_and(|c| c.mercy_ready()) {
        apply_mercy(state, events, who)?;
        events.push(GameEvent::MercySaved { player: who });
        return Ok(false);
    }
    remove_player(state, events, who, DepartureReason::Eliminated);
    Ok(true)
}

/// Draw a penalty and run the elimination check once for the batch.
pub(crate) fn penalty_draw(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    n: usize,
    reason: DrawReason,
) -> Result<bool, DomainError> {
    draw_into(state, events, who, n, reason);
    check_elimination(state, events, who)
}

/// The turn holder takes the whole outstanding stack and loses the turn.
pub(crate) fn accept_stack(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    let amount = std::mem::take(&mut state.draw_stack);
    events.push(GameEvent::DrawStackAccepted { player: who, amount });
    let eliminated = penalty_draw(state, events, who, amount as usize, DrawReason::Stack)?;
    if !eliminated {
        advance_turn(state, events, who, Advance::Next);
    }
    Ok(())
}

/// Voluntary draw by the turn holder.
pub(crate) fn draw(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    ignore_must_play: bool,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    guard_pending(state, who)?;
    require_turn_holder(state, who)?;
    if state.layering.is_some_and(|c| c.player == who) {
        return Err(DomainError::validation(
            ValidationKind::InvalidLayering,
            "Play a matching card or end the turn",
        ));
    }

    if state.draw_stack > 0 {
        return accept_stack(state, events, who);
    }
    if state.turn_flags.has_drawn {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDrew,
            "Only one draw per turn",
        ));
    }
    if state.settings.must_play && !ignore_must_play && !playable_for(state, who).is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MustPlay,
            "A playable card must be played",
        ));
    }

    if state.settings.draw_until_playable {
        return draw_until_playable(state, events, who);
    }

    draw_into(state, events, who, 1, DrawReason::Voluntary);
    if check_elimination(state, events, who)? {
        return Ok(());
    }
    if state.settings.skip_after_draw || state.settings.auto_draw {
        advance_turn(state, events, who, Advance::Next);
    } else {
        state.turn_flags.has_drawn = true;
    }
    Ok(())
}

fn draw_until_playable(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    let mut found = false;
    for _ in 0..DRAW_UNTIL_PLAYABLE_CAP {
        let Some(card) = pull(state) else {
            events.push(GameEvent::DrawShort {
                player: who,
                wanted: 1,
                got: 0,
            });
            break;
        };
        if let Some(hand) = state.hands.get_mut(&who) {
            hand.push(card);
        }
        events.push(GameEvent::CardsDrawn {
            player: who,
            count: 1,
            reason: DrawReason::UntilPlayable,
        });
        let before = state.hands.get(&who).map_or(0, Vec::len);
        if check_elimination(state, events, who)? {
            return Ok(());
        }
        if state.hands.get(&who).map_or(0, Vec::len) < before {
            // Mercy coin swapped the hand out from under the loop
            break;
        }
        let top = state.top_card().map(|c| c.face);
        if let Some(top) = top {
            if can_play(&card.face, &top, state.current_color, 0, &state.settings) {
                found = true;
                break;
            }
        }
    }
    state.uno_called.remove(&who);

    if found {
        state.turn_flags.has_drawn = true;
    } else {
        advance_turn(state, events, who, Advance::Next);
    }
    Ok(())
}

/// Resolve a draw-color: `who` names `color` and draws until it shows.
pub(crate) fn draw_for_color(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    color: Color,
) -> Result<(), DomainError> {
    state.current_color = color;
    events.push(GameEvent::ColorChosen { player: who, color });

    let mut count = 0;
    for _ in 0..DRAW_COLOR_CAP {
        let Some(card) = pull(state) else {
            events.push(GameEvent::DrawShort {
                player: who,
                wanted: 1,
                got: 0,
            });
            break;
        };
        if let Some(hand) = state.hands.get_mut(&who) {
            hand.push(card);
        }
        count += 1;
        if card.color() == Some(color) {
            break;
        }
    }
    state.uno_called.remove(&who);
    if count > 0 {
        events.push(GameEvent::CardsDrawn {
            player: who,
            count,
            reason: DrawReason::DrawColor,
        });
    }
    if !check_elimination(state, events, who)? {
        advance_turn(state, events, who, Advance::Next);
    }
    Ok(())
}

/// Automatic draw for a holder with nothing to play. Always passes the turn.
pub(crate) fn auto_draw(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    if state.draw_stack > 0 {
        return accept_stack(state, events, who);
    }
    if !penalty_draw(state, events, who, 1, DrawReason::Auto)? {
        advance_turn(state, events, who, Advance::Next);
    }
    Ok(())
}
