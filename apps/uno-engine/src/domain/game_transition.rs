//! Turn progression, departures, game end and the transactional action wrapper.

use tracing::debug;

use crate::domain::coins::needs_selection;
use crate::domain::drawing::{auto_draw, bury};
use crate::domain::effects::Advance;
use crate::domain::events::{ActionOutcome, GameEvent};
use crate::domain::legality::{can_play, chains_onto};
use crate::domain::state::{
    require_in_progress, Departure, DepartureReason, Direction, GameState, GameStatus,
    PendingChoice, PlayerId, TurnFlags,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Run `f` against a copy of the state and commit only on success.
///
/// Every public entry point goes through here, so a rejection can never
/// leave a half-applied action behind.
pub(crate) fn transact<F>(state: &mut GameState, f: F) -> Result<ActionOutcome, DomainError>
where
    F: FnOnce(&mut GameState, &mut Vec<GameEvent>) -> Result<(), DomainError>,
{
    let mut next = state.clone();
    let mut events = Vec::new();
    f(&mut next, &mut events)?;
    settle(&mut next, &mut events)?;
    *state = next;
    Ok(ActionOutcome::new(events))
}

/// Reject the action if a choice is open that `who` is not answering.
pub(crate) fn guard_pending(state: &GameState, who: PlayerId) -> Result<(), DomainError> {
    match state.pending.owner() {
        None => Ok(()),
        Some(owner) if owner == who => Err(DomainError::validation(
            ValidationKind::ChoiceRequired,
            "Answer the open choice first",
        )),
        Some(owner) => Err(DomainError::validation(
            ValidationKind::PendingChoiceBlocking,
            format!("Waiting for player {owner}"),
        )),
    }
}

pub(crate) fn require_turn_holder(state: &GameState, who: PlayerId) -> Result<(), DomainError> {
    if !state.is_active(who) {
        return Err(DomainError::validation(
            ValidationKind::NotInGame,
            format!("Player {who} is not seated"),
        ));
    }
    if state.current_player() != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            "It is not your turn",
        ));
    }
    Ok(())
}

/// Hand indices `who` may play right now, in hand order.
///
/// Covers the turn holder (including a layering chain) and jump-in
/// candidates for everyone else.
pub fn playable_for(state: &GameState, who: PlayerId) -> Vec<usize> {
    if state.is_over() || state.pending.is_open() {
        return Vec::new();
    }
    let (Some(hand), Some(top)) = (state.hands.get(&who), state.top_card()) else {
        return Vec::new();
    };
    let top = top.face;

    if state.current_player() == Some(who) {
        if let Some(chain) = state.layering.filter(|c| c.player == who) {
            return hand
                .iter()
                .enumerate()
                .filter(|(_, c)| {
                    chains_onto(&c.face, &chain.face, state.draw_stack, &state.settings)
                })
                .map(|(i, _)| i)
                .collect();
        }
        return hand
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                can_play(
                    &c.face,
                    &top,
                    state.current_color,
                    state.draw_stack,
                    &state.settings,
                )
            })
            .map(|(i, _)| i)
            .collect();
    }

    if !state.settings.jump_in || state.layering.is_some() {
        return Vec::new();
    }
    hand.iter()
        .enumerate()
        .filter(|(_, c)| is_jump_in(state, &c.face))
        .map(|(i, _)| i)
        .collect()
}

/// Exact non-wild duplicate of the top that also respects the draw stack.
pub(crate) fn is_jump_in(state: &GameState, face: &crate::domain::CardFace) -> bool {
    let Some(top) = state.top_card() else {
        return false;
    };
    !face.is_wild()
        && *face == top.face
        && can_play(
            face,
            &top.face,
            state.current_color,
            state.draw_stack,
            &state.settings,
        )
}

fn begin_turn(state: &mut GameState, seat: usize) {
    state.turn = seat;
    state.turn_flags = TurnFlags::default();
    state.layering = None;
}

/// Move the turn on from `from` (who must still be seated).
pub(crate) fn advance_turn(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    from: PlayerId,
    advance: Advance,
) {
    let Some(seat) = state.seat_of(from) else {
        return;
    };
    let target = match advance {
        Advance::Hold => seat,
        Advance::Next => state.seat_offset(seat, 1),
        Advance::SkipNext => {
            let skipped = state.seat_offset(seat, 1);
            if let Some(p) = state.players.get(skipped).copied() {
                events.push(GameEvent::Skipped { player: p });
            }
            state.seat_offset(seat, 2)
        }
    };
    begin_turn(state, target);
    if let Some(p) = state.players.get(target).copied() {
        events.push(GameEvent::TurnChanged { player: p });
    }
}

/// Take `who` out of the turn sequence, folding their hand into the discard.
pub(crate) fn remove_player(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    reason: DepartureReason,
) {
    let Some(seat) = state.seat_of(who) else {
        return;
    };
    let was_turn = seat == state.turn;
    let hand = state.hands.remove(&who).unwrap_or_default();
    bury(state, hand);
    state.players.remove(seat);
    state.uno_called.remove(&who);
    state.departures.push(Departure { player: who, reason });
    events.push(match reason {
        DepartureReason::Eliminated => GameEvent::PlayerEliminated { player: who },
        DepartureReason::Left => GameEvent::PlayerLeft { player: who },
    });
    debug!(player = who.0, ?reason, remaining = state.players.len(), "Player left the sequence");

    relocate_turn(state, events, seat, was_turn, who);
    if let [survivor] = state.players[..] {
        finish_game(state, events, survivor);
    }
}

/// Keep the turn pointer valid after the seat at `seat` disappeared.
fn relocate_turn(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    seat: usize,
    was_turn: bool,
    who: PlayerId,
) {
    let n = state.players.len();
    if n == 0 {
        state.turn = 0;
        return;
    }
    if state.pending.owner() == Some(who) {
        state.pending = PendingChoice::None;
    }
    if was_turn {
        // The seat now holds the clockwise successor
        let successor = match state.direction {
            Direction::Clockwise => seat % n,
            Direction::CounterClockwise => (seat as isize - 1).rem_euclid(n as isize) as usize,
        };
        begin_turn(state, successor);
        if n > 1 {
            events.push(GameEvent::TurnChanged {
                player: state.players[successor],
            });
        }
    } else if seat < state.turn {
        state.turn -= 1;
    }
}

/// `who` emptied their hand.
///
/// Single-winner games end here. Otherwise the player takes the next podium
/// place and the turn moves on as `advance` says.
pub(crate) fn finish_player(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    advance: Advance,
) {
    if state.settings.first_win {
        state.podium.push(who);
        events.push(GameEvent::PlayerFinished {
            player: who,
            place: state.podium.len(),
        });
        finish_game(state, events, who);
        return;
    }

    let Some(seat) = state.seat_of(who) else {
        return;
    };
    let steps = match advance {
        Advance::SkipNext => 2,
        Advance::Hold | Advance::Next => 1,
    };
    let target = state.players[state.seat_offset(seat, steps)];
    let target = if target == who {
        state.players[state.seat_offset(seat, 1)]
    } else {
        target
    };

    state.hands.remove(&who);
    state.players.remove(seat);
    state.uno_called.remove(&who);
    state.layering = None;
    state.podium.push(who);
    events.push(GameEvent::PlayerFinished {
        player: who,
        place: state.podium.len(),
    });

    if state.players.len() <= 1 {
        let winner = state.podium[0];
        finish_game(state, events, winner);
        return;
    }
    if let Some(target_seat) = state.seat_of(target) {
        begin_turn(state, target_seat);
        events.push(GameEvent::TurnChanged { player: target });
    }
}

pub(crate) fn finish_game(state: &mut GameState, events: &mut Vec<GameEvent>, winner: PlayerId) {
    if state.is_over() {
        return;
    }
    state.status = GameStatus::Finished { winner };
    state.pending = PendingChoice::None;
    state.layering = None;
    let standings = state.standings();
    events.push(GameEvent::GameOver { winner, standings });
}

/// Post-action housekeeping: coin-kind prompts and automatic draws.
pub(crate) fn settle(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), DomainError> {
    let mut chain = 0usize;
    loop {
        if state.is_over() || state.pending.is_open() {
            return Ok(());
        }
        let Some(current) = state.current_player() else {
            return Ok(());
        };
        if needs_selection(state, current) {
            state.pending = PendingChoice::AwaitingCoinKind { player: current };
            events.push(GameEvent::ChoiceRequested {
                choice: state.pending,
            });
            return Ok(());
        }
        if !state.settings.auto_draw
            || state.layering.is_some()
            || state.turn_flags.has_drawn
            || !playable_for(state, current).is_empty()
        {
            return Ok(());
        }
        if chain >= state.limits.auto_draw_chain {
            debug!(player = current.0, chain, "Automatic draw chain hit its bound");
            events.push(GameEvent::Stalled { player: current });
            return Ok(());
        }
        chain += 1;
        auto_draw(state, events, current)?;
    }
}

/// End a turn the player is still holding after a draw or a layering play.
pub(crate) fn end_turn(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    ignore_must_play: bool,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    guard_pending(state, who)?;
    require_turn_holder(state, who)?;

    if let Some(chain) = state.layering.filter(|c| c.player == who) {
        advance_turn(state, events, who, chain.advance);
        return Ok(());
    }
    if !state.turn_flags.has_drawn {
        return Err(DomainError::validation(
            ValidationKind::CannotEndTurn,
            "Play or draw before ending the turn",
        ));
    }
    if state.settings.must_play && !ignore_must_play && !playable_for(state, who).is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MustPlay,
            "A playable card must be played",
        ));
    }
    advance_turn(state, events, who, Advance::Next);
    Ok(())
}

/// Voluntary departure mid-game.
pub(crate) fn leave(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    if !state.is_active(who) {
        return Err(DomainError::validation(
            ValidationKind::NotInGame,
            format!("Player {who} is not seated"),
        ));
    }
    // A victim walking away from a draw-color still forfeits the draw
    remove_player(state, events, who, DepartureReason::Left);
    Ok(())
}
