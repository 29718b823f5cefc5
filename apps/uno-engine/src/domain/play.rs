//! Playing cards: validation, jump-in, layering and effect application.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::coins::scale_penalty;
use crate::domain::drawing::{accept_stack, bury, penalty_draw};
use crate::domain::effects::{
    chain_end_advance, resolve_effects, turn_advance, Advance, DiscardAll, EffectSet,
};
use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::game_transition::{advance_turn, finish_player, guard_pending, is_jump_in};
use crate::domain::legality::{can_play, chains_onto, layers_onto};
use crate::domain::rules::{
    FINAL_ATTACK_NEXT_DRAW, FINAL_ATTACK_OTHERS_DRAW, FINAL_ATTACK_THRESHOLD,
    SUDDEN_DEATH_HAND_SIZE,
};
use crate::domain::state::{
    require_hand, require_hand_mut, require_in_progress, ColorPurpose, Direction, GameState,
    LayeringChain, PendingChoice, PlayerId, TurnFlags,
};
use crate::domain::{Card, CardFace, Color};
use crate::errors::domain::{DomainError, ValidationKind};

/// Play the cards at `indices` (in that order) from `who`'s hand.
pub(crate) fn play(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    indices: &[usize],
) -> Result<(), DomainError> {
    require_in_progress(state)?;
    guard_pending(state, who)?;
    let hand = require_hand(state, who)?;
    let hand_size = hand.len();
    let cards = pick_cards(hand, indices)?;

    let jumping = state.current_player() != Some(who);
    if jumping {
        check_jump_in(state, &cards)?;
    } else {
        check_turn_play(state, who, &cards)?;
    }
    if cards.len() > 1 {
        check_layered_play(state, &cards)?;
    }

    if jumping {
        seize_turn(state, events, who);
    }

    if missed_uno_call(state, who, hand_size, cards.len()) {
        return undo_for_callout(state, events, who, cards[0]);
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let hand = require_hand_mut(state, who)?;
    for i in sorted {
        hand.remove(i);
    }
    for card in &cards {
        state.discard.push(*card);
        events.push(GameEvent::CardPlayed {
            player: who,
            card: *card,
        });
    }
    let last = cards[cards.len() - 1];
    if let Some(color) = last.color() {
        state.current_color = color;
    }

    let fx = cards
        .iter()
        .map(|c| resolve_effects(c, state))
        .reduce(EffectSet::layer)
        .unwrap_or_default();
    debug!(player = who.0, cards = cards.len(), ?fx, "Cards played");

    apply_effects(state, events, who, &fx, last.face)
}

fn pick_cards(hand: &[Card], indices: &[usize]) -> Result<Vec<Card>, DomainError> {
    if indices.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidCardIndex,
            "No card selected",
        ));
    }
    let unique: BTreeSet<_> = indices.iter().collect();
    if unique.len() != indices.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidCardIndex,
            "A card cannot be played twice",
        ));
    }
    indices
        .iter()
        .map(|&i| {
            hand.get(i).copied().ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidCardIndex,
                    format!("Card index {i} is out of range for a hand of {}", hand.len()),
                )
            })
        })
        .collect()
}

fn check_turn_play(state: &GameState, who: PlayerId, cards: &[Card]) -> Result<(), DomainError> {
    if let Some(chain) = state.layering.filter(|c| c.player == who) {
        if cards
            .iter()
            .all(|c| chains_onto(&c.face, &chain.face, state.draw_stack, &state.settings))
        {
            return Ok(());
        }
        let detail = if state.draw_stack > 0 {
            format!("Only draw cards matching {} can follow an open draw stack", chain.face)
        } else {
            format!("Only cards matching {} can be layered", chain.face)
        };
        return Err(DomainError::validation(ValidationKind::InvalidLayering, detail));
    }

    let top = state.top_card().map(|c| c.face).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: discard pile is empty")
    })?;
    let first = &cards[0].face;
    if !can_play(first, &top, state.current_color, state.draw_stack, &state.settings) {
        return Err(DomainError::validation(
            ValidationKind::IllegalCard,
            format!("{first} cannot be played on {top}"),
        ));
    }
    Ok(())
}

fn check_jump_in(state: &GameState, cards: &[Card]) -> Result<(), DomainError> {
    let allowed = state.settings.jump_in
        && state.layering.is_none()
        && cards.len() == 1
        && is_jump_in(state, &cards[0].face);
    if allowed {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            "It is not your turn",
        ))
    }
}

/// All non-wild, all sharing the first card's color or value per the
/// enabled layering rules.
fn check_layered_play(state: &GameState, cards: &[Card]) -> Result<(), DomainError> {
    if !state.settings.layering() {
        return Err(DomainError::validation(
            ValidationKind::InvalidLayering,
            "Multi-card plays need a layering rule",
        ));
    }
    let first = &cards[0].face;
    let matches = cards
        .iter()
        .all(|c| !c.is_wild() && (c.face == *first || layers_onto(&c.face, first, &state.settings)));
    if !matches {
        return Err(DomainError::validation(
            ValidationKind::InvalidLayering,
            "Every layered card must share the first card's color or value",
        ));
    }
    // Once a stack is open, every later card must keep it counterable
    let mut stack_open = state.draw_stack > 0;
    for card in cards {
        if stack_open && !card.face.is_draw() {
            return Err(DomainError::validation(
                ValidationKind::InvalidLayering,
                "Only draw cards can be layered onto an open draw stack",
            ));
        }
        stack_open |= card.face.is_draw();
    }
    Ok(())
}

fn seize_turn(state: &mut GameState, events: &mut Vec<GameEvent>, who: PlayerId) {
    if let Some(seat) = state.seat_of(who) {
        state.turn = seat;
        state.turn_flags = TurnFlags::default();
        state.layering = None;
        events.push(GameEvent::JumpedIn { player: who });
    }
}

fn missed_uno_call(state: &GameState, who: PlayerId, hand_size: usize, playing: usize) -> bool {
    state.settings.uno_callout
        && playing == 1
        && hand_size == 2
        && !state.uno_called.contains(&who)
}

/// The card stays in hand; the player draws the penalty and loses the turn.
///
/// A counter that was taken back leaves the open stack with the player who
/// owed it.
fn undo_for_callout(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    card: Card,
) -> Result<(), DomainError> {
    events.push(GameEvent::UnoPenalty { player: who, card });
    let amount = usize::from(state.settings.penalty_cards);
    if penalty_draw(state, events, who, amount, DrawReason::UnoPenalty)? {
        return Ok(());
    }
    if state.draw_stack > 0 {
        return accept_stack(state, events, who);
    }
    advance_turn(state, events, who, Advance::Next);
    Ok(())
}

fn apply_effects(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    fx: &EffectSet,
    last: CardFace,
) -> Result<(), DomainError> {
    if fx.draw_penalty > 0 {
        let amount = scale_penalty(state, events, who, fx.draw_penalty);
        state.draw_stack += amount;
        events.push(GameEvent::DrawStackRaised {
            amount,
            total: state.draw_stack,
        });
    }
    if fx.reverse && (state.players.len() > 2 || fx.draw_penalty > 0) {
        state.direction = state.direction.reversed();
        events.push(GameEvent::DirectionChanged {
            direction: state.direction,
        });
    }
    if let Some(DiscardAll::Color(color)) = fx.discard_all {
        discard_color(state, events, who, color)?;
    }
    if fx.flip {
        flip_everything(state, events);
    }
    if fx.skip_everyone {
        events.push(GameEvent::EveryoneSkipped { player: who });
    }

    if require_hand(state, who)?.is_empty() {
        let advance = turn_advance(fx, state.players.len(), false);
        finish_player(state, events, who, advance);
        if fx.draw_color && !state.is_over() {
            if let Some(victim) = state.current_player() {
                open_draw_color(state, events, victim, who);
            }
        }
        return Ok(());
    }

    if fx.final_attack {
        final_attack(state, events, who)?;
    }
    if fx.sudden_death {
        sudden_death(state, events)?;
    }
    if state.is_over() {
        return Ok(());
    }
    if fx.rotate_hands {
        rotate_hands(state, events);
    }

    if fx.swap_hands {
        open_choice(state, events, PendingChoice::AwaitingSwapTarget { player: who });
        return Ok(());
    }
    if fx.discard_all == Some(DiscardAll::Chosen) {
        open_choice(
            state,
            events,
            PendingChoice::AwaitingColor {
                player: who,
                purpose: ColorPurpose::DiscardAll,
            },
        );
        return Ok(());
    }
    if fx.draw_color {
        advance_turn(state, events, who, Advance::Next);
        if let Some(victim) = state.current_player() {
            open_draw_color(state, events, victim, who);
        }
        return Ok(());
    }
    if fx.needs_color {
        let advance = turn_advance(fx, state.players.len(), false);
        open_choice(
            state,
            events,
            PendingChoice::AwaitingColor {
                player: who,
                purpose: ColorPurpose::Wild { advance },
            },
        );
        return Ok(());
    }

    conclude_play(state, events, who, fx, last);
    Ok(())
}

fn open_choice(state: &mut GameState, events: &mut Vec<GameEvent>, choice: PendingChoice) {
    state.pending = choice;
    events.push(GameEvent::ChoiceRequested { choice });
}

fn open_draw_color(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    victim: PlayerId,
    initiator: PlayerId,
) {
    open_choice(
        state,
        events,
        PendingChoice::AwaitingDrawColor {
            player: victim,
            initiator,
        },
    );
}

/// Move the turn on, or hold it for a layering chain when the hand allows one.
pub(crate) fn conclude_play(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    fx: &EffectSet,
    last: CardFace,
) {
    let players = state.players.len();
    let advance = chain_end_advance(fx, players);
    let can_layer = state.settings.layering()
        && state
            .hands
            .get(&who)
            .is_some_and(|h| {
                h.iter()
                    .any(|c| chains_onto(&c.face, &last, state.draw_stack, &state.settings))
            });

    if advance != Advance::Hold && turn_advance(fx, players, can_layer) == Advance::Hold {
        state.layering = Some(LayeringChain {
            player: who,
            face: last,
            advance,
        });
        events.push(GameEvent::LayeringAvailable { player: who });
        return;
    }
    advance_turn(state, events, who, advance);
}

/// Shed every `color` card from `who`'s hand beneath the top card.
pub(crate) fn discard_color(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    color: Color,
) -> Result<(), DomainError> {
    let hand = require_hand_mut(state, who)?;
    let (shed, keep): (Vec<Card>, Vec<Card>) =
        hand.drain(..).partition(|c| c.color() == Some(color));
    *hand = keep;
    if shed.is_empty() {
        return Ok(());
    }
    events.push(GameEvent::CardsDiscarded {
        player: who,
        cards: shed.clone(),
    });
    bury(state, shed);
    Ok(())
}

/// Turn every card in play to its other face.
fn flip_everything(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        hands,
        deck,
        discard,
        pairing,
        ..
    } = state;
    for card in hands
        .values_mut()
        .flat_map(|h| h.iter_mut())
        .chain(deck.iter_mut())
        .chain(discard.iter_mut())
    {
        *card = pairing.flip(card);
    }
    state.current_side = state.current_side.opposite();
    state.current_color = state
        .top_card()
        .and_then(Card::color)
        .unwrap_or_else(|| state.current_color.flipped());
    events.push(GameEvent::Flipped {
        side: state.current_side,
    });
}

/// Every hand moves one seat along the play direction, all at once.
fn rotate_hands(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let order = &state.players;
    let n = order.len();
    let rotated: BTreeMap<PlayerId, Vec<Card>> = order
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let from = match state.direction {
                Direction::Clockwise => (i + n - 1) % n,
                Direction::CounterClockwise => (i + 1) % n,
            };
            let hand = state.hands.get(&order[from]).cloned().unwrap_or_default();
            (*p, hand)
        })
        .collect();
    state.hands = rotated;
    state.uno_called.clear();
    events.push(GameEvent::HandsRotated {
        direction: state.direction,
    });
}

/// Exchange two hands in full.
pub(crate) fn swap_hands(state: &mut GameState, a: PlayerId, b: PlayerId) {
    let left = state.hands.remove(&a).unwrap_or_default();
    let right = state.hands.remove(&b).unwrap_or_default();
    state.hands.insert(a, right);
    state.hands.insert(b, left);
    state.uno_called.remove(&a);
    state.uno_called.remove(&b);
}

fn final_attack(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    let action_cards = state
        .hands
        .get(&who)
        .map_or(0, |h| h.iter().filter(|c| !c.face.is_number()).count());
    events.push(GameEvent::FinalAttack {
        player: who,
        action_cards,
    });
    let Some(next) = state.player_after(who, 1).filter(|p| *p != who) else {
        return Ok(());
    };

    if action_cards < FINAL_ATTACK_THRESHOLD {
        if action_cards > 0 {
            penalty_draw(state, events, next, action_cards, DrawReason::FinalAttack)?;
        }
        return Ok(());
    }

    let others: Vec<PlayerId> = state
        .players
        .iter()
        .copied()
        .filter(|p| *p != who && *p != next)
        .collect();
    penalty_draw(state, events, next, FINAL_ATTACK_NEXT_DRAW, DrawReason::FinalAttack)?;
    for p in others {
        if state.is_over() {
            break;
        }
        if state.is_active(p) {
            penalty_draw(state, events, p, FINAL_ATTACK_OTHERS_DRAW, DrawReason::FinalAttack)?;
        }
    }
    Ok(())
}

fn sudden_death(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), DomainError> {
    events.push(GameEvent::SuddenDeath);
    let seated = state.players.clone();
    for p in seated {
        if state.is_over() {
            break;
        }
        let size = state.hands.get(&p).map_or(SUDDEN_DEATH_HAND_SIZE, Vec::len);
        if size < SUDDEN_DEATH_HAND_SIZE {
            penalty_draw(
                state,
                events,
                p,
                SUDDEN_DEATH_HAND_SIZE - size,
                DrawReason::SuddenDeath,
            )?;
        }
    }
    Ok(())
}
