use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::test_state_helpers::{pid, GameBuilder};
use crate::domain::{
    draw_card, end_turn, play_card, CardFace, Color, ColoredKind, EngineLimits, Toggle, Variant,
};
use crate::errors::domain::ValidationKind;

fn n(color: Color, v: u8) -> CardFace {
    CardFace::number(color, v)
}

fn blues(count: u8) -> Vec<CardFace> {
    (0..count).map(|i| n(Color::Blue, i % 10)).collect()
}

#[test]
fn skip_after_draw_passes_the_turn() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Blue, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .deck([n(Color::Red, 4)])
        .build();

    let out = draw_card(&mut state, pid(1)).expect("draw");

    assert!(out.contains(|e| matches!(
        e,
        GameEvent::CardsDrawn { count: 1, reason: DrawReason::Voluntary, .. }
    )));
    assert_eq!(state.hands[&pid(1)].len(), 4);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn must_play_forbids_drawing_with_a_playable_card() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| {
            s.set(Toggle::MustPlay, true).expect("must play");
            s.set(Toggle::SkipAfterDraw, false).expect("manual end");
        })
        .hand(0, [n(Color::Red, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .build();

    let err = draw_card(&mut state, pid(1)).expect_err("red 1 is playable");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MustPlay));
}

#[test]
fn one_draw_then_end_turn() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| {
            s.set(Toggle::MustPlay, true).expect("must play");
            s.set(Toggle::SkipAfterDraw, false).expect("manual end");
        })
        .hand(0, [n(Color::Blue, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .deck([n(Color::Green, 5), n(Color::Blue, 5)])
        .build();

    let err = end_turn(&mut state, pid(1)).expect_err("nothing done yet");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CannotEndTurn));

    draw_card(&mut state, pid(1)).expect("draw");
    assert_eq!(state.current_player(), Some(pid(1)));
    assert!(state.turn_flags.has_drawn);

    let err = draw_card(&mut state, pid(1)).expect_err("second draw");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::AlreadyDrew));

    end_turn(&mut state, pid(1)).expect("end");
    assert_eq!(state.current_player(), Some(pid(2)));
    assert!(!state.turn_flags.has_drawn);
}

#[test]
fn draw_until_playable_stops_on_a_match_and_keeps_the_turn() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| {
            s.set(Toggle::DrawUntilPlayable, true).expect("draw until playable");
        })
        .hand(0, [n(Color::Blue, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .deck([n(Color::Yellow, 1), n(Color::Red, 4), n(Color::Green, 2), n(Color::Green, 3)])
        .build();

    draw_card(&mut state, pid(1)).expect("draw");

    let hand = &state.hands[&pid(1)];
    assert_eq!(hand.len(), 6);
    assert_eq!(hand[5].face, n(Color::Red, 4));
    assert_eq!(state.deck.len(), 1);
    assert_eq!(state.current_player(), Some(pid(1)));

    play_card(&mut state, pid(1), 5).expect("play the drawn red");
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn auto_draw_passes_a_stuck_player() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| {
            s.set(Toggle::AutoDraw, true).expect("auto draw");
        })
        .hand(0, [n(Color::Red, 1), n(Color::Red, 5), n(Color::Green, 6)])
        .hand(1, [n(Color::Blue, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .deck([n(Color::Blue, 7), n(Color::Blue, 8)])
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("red 1");

    assert!(out.contains(|e| matches!(
        e,
        GameEvent::CardsDrawn { reason: DrawReason::Auto, .. }
    )));
    assert_eq!(state.hands[&pid(2)].len(), 4);
    assert_eq!(state.current_player(), Some(pid(1)));
}

#[test]
fn automatic_draw_chain_stalls_at_its_bound() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| {
            s.set(Toggle::AutoDraw, true).expect("auto draw");
        })
        .limits(EngineLimits { auto_draw_chain: 2 })
        .hand(0, [n(Color::Red, 1), n(Color::Green, 5), n(Color::Green, 6)])
        .hand(1, [n(Color::Blue, 1), n(Color::Blue, 2), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .deck([n(Color::Blue, 7), n(Color::Blue, 8), n(Color::Blue, 9)])
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("red 1");

    assert!(out.contains(|e| matches!(e, GameEvent::Stalled { player } if *player == pid(2))));
    assert_eq!(state.current_player(), Some(pid(2)));
    assert_eq!(state.hands[&pid(1)].len(), 3);
    assert_eq!(state.hands[&pid(2)].len(), 4);
    assert_eq!(state.deck.len(), 1);
}

#[test]
fn accepting_a_stack_to_twenty_five_eliminates() {
    let mut state = GameBuilder::new(Variant::NoMercy)
        .players(2)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Draw(2)),
                n(Color::Red, 3),
                n(Color::Green, 4),
            ],
        )
        .hand(1, blues(23))
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("+2");
    let out = draw_card(&mut state, pid(2)).expect("take the stack");

    assert_eq!(out.eliminated().collect::<Vec<_>>(), vec![pid(2)]);
    let (winner, standings) = out.game_over().expect("one player left");
    assert_eq!(winner, pid(1));
    assert_eq!(standings, &[pid(1), pid(2)]);
    assert!(!state.hands.contains_key(&pid(2)));
}

#[test]
fn elimination_needs_the_house_rule() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Draw(2)),
                n(Color::Red, 3),
                n(Color::Green, 4),
            ],
        )
        .hand(1, blues(23))
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("+2");
    draw_card(&mut state, pid(2)).expect("take the stack");

    assert_eq!(state.hands[&pid(2)].len(), 25);
    assert!(state.winner().is_none());
}
