use crate::domain::events::GameEvent;
use crate::domain::state::{Direction, PendingChoice};
use crate::domain::test_state_helpers::{pid, GameBuilder};
use crate::domain::{leave, play_card, CardFace, Color, ColoredKind, Variant, WildKind};
use crate::errors::domain::ValidationKind;

#[test]
fn turn_holder_leaving_hands_the_turn_on() {
    let mut state = GameBuilder::new(Variant::Classic).players(3).build();
    let discard_before = state.discard.len();
    let top = state.top_card().copied();

    let out = leave(&mut state, pid(1)).expect("leave");

    assert!(out.contains(|e| matches!(e, GameEvent::PlayerLeft { player } if *player == pid(1))));
    assert_eq!(state.players, vec![pid(2), pid(3)]);
    assert_eq!(state.current_player(), Some(pid(2)));
    assert_eq!(state.discard.len(), discard_before + 7);
    assert_eq!(state.top_card().copied(), top);
}

#[test]
fn leaving_counter_clockwise_passes_to_the_previous_seat() {
    let mut state = GameBuilder::new(Variant::Classic).players(3).turn(1).build();
    state.direction = Direction::CounterClockwise;

    leave(&mut state, pid(2)).expect("leave");

    assert_eq!(state.current_player(), Some(pid(1)));
}

#[test]
fn earlier_seat_leaving_keeps_the_turn_holder() {
    let mut state = GameBuilder::new(Variant::Classic).players(3).turn(2).build();

    leave(&mut state, pid(1)).expect("leave");

    assert_eq!(state.current_player(), Some(pid(3)));
}

#[test]
fn last_opponent_leaving_ends_the_game() {
    let mut state = GameBuilder::new(Variant::Classic).players(2).build();

    let out = leave(&mut state, pid(1)).expect("leave");

    let (winner, standings) = out.game_over().expect("over");
    assert_eq!(winner, pid(2));
    assert_eq!(standings, &[pid(2), pid(1)]);

    let err = leave(&mut state, pid(2)).expect_err("finished");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::GameOver));
}

#[test]
fn survivor_wins_when_the_last_rival_leaves_after_a_finish() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .settings(|s| s.first_win = false)
        .hand(0, [CardFace::number(Color::Red, 1)])
        .top(CardFace::number(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("finish first");
    assert_eq!(state.podium, vec![pid(1)]);
    assert_eq!(state.current_player(), Some(pid(2)));

    let out = leave(&mut state, pid(2)).expect("leave");

    let (winner, standings) = out.game_over().expect("over");
    assert_eq!(winner, pid(3));
    assert_eq!(state.winner(), Some(pid(3)));
    assert_eq!(standings, &[pid(3), pid(1), pid(2)]);
}

#[test]
fn leaving_twice_is_rejected() {
    let mut state = GameBuilder::new(Variant::Classic).players(3).build();
    leave(&mut state, pid(3)).expect("leave");

    let err = leave(&mut state, pid(3)).expect_err("gone");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotInGame));
}

#[test]
fn leaving_with_an_open_choice_releases_it() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::Plain),
                CardFace::number(Color::Blue, 2),
                CardFace::number(Color::Blue, 3),
            ],
        )
        .build();
    play_card(&mut state, pid(1), 0).expect("wild");

    leave(&mut state, pid(1)).expect("leave");

    assert_eq!(state.pending, PendingChoice::None);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn skip_wraps_around_the_table() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .turn(2)
        .hand(
            2,
            [
                CardFace::colored(Color::Red, ColoredKind::Skip),
                CardFace::number(Color::Red, 3),
                CardFace::number(Color::Blue, 5),
            ],
        )
        .top(CardFace::number(Color::Red, 9))
        .build();

    play_card(&mut state, pid(3), 0).expect("skip");

    assert_eq!(state.current_player(), Some(pid(2)));
}
