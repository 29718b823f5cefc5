use crate::domain::events::GameEvent;
use crate::domain::state::{Direction, PendingChoice};
use crate::domain::test_state_helpers::{pid, GameBuilder};
use crate::domain::{
    declare_uno, draw_card, end_turn, play_card, play_cards, CardFace, Color, ColoredKind,
    Variant, WildKind,
};
use crate::errors::domain::ValidationKind;

fn n(color: Color, v: u8) -> CardFace {
    CardFace::number(color, v)
}

fn kind_of(err: crate::errors::DomainError) -> ValidationKind {
    err.validation_kind().cloned().expect("validation error")
}

#[test]
fn two_player_reverse_keeps_the_turn() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Reverse),
                n(Color::Red, 3),
                n(Color::Blue, 5),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("reverse is legal");

    assert_eq!(state.current_player(), Some(pid(1)));
    assert_eq!(state.direction, Direction::Clockwise);
}

#[test]
fn reverse_with_three_players_turns_play_around() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Reverse),
                n(Color::Red, 3),
                n(Color::Blue, 5),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("reverse is legal");

    assert_eq!(state.direction, Direction::CounterClockwise);
    assert_eq!(state.current_player(), Some(pid(3)));
}

#[test]
fn skip_jumps_over_the_next_player() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Skip),
                n(Color::Red, 3),
                n(Color::Blue, 5),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("skip is legal");

    assert_eq!(state.current_player(), Some(pid(3)));
    assert!(out.contains(|e| matches!(e, GameEvent::Skipped { player } if *player == pid(2))));
}

#[test]
fn illegal_card_is_rejected_without_touching_state() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Blue, 3), n(Color::Green, 4), n(Color::Red, 1)])
        .top(n(Color::Red, 9))
        .build();
    let before = serde_json::to_string(&state).expect("encode");

    let err = play_card(&mut state, pid(1), 0).expect_err("blue 3 on red 9");

    assert_eq!(kind_of(err), ValidationKind::IllegalCard);
    assert_eq!(serde_json::to_string(&state).expect("encode"), before);
}

#[test]
fn bad_index_and_wrong_player_are_rejected() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Red, 3), n(Color::Green, 4), n(Color::Red, 1)])
        .top(n(Color::Red, 9))
        .build();

    let err = play_card(&mut state, pid(1), 7).expect_err("out of range");
    assert_eq!(kind_of(err), ValidationKind::InvalidCardIndex);

    let err = play_card(&mut state, pid(2), 0).expect_err("not their turn");
    assert_eq!(kind_of(err), ValidationKind::NotYourTurn);

    let err = play_cards(&mut state, pid(1), &[0, 0]).expect_err("same card twice");
    assert_eq!(kind_of(err), ValidationKind::InvalidCardIndex);
}

#[test]
fn wild_blocks_everyone_until_the_color_is_chosen() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::Plain),
                n(Color::Blue, 3),
                n(Color::Blue, 4),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("wild is always legal");
    assert!(matches!(
        state.pending,
        PendingChoice::AwaitingColor { player, .. } if player == pid(1)
    ));

    let err = draw_card(&mut state, pid(2)).expect_err("blocked");
    assert_eq!(kind_of(err), ValidationKind::PendingChoiceBlocking);
    let err = play_card(&mut state, pid(1), 0).expect_err("owes a color");
    assert_eq!(kind_of(err), ValidationKind::ChoiceRequired);

    crate::domain::choose_color(&mut state, pid(1), Color::Blue).expect("color");
    assert_eq!(state.current_color, Color::Blue);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn draw_stack_passes_between_counters_and_lands_on_the_drawer() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Draw(2)),
                n(Color::Blue, 3),
                n(Color::Blue, 4),
            ],
        )
        .hand(
            1,
            [
                CardFace::colored(Color::Green, ColoredKind::Draw(2)),
                n(Color::Yellow, 3),
                n(Color::Yellow, 4),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("+2");
    assert_eq!(state.draw_stack, 2);
    assert_eq!(state.current_player(), Some(pid(2)));

    play_card(&mut state, pid(2), 0).expect("+2 counters +2");
    assert_eq!(state.draw_stack, 4);
    assert_eq!(state.current_player(), Some(pid(1)));

    let err = play_card(&mut state, pid(1), 0).expect_err("blue 3 is no counter");
    assert_eq!(kind_of(err), ValidationKind::IllegalCard);

    draw_card(&mut state, pid(1)).expect("accept the stack");
    assert_eq!(state.draw_stack, 0);
    assert_eq!(state.hands[&pid(1)].len(), 6);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn layered_cards_cannot_bury_an_open_draw_stack() {
    let red_draw = CardFace::colored(Color::Red, ColoredKind::Draw(2));
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| s.stack_colors = true)
        .hand(0, [red_draw, n(Color::Red, 5), n(Color::Blue, 3)])
        .hand(
            1,
            [
                CardFace::colored(Color::Green, ColoredKind::Draw(2)),
                n(Color::Yellow, 3),
                n(Color::Yellow, 4),
            ],
        )
        .top(n(Color::Red, 9))
        .build();
    let before = serde_json::to_string(&state).expect("encode");

    let err = play_cards(&mut state, pid(1), &[0, 1]).expect_err("red 5 over the +2");
    assert_eq!(kind_of(err), ValidationKind::InvalidLayering);
    assert_eq!(serde_json::to_string(&state).expect("encode"), before);

    play_cards(&mut state, pid(1), &[1, 0]).expect("+2 on top");
    assert_eq!(state.draw_stack, 2);
    assert_eq!(state.top_card().map(|c| c.face), Some(red_draw));
    assert_eq!(state.current_player(), Some(pid(2)));

    play_card(&mut state, pid(2), 0).expect("counter");
    assert_eq!(state.draw_stack, 4);
}

#[test]
fn layering_chain_over_an_open_stack_takes_only_draw_cards() {
    let red_draw = CardFace::colored(Color::Red, ColoredKind::Draw(2));
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| s.stack_colors = true)
        .hand(
            0,
            [
                n(Color::Red, 1),
                red_draw,
                red_draw,
                n(Color::Red, 5),
                n(Color::Blue, 3),
            ],
        )
        .hand(
            1,
            [
                CardFace::colored(Color::Green, ColoredKind::Draw(2)),
                n(Color::Yellow, 3),
                n(Color::Yellow, 4),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("red 1");
    assert!(state.layering.is_some());

    play_card(&mut state, pid(1), 0).expect("+2 joins the chain");
    assert_eq!(state.draw_stack, 2);
    assert!(state.layering.is_some());
    assert_eq!(crate::domain::playable_for(&state, pid(1)), vec![0]);

    let err = play_card(&mut state, pid(1), 1).expect_err("red 5 over the +2");
    assert_eq!(kind_of(err), ValidationKind::InvalidLayering);

    end_turn(&mut state, pid(1)).expect("stop chasing");
    assert_eq!(state.current_player(), Some(pid(2)));
    assert_eq!(state.top_card().map(|c| c.face), Some(red_draw));

    play_card(&mut state, pid(2), 0).expect("counter");
    assert_eq!(state.draw_stack, 4);
}

#[test]
fn missed_uno_call_on_a_counter_keeps_the_stack() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(
            0,
            [
                CardFace::colored(Color::Red, ColoredKind::Draw(2)),
                n(Color::Blue, 3),
                n(Color::Blue, 4),
            ],
        )
        .hand(
            1,
            [
                CardFace::colored(Color::Green, ColoredKind::Draw(2)),
                n(Color::Yellow, 3),
            ],
        )
        .top(n(Color::Red, 9))
        .build();
    let third_hand = state.hands[&pid(3)].len();

    play_card(&mut state, pid(1), 0).expect("+2");
    let out = play_card(&mut state, pid(2), 0).expect("accepted as a penalty");

    assert!(out.contains(|e| matches!(e, GameEvent::UnoPenalty { player, .. } if *player == pid(2))));
    assert!(out.contains(|e| matches!(
        e,
        GameEvent::DrawStackAccepted { player, amount: 2 } if *player == pid(2)
    )));
    assert_eq!(state.hands[&pid(2)].len(), 6);
    assert_eq!(state.draw_stack, 0);
    assert_eq!(state.hands[&pid(3)].len(), third_hand);
    assert_eq!(state.current_player(), Some(pid(3)));
}

#[test]
fn missed_uno_call_takes_the_play_back() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Red, 1), n(Color::Blue, 2)])
        .top(n(Color::Red, 9))
        .build();
    let played = state.hands[&pid(1)][0];
    let top = *state.top_card().expect("top");

    let out = play_card(&mut state, pid(1), 0).expect("accepted as a penalty");

    assert!(out.contains(|e| matches!(e, GameEvent::UnoPenalty { .. })));
    assert_eq!(state.hands[&pid(1)].len(), 4);
    assert_eq!(state.hands[&pid(1)][0], played);
    assert_eq!(state.top_card(), Some(&top));
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn declared_uno_lets_the_card_through() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Red, 1), n(Color::Blue, 2)])
        .top(n(Color::Red, 9))
        .build();

    declare_uno(&mut state, pid(1)).expect("two cards held");
    play_card(&mut state, pid(1), 0).expect("play");

    assert_eq!(state.hands[&pid(1)].len(), 1);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn emptying_the_hand_wins_a_single_winner_game() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(0, [n(Color::Red, 1)])
        .top(n(Color::Red, 9))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("last card");

    assert_eq!(state.winner(), Some(pid(1)));
    let (winner, standings) = out.game_over().expect("game over event");
    assert_eq!(winner, pid(1));
    assert_eq!(standings[0], pid(1));
    assert_eq!(
        kind_of(draw_card(&mut state, pid(2)).expect_err("finished")),
        ValidationKind::GameOver
    );
}

#[test]
fn jump_in_seizes_the_turn_with_an_exact_duplicate() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .settings(|s| s.jump_in = true)
        .hand(1, [n(Color::Blue, 2), n(Color::Green, 4), n(Color::Yellow, 8)])
        .hand(2, [n(Color::Red, 5), n(Color::Green, 4), n(Color::Yellow, 8)])
        .top(n(Color::Red, 5))
        .build();

    let err = play_card(&mut state, pid(2), 0).expect_err("no duplicate");
    assert_eq!(kind_of(err), ValidationKind::NotYourTurn);

    let out = play_card(&mut state, pid(3), 0).expect("jump in");
    assert!(out.contains(|e| matches!(e, GameEvent::JumpedIn { player } if *player == pid(3))));
    assert_eq!(state.current_player(), Some(pid(1)));
    assert_eq!(state.hands[&pid(3)].len(), 2);
}

#[test]
fn jump_in_is_off_by_default() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .hand(2, [n(Color::Red, 5), n(Color::Green, 4), n(Color::Yellow, 8)])
        .top(n(Color::Red, 5))
        .build();

    let err = play_card(&mut state, pid(3), 0).expect_err("jump-in disabled");
    assert_eq!(kind_of(err), ValidationKind::NotYourTurn);
}

#[test]
fn layered_play_then_end_turn() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .settings(|s| s.stack_colors = true)
        .hand(
            0,
            [
                n(Color::Red, 1),
                n(Color::Red, 5),
                n(Color::Blue, 3),
                n(Color::Red, 7),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    let err = play_cards(&mut state, pid(1), &[0, 2]).expect_err("mixed colors");
    assert_eq!(kind_of(err), ValidationKind::InvalidLayering);

    let out = play_cards(&mut state, pid(1), &[0, 1]).expect("two reds");
    assert!(out.contains(|e| matches!(e, GameEvent::LayeringAvailable { .. })));
    assert_eq!(state.hands[&pid(1)].len(), 2);
    assert_eq!(state.current_player(), Some(pid(1)));
    assert_eq!(state.top_card().map(|c| c.face), Some(n(Color::Red, 5)));

    let err = play_card(&mut state, pid(1), 0).expect_err("blue does not layer");
    assert_eq!(kind_of(err), ValidationKind::InvalidLayering);

    end_turn(&mut state, pid(1)).expect("stop chasing");
    assert_eq!(state.current_player(), Some(pid(2)));
    assert!(state.layering.is_none());
}

#[test]
fn multi_card_play_needs_a_layering_rule() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Red, 1), n(Color::Red, 5), n(Color::Blue, 3)])
        .top(n(Color::Red, 9))
        .build();

    let err = play_cards(&mut state, pid(1), &[0, 1]).expect_err("no layering rule");
    assert_eq!(kind_of(err), ValidationKind::InvalidLayering);
}

#[test]
fn last_player_standing_keeps_playing_after_a_finish() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .settings(|s| s.first_win = false)
        .hand(0, [n(Color::Red, 1)])
        .hand(1, [n(Color::Red, 2)])
        .top(n(Color::Red, 9))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("finish first");
    assert!(out.game_over().is_none());
    assert_eq!(state.podium, vec![pid(1)]);
    assert_eq!(state.current_player(), Some(pid(2)));

    let out = play_card(&mut state, pid(2), 0).expect("finish second");
    let (winner, standings) = out.game_over().expect("over");
    assert_eq!(winner, pid(1));
    assert_eq!(standings, &[pid(1), pid(2), pid(3)]);
}

#[test]
fn chosen_color_governs_play_on_a_wild() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(2)
        .hand(0, [n(Color::Red, 3), n(Color::Green, 4), n(Color::Blue, 1)])
        .top(CardFace::Wild(WildKind::Plain))
        .color(Color::Green)
        .build();

    let err = play_card(&mut state, pid(1), 0).expect_err("red on a green wild");
    assert_eq!(kind_of(err), ValidationKind::IllegalCard);

    play_card(&mut state, pid(1), 1).expect("green matches");
    assert_eq!(state.current_color, Color::Green);
    assert_eq!(state.current_player(), Some(pid(2)));
}
