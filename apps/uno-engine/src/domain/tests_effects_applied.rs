use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::state::PendingChoice;
use crate::domain::test_state_helpers::{pid, GameBuilder};
use crate::domain::{
    choose_color, choose_swap_target, draw_card, play_card, CardFace, Color, ColoredKind, Side,
    Variant, WildKind,
};
use crate::errors::domain::ValidationKind;

fn n(color: Color, v: u8) -> CardFace {
    CardFace::number(color, v)
}

fn red(kind: ColoredKind) -> CardFace {
    CardFace::colored(Color::Red, kind)
}

#[test]
fn colored_discard_all_sheds_every_card_of_its_color() {
    let mut state = GameBuilder::new(Variant::NoMercy)
        .players(2)
        .hand(
            0,
            [
                red(ColoredKind::DiscardAll),
                n(Color::Red, 1),
                n(Color::Red, 2),
                red(ColoredKind::Skip),
                n(Color::Blue, 4),
            ],
        )
        .top(n(Color::Red, 5))
        .build();
    let discard_before = state.discard.len();

    play_card(&mut state, pid(1), 0).expect("discard all");

    let hand = &state.hands[&pid(1)];
    assert_eq!(hand.len(), 1);
    assert_eq!(hand[0].face, n(Color::Blue, 4));
    assert_eq!(state.discard.len(), discard_before + 4);
    assert_eq!(
        state.top_card().map(|c| c.face),
        Some(red(ColoredKind::DiscardAll))
    );
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn discard_all_that_empties_the_hand_wins() {
    let mut state = GameBuilder::new(Variant::NoMercy)
        .players(2)
        .hand(
            0,
            [
                red(ColoredKind::DiscardAll),
                n(Color::Red, 1),
                n(Color::Red, 2),
                n(Color::Red, 3),
            ],
        )
        .top(n(Color::Red, 5))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("discard all");

    assert!(state.hands[&pid(1)].is_empty());
    assert_eq!(out.game_over().map(|(w, _)| w), Some(pid(1)));
}

#[test]
fn flip_turns_every_card_to_the_dark_side() {
    let mut state = GameBuilder::new(Variant::Flip).players(3).build();
    let flip_at = state
        .deck
        .iter()
        .position(|c| matches!(c.face, CardFace::Colored { kind: ColoredKind::Flip, .. }))
        .expect("flip deck holds flip cards");
    let flip = state.deck.remove(flip_at);
    state.current_color = flip.color().expect("colored");
    state.hands.entry(pid(1)).or_default().insert(0, flip);
    let total = state.card_count();

    let out = play_card(&mut state, pid(1), 0).expect("flip card");

    assert!(out.contains(|e| matches!(e, GameEvent::Flipped { side: Side::Dark })));
    assert_eq!(state.current_side, Side::Dark);
    let every_card = state
        .hands
        .values()
        .flatten()
        .chain(state.deck.iter())
        .chain(state.discard.iter());
    for card in every_card {
        assert_eq!(card.face.side(), Side::Dark, "{card:?}");
    }
    assert_eq!(state.current_color.side(), Side::Dark);
    assert_eq!(state.card_count(), total);
    let top = state.top_card().expect("top");
    assert_eq!(top.id, flip.id);
    assert_eq!(state.pairing.flip(top), flip);
}

#[test]
fn zero_rotates_hands_along_the_direction() {
    let hands = [
        vec![n(Color::Red, 0), n(Color::Red, 1), n(Color::Blue, 2)],
        vec![n(Color::Green, 3), n(Color::Green, 4), n(Color::Green, 5)],
        vec![n(Color::Yellow, 6), n(Color::Yellow, 7), n(Color::Yellow, 8)],
        vec![n(Color::Blue, 9), n(Color::Blue, 1), n(Color::Blue, 3)],
    ];
    let mut builder = GameBuilder::new(Variant::Classic)
        .players(4)
        .settings(|s| s.seven_zero = true)
        .top(n(Color::Red, 9));
    for (seat, hand) in hands.iter().enumerate() {
        builder = builder.hand(seat, hand.clone());
    }
    let mut state = builder.build();
    let mut before: Vec<Vec<_>> = (1..=4).map(|p| state.hands[&pid(p)].clone()).collect();
    before[0].remove(0);

    play_card(&mut state, pid(1), 0).expect("zero");

    for seat in 0..4 {
        let from = (seat + 3) % 4;
        assert_eq!(state.hands[&pid(seat as u64 + 1)], before[from], "seat {seat}");
    }
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn seven_swaps_with_the_chosen_opponent() {
    let mut state = GameBuilder::new(Variant::Classic)
        .players(3)
        .settings(|s| s.seven_zero = true)
        .hand(
            0,
            [
                n(Color::Red, 7),
                n(Color::Red, 1),
                n(Color::Blue, 2),
                n(Color::Green, 3),
            ],
        )
        .top(n(Color::Red, 9))
        .build();
    let theirs = state.hands[&pid(3)].clone();

    play_card(&mut state, pid(1), 0).expect("seven");
    assert_eq!(
        state.pending,
        PendingChoice::AwaitingSwapTarget { player: pid(1) }
    );
    let mine = state.hands[&pid(1)].clone();

    let err = draw_card(&mut state, pid(2)).expect_err("waiting on the swap");
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::PendingChoiceBlocking)
    );
    let err = choose_swap_target(&mut state, pid(1), pid(1)).expect_err("self swap");
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidTarget));

    choose_swap_target(&mut state, pid(1), pid(3)).expect("swap");
    assert_eq!(state.hands[&pid(1)], theirs);
    assert_eq!(state.hands[&pid(3)], mine);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn skip_everyone_and_play_again_hold_the_turn() {
    let mut state = GameBuilder::new(Variant::NoMercyPlus)
        .players(3)
        .hand(
            0,
            [
                red(ColoredKind::SkipEveryone),
                n(Color::Red, 10),
                n(Color::Blue, 2),
                n(Color::Green, 3),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("skip everyone");
    assert!(out.contains(|e| matches!(e, GameEvent::EveryoneSkipped { .. })));
    assert_eq!(state.current_player(), Some(pid(1)));

    play_card(&mut state, pid(1), 0).expect("play again");
    assert_eq!(state.current_player(), Some(pid(1)));
}

#[test]
fn color_roulette_makes_the_next_player_draw_for_a_color() {
    let mut state = GameBuilder::new(Variant::NoMercy)
        .players(3)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::ColorRoulette),
                n(Color::Blue, 2),
                n(Color::Green, 3),
            ],
        )
        .top(n(Color::Red, 9))
        .deck([n(Color::Blue, 1), n(Color::Red, 2), n(Color::Green, 3)])
        .build();

    play_card(&mut state, pid(1), 0).expect("roulette");
    assert_eq!(
        state.pending,
        PendingChoice::AwaitingDrawColor {
            player: pid(2),
            initiator: pid(1),
        }
    );
    assert_eq!(state.current_player(), Some(pid(2)));
    let err = choose_color(&mut state, pid(1), Color::Red).expect_err("victim names it");
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::PendingChoiceBlocking)
    );

    let out = choose_color(&mut state, pid(2), Color::Blue).expect("name blue");
    assert!(out.contains(|e| matches!(
        e,
        GameEvent::CardsDrawn { count: 3, reason: DrawReason::DrawColor, .. }
    )));
    assert_eq!(state.hands[&pid(2)].len(), 10);
    assert_eq!(state.current_color, Color::Blue);
    assert_eq!(state.current_player(), Some(pid(3)));
}

#[test]
fn wild_discard_all_sheds_the_chosen_color() {
    let mut state = GameBuilder::new(Variant::NoMercyPlus)
        .players(2)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::DiscardAll),
                n(Color::Blue, 1),
                n(Color::Blue, 2),
                n(Color::Red, 3),
            ],
        )
        .top(n(Color::Green, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("wild discard all");
    assert!(matches!(
        state.pending,
        PendingChoice::AwaitingColor { player, .. } if player == pid(1)
    ));

    choose_color(&mut state, pid(1), Color::Blue).expect("blue");
    assert_eq!(state.hands[&pid(1)].len(), 1);
    assert_eq!(state.current_color, Color::Blue);
    assert_eq!(state.current_player(), Some(pid(2)));
}

#[test]
fn final_attack_with_seven_actions_hits_everyone() {
    let mut hand = vec![CardFace::Wild(WildKind::FinalAttack)];
    hand.extend(std::iter::repeat(red(ColoredKind::Skip)).take(7));
    hand.push(n(Color::Red, 4));
    let mut state = GameBuilder::new(Variant::NoMercyPlus)
        .players(3)
        .hand(0, hand)
        .top(n(Color::Red, 9))
        .build();

    let out = play_card(&mut state, pid(1), 0).expect("final attack");

    assert!(out.contains(|e| matches!(e, GameEvent::FinalAttack { action_cards: 7, .. })));
    assert_eq!(state.eliminated(), vec![pid(2)]);
    assert_eq!(state.hands[&pid(3)].len(), 12);
    assert!(matches!(
        state.pending,
        PendingChoice::AwaitingColor { player, .. } if player == pid(1)
    ));
}

#[test]
fn small_final_attack_deals_the_action_count() {
    let mut state = GameBuilder::new(Variant::NoMercyPlus)
        .players(3)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::FinalAttack),
                red(ColoredKind::Skip),
                red(ColoredKind::Reverse),
                n(Color::Red, 3),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("final attack");

    assert_eq!(state.hands[&pid(2)].len(), 9);
    assert_eq!(state.hands[&pid(3)].len(), 7);
}

#[test]
fn sudden_death_fills_every_hand_to_twenty_four() {
    let mut state = GameBuilder::new(Variant::NoMercyPlus)
        .players(2)
        .hand(
            0,
            [
                CardFace::Wild(WildKind::SuddenDeath),
                n(Color::Red, 1),
                n(Color::Red, 2),
            ],
        )
        .top(n(Color::Red, 9))
        .build();

    play_card(&mut state, pid(1), 0).expect("sudden death");

    assert_eq!(state.hands[&pid(1)].len(), 24);
    assert_eq!(state.hands[&pid(2)].len(), 24);
    assert!(state.eliminated().is_empty());
}
