use proptest::prelude::*;

use crate::domain::test_gens::game_setup;
use crate::domain::test_prelude::proptest_config;
use crate::domain::test_state_helpers::pid;
use crate::domain::{
    create_game, draw_card, force_draw, play_card, playable_for, EngineLimits, GameState,
    PlayerId, Settings, Variant,
};

fn new_game(variant: Variant, players: u64, seed: u64) -> GameState {
    let ids: Vec<PlayerId> = (1..=players).map(PlayerId).collect();
    let (state, _) = create_game(
        &Settings::for_variant(variant),
        &ids,
        seed,
        EngineLimits::default(),
    )
    .expect("valid game");
    state
}

/// One step of a naive player: answer choices by timeout, otherwise play
/// the first legal card or draw.
fn step(state: &mut GameState) {
    if let Some(owner) = state.pending.owner() {
        force_draw(state, owner).expect("timeout answer");
        return;
    }
    let Some(holder) = state.current_player() else {
        return;
    };
    match playable_for(state, holder).first() {
        Some(&index) => {
            play_card(state, holder, index).expect("listed card is legal");
        }
        None => {
            force_draw(state, holder).expect("timeout draw");
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn cards_are_conserved_through_play((variant, players, seed) in game_setup()) {
        let mut state = new_game(variant, players, seed);
        prop_assert_eq!(state.card_count(), state.total_cards);
        for _ in 0..400 {
            if state.is_over() {
                break;
            }
            step(&mut state);
            prop_assert_eq!(state.card_count(), state.total_cards);
            prop_assert!(state.hands.keys().all(|p| state.players.contains(p)));
        }
    }

    #[test]
    fn flipping_twice_restores_every_card(seed in any::<u64>()) {
        let state = new_game(Variant::Flip, 3, seed);
        let every = state
            .hands
            .values()
            .flatten()
            .chain(state.deck.iter())
            .chain(state.discard.iter());
        for card in every {
            let there = state.pairing.flip(card);
            prop_assert_ne!(there.face.side(), card.face.side());
            prop_assert_eq!(state.pairing.flip(&there), *card);
        }
    }

    #[test]
    fn accepted_stack_lands_in_full(seed in any::<u64>(), stack in 1u32..30, reshuffle in any::<bool>()) {
        let mut state = new_game(Variant::Classic, 2, seed);
        if reshuffle {
            let deck = std::mem::take(&mut state.deck);
            state.discard.splice(0..0, deck);
        }
        state.draw_stack = stack;
        let before = state.hands[&pid(1)].len();

        draw_card(&mut state, pid(1)).expect("take the stack");

        prop_assert_eq!(state.hands[&pid(1)].len(), before + stack as usize);
        prop_assert_eq!(state.draw_stack, 0);
        prop_assert_eq!(state.current_player(), Some(pid(2)));
        prop_assert_eq!(state.card_count(), state.total_cards);
    }
}
