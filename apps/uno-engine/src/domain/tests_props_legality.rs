use proptest::prelude::*;

use crate::domain::cards_types::{Card, CardId};
use crate::domain::legality::layers_onto;
use crate::domain::test_gens::{face_on, table_position};
use crate::domain::test_prelude::proptest_config;
use crate::domain::{can_play, playable_indices, Side, Variant};

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn open_table_matches_wild_color_or_value((settings, face, top, color) in table_position()) {
        let expected = face.is_wild() || face.color() == Some(color) || face.same_value(&top);
        prop_assert_eq!(can_play(&face, &top, color, 0, &settings), expected);
    }

    #[test]
    fn open_stack_only_admits_draw_cards(
        (settings, face, top, color) in table_position(),
        stack in 1u32..20,
    ) {
        if can_play(&face, &top, color, stack, &settings) {
            prop_assert!(face.is_draw());
            prop_assert!(top.is_draw());
        }
    }

    #[test]
    fn playable_indices_agree_with_can_play(
        (settings, _face, top, color) in table_position(),
        hand in prop::collection::vec(face_on(Variant::NoMercyPlus, Side::Light), 0..12),
        stack in 0u32..4,
    ) {
        let cards: Vec<Card> = hand
            .iter()
            .enumerate()
            .map(|(i, f)| Card::new(CardId(i as u32), *f))
            .collect();
        let listed = playable_indices(&cards, &top, color, stack, &settings);
        let expected: Vec<usize> = hand
            .iter()
            .enumerate()
            .filter(|(_, f)| can_play(f, &top, color, stack, &settings))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn wilds_never_layer((settings, face, top, _color) in table_position()) {
        if face.is_wild() || top.is_wild() {
            prop_assert!(!layers_onto(&face, &top, &settings));
        }
    }
}
