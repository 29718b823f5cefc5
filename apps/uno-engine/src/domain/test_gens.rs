//! Proptest strategies for cards, settings and whole games.

use proptest::prelude::*;
use proptest::sample::select;

use crate::domain::deck::{classic_faces, flip_faces, no_mercy_faces};
use crate::domain::{CardFace, Color, Settings, Side, Variant};

pub fn variant() -> impl Strategy<Value = Variant> {
    select(Variant::ALL.to_vec())
}

/// Every face printed in `variant`'s deck, dark faces included for Flip.
pub fn faces_of(variant: Variant) -> Vec<CardFace> {
    match variant {
        Variant::Classic => classic_faces(),
        Variant::NoMercy => no_mercy_faces(false),
        Variant::NoMercyPlus => no_mercy_faces(true),
        Variant::Flip => {
            let (mut light, dark) = flip_faces();
            light.extend(dark);
            light
        }
    }
}

/// Faces of one side of `variant`'s deck.
pub fn face_on(variant: Variant, side: Side) -> impl Strategy<Value = CardFace> {
    let faces: Vec<CardFace> = faces_of(variant)
        .into_iter()
        .filter(|f| f.side() == side)
        .collect();
    select(faces)
}

pub fn color_on(side: Side) -> impl Strategy<Value = Color> {
    select(side.colors().to_vec())
}

/// Variant defaults with the stacking and layering toggles shuffled.
pub fn settings() -> impl Strategy<Value = Settings> {
    (variant(), any::<[bool; 6]>()).prop_map(|(variant, t)| {
        let mut s = Settings::for_variant(variant);
        s.stack_plus_two = t[0];
        s.stack_plus_four = t[1];
        s.stack_combined = s.stack_combined || t[2];
        s.stack_flip_draw = t[3];
        s.stack_colors = t[4];
        s.stack_numbers = t[5];
        s
    })
}

/// A side of the table and a (face, top, color) triple drawn from it.
pub fn table_position() -> impl Strategy<Value = (Settings, CardFace, CardFace, Color)> {
    (settings(), any::<bool>()).prop_flat_map(|(settings, dark)| {
        let side = if dark && settings.variant == Variant::Flip {
            Side::Dark
        } else {
            Side::Light
        };
        let variant = settings.variant;
        (
            Just(settings),
            face_on(variant, side),
            face_on(variant, side),
            color_on(side),
        )
    })
}

pub fn game_setup() -> impl Strategy<Value = (Variant, u64, u64)> {
    (variant(), 2u64..=6, any::<u64>())
}
