//! Playable-card legality: matching rules and draw-stack counters.

use super::cards_types::{Card, CardFace, Color};
use super::settings::{Settings, Variant};

/// Whether `card` may answer an outstanding draw stack topped by `top`.
pub fn can_counter(card: &CardFace, top: &CardFace, settings: &Settings) -> bool {
    let (Some(amount), Some(top_amount)) = (card.draw_amount(), top.draw_amount()) else {
        return false;
    };

    match settings.variant {
        Variant::NoMercy | Variant::NoMercyPlus => {
            settings.stack_no_mercy_draw
                || settings.stack_plus_two
                || settings.stack_plus_four
                || settings.stack_combined
        }
        Variant::Flip => {
            // Only the colored +1 / +5 pair stacks in Flip
            if card.is_wild() || top.is_wild() || !settings.stack_flip_draw {
                return false;
            }
            amount == top_amount || settings.stack_combined
        }
        Variant::Classic => match (card.is_wild(), top.is_wild()) {
            (false, false) => settings.stack_plus_two,
            (true, true) => settings.stack_plus_four,
            _ => settings.stack_combined,
        },
    }
}

/// Whether `card` is playable on `top` with the given active color and stack.
pub fn can_play(
    card: &CardFace,
    top: &CardFace,
    current_color: Color,
    draw_stack: u32,
    settings: &Settings,
) -> bool {
    if draw_stack > 0 {
        return can_counter(card, top, settings);
    }
    if card.is_wild() {
        return true;
    }
    card.color() == Some(current_color) || card.same_value(top)
}

/// Hand indices of every playable card, in hand order.
pub fn playable_indices(
    hand: &[Card],
    top: &CardFace,
    current_color: Color,
    draw_stack: u32,
    settings: &Settings,
) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| can_play(&card.face, top, current_color, draw_stack, settings))
        .map(|(i, _)| i)
        .collect()
}

/// Layering match against the card that opened the chain.
pub fn layers_onto(card: &CardFace, chain: &CardFace, settings: &Settings) -> bool {
    if card.is_wild() || chain.is_wild() {
        return false;
    }
    (settings.stack_colors && card.color() == chain.color())
        || (settings.stack_numbers && card.same_value(chain))
}

/// `layers_onto`, restricted to draw cards while a stack is open so the
/// top card always stays counterable.
pub fn chains_onto(card: &CardFace, chain: &CardFace, draw_stack: u32, settings: &Settings) -> bool {
    layers_onto(card, chain, settings) && (draw_stack == 0 || card.is_draw())
}
