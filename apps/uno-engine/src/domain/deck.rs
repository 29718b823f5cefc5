//! Deck construction per variant, the Flip pairing map and draw-pile refills.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::cards_types::{Card, CardFace, CardId, Color, ColoredKind, WildKind};
use super::settings::Variant;

type Faces = Vec<CardFace>;

fn push_n(faces: &mut Faces, face: CardFace, n: usize) {
    faces.extend(std::iter::repeat(face).take(n));
}

/// Classic: 108 cards.
pub fn classic_faces() -> Faces {
    let mut faces = Vec::with_capacity(108);
    for color in Color::LIGHT {
        push_n(&mut faces, CardFace::number(color, 0), 1);
        for n in 1..=9 {
            push_n(&mut faces, CardFace::number(color, n), 2);
        }
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Skip), 2);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Reverse), 2);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Draw(2)), 2);
    }
    push_n(&mut faces, CardFace::Wild(WildKind::Plain), 4);
    push_n(&mut faces, CardFace::Wild(WildKind::Draw(4)), 4);
    faces
}

/// No Mercy: 168 colored plus 10 wild. No Mercy+ adds 24 more.
pub fn no_mercy_faces(plus: bool) -> Faces {
    let mut faces = Vec::with_capacity(if plus { 192 } else { 178 });
    for color in Color::LIGHT {
        push_n(&mut faces, CardFace::number(color, 0), 2);
        for n in 1..=9 {
            push_n(&mut faces, CardFace::number(color, n), 3);
        }
        if plus {
            push_n(&mut faces, CardFace::number(color, 10), 2);
        }
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Draw(4)), 3);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::SkipEveryone), 2);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::DiscardAll), 2);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Reverse), 3);
        push_n(&mut faces, CardFace::colored(color, ColoredKind::Skip), 3);
    }
    push_n(&mut faces, CardFace::Wild(WildKind::Draw(6)), 3);
    push_n(&mut faces, CardFace::Wild(WildKind::Draw(10)), 2);
    push_n(&mut faces, CardFace::Wild(WildKind::ReverseDraw(4)), 3);
    push_n(&mut faces, CardFace::Wild(WildKind::ColorRoulette), 2);
    if plus {
        push_n(&mut faces, CardFace::Wild(WildKind::DiscardAll), 2);
        push_n(&mut faces, CardFace::Wild(WildKind::ReverseDraw(8)), 2);
        push_n(&mut faces, CardFace::Wild(WildKind::FinalAttack), 1);
        push_n(&mut faces, CardFace::Wild(WildKind::SuddenDeath), 1);
    }
    faces
}

/// Flip light and dark multisets, 94 faces each.
pub fn flip_faces() -> (Faces, Faces) {
    let mut light = Vec::with_capacity(94);
    for color in Color::LIGHT {
        for n in 1..=9 {
            push_n(&mut light, CardFace::number(color, n), 2);
        }
        push_n(&mut light, CardFace::colored(color, ColoredKind::Draw(1)), 2);
        push_n(&mut light, CardFace::colored(color, ColoredKind::Flip), 2);
    }
    push_n(&mut light, CardFace::Wild(WildKind::Plain), 4);
    push_n(&mut light, CardFace::Wild(WildKind::Draw(2)), 2);

    let mut dark = Vec::with_capacity(94);
    for color in Color::DARK {
        for n in 1..=9 {
            push_n(&mut dark, CardFace::number(color, n), 2);
        }
        push_n(&mut dark, CardFace::colored(color, ColoredKind::Draw(5)), 1);
        push_n(&mut dark, CardFace::colored(color, ColoredKind::SkipEveryone), 1);
        push_n(&mut dark, CardFace::colored(color, ColoredKind::Flip), 2);
    }
    push_n(&mut dark, CardFace::Wild(WildKind::Flip), 4);
    push_n(&mut dark, CardFace::Wild(WildKind::DrawColor), 2);

    (light, dark)
}

/// Number of physical cards in a fresh deck of this variant.
pub fn deck_size(variant: Variant) -> usize {
    match variant {
        Variant::Classic => classic_faces().len(),
        Variant::Flip => flip_faces().0.len(),
        Variant::NoMercy => no_mercy_faces(false).len(),
        Variant::NoMercyPlus => no_mercy_faces(true).len(),
    }
}

/// Both printed faces of one Flip card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipPair {
    pub light: CardFace,
    pub dark: CardFace,
}

/// Pairing of light and dark faces keyed by card id.
///
/// Empty for every variant except Flip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlipPairing {
    pairs: BTreeMap<CardId, FlipPair>,
}

impl FlipPairing {
    pub fn get(&self, id: CardId) -> Option<&FlipPair> {
        self.pairs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The same physical card showing its other face.
    ///
    /// A card without a recorded pair falls back to the static remap.
    pub fn flip(&self, card: &Card) -> Card {
        let face = match self.pairs.get(&card.id) {
            Some(pair) if pair.light == card.face => pair.dark,
            Some(pair) if pair.dark == card.face => pair.light,
            _ => {
                warn!(
                    card_id = card.id.0,
                    face = %card.face,
                    "Missing flip pairing, using static remap"
                );
                card.face.static_flip()
            }
        };
        Card::new(card.id, face)
    }
}

/// A freshly built, shuffled draw pile plus its pairing map.
#[derive(Debug, Clone)]
pub struct Deck {
    pub cards: Vec<Card>,
    pub pairing: FlipPairing,
}

/// Build and shuffle the deck for `variant`.
pub fn build_deck<R: Rng + ?Sized>(variant: Variant, rng: &mut R) -> Deck {
    let (faces, pairing) = match variant {
        Variant::Classic => (classic_faces(), FlipPairing::default()),
        Variant::NoMercy => (no_mercy_faces(false), FlipPairing::default()),
        Variant::NoMercyPlus => (no_mercy_faces(true), FlipPairing::default()),
        Variant::Flip => {
            let (light, mut dark) = flip_faces();
            dark.shuffle(rng);
            let pairs = light
                .iter()
                .zip(dark.iter())
                .enumerate()
                .map(|(i, (l, d))| {
                    (
                        CardId(i as u32),
                        FlipPair {
                            light: *l,
                            dark: *d,
                        },
                    )
                })
                .collect();
            (light, FlipPairing { pairs })
        }
    };

    let mut cards: Vec<Card> = faces
        .into_iter()
        .enumerate()
        .map(|(i, face)| Card::new(CardId(i as u32), face))
        .collect();
    cards.shuffle(rng);
    Deck { cards, pairing }
}

/// Move every discard card except the top back into the draw pile and shuffle.
pub fn refill_from_discard<R: Rng + ?Sized>(
    deck: &mut Vec<Card>,
    discard: &mut Vec<Card>,
    rng: &mut R,
) {
    if discard.len() <= 1 {
        return;
    }
    let top_idx = discard.len() - 1;
    deck.extend(discard.drain(..top_idx));
    deck.shuffle(rng);
}

/// Pop the next card, absorbing the discard pile when the deck is empty.
pub fn draw_one<R: Rng + ?Sized>(
    deck: &mut Vec<Card>,
    discard: &mut Vec<Card>,
    rng: &mut R,
) -> Option<Card> {
    if deck.is_empty() {
        refill_from_discard(deck, discard, rng);
    }
    deck.pop()
}
