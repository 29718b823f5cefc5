//! Core card-related types: Card, CardFace, Color, Side

use serde::{Deserialize, Serialize};

/// Card colors across both faces of a Flip deck.
///
/// The first four appear on light faces (and in every non-Flip variant),
/// the last four only on dark faces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Pink,
    Teal,
    Orange,
    Purple,
}

/// Which face of a Flip deck is showing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Side {
    #[default]
    Light,
    Dark,
}

/// Face value of a colored card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColoredKind {
    /// 0..=9 everywhere, 10 (play again) in No Mercy+
    Number(u8),
    Skip,
    SkipEveryone,
    Reverse,
    /// Colored draw card: +1 (Flip light), +2 (Classic), +4 (No Mercy), +5 (Flip dark)
    Draw(u8),
    DiscardAll,
    Flip,
}

/// Face value of a wild card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WildKind {
    Plain,
    /// Wild +2 (Flip light), +4 (Classic), +6 and +10 (No Mercy)
    Draw(u8),
    /// Wild +4 reverse (No Mercy) and reverse +8 (No Mercy+)
    ReverseDraw(u8),
    /// Flip dark-side wild draw color
    DrawColor,
    /// No Mercy color roulette
    ColorRoulette,
    /// Flip dark-side wild that flips the deck
    Flip,
    DiscardAll,
    FinalAttack,
    SuddenDeath,
}

/// The printed face of a card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardFace {
    Colored { color: Color, kind: ColoredKind },
    Wild(WildKind),
}

/// Identity of one physical card for the life of a game.
///
/// Flip pairings are keyed by this id, so it travels with the card through
/// deck, hands, discard and reshuffles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

/// A physical card showing one face.
///
/// Cards are immutable; flipping produces a new `Card` with the same id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub id: CardId,
    pub face: CardFace,
}

impl Card {
    pub const fn new(id: CardId, face: CardFace) -> Self {
        Self { id, face }
    }
}

impl CardFace {
    pub const fn colored(color: Color, kind: ColoredKind) -> Self {
        CardFace::Colored { color, kind }
    }

    pub const fn number(color: Color, n: u8) -> Self {
        CardFace::Colored {
            color,
            kind: ColoredKind::Number(n),
        }
    }
}
