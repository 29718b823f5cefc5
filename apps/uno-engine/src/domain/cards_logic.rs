//! Card classification helpers and the static side remap.

use super::cards_types::{Card, CardFace, Color, ColoredKind, Side, WildKind};

impl Color {
    pub const LIGHT: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
    pub const DARK: [Color; 4] = [Color::Pink, Color::Teal, Color::Orange, Color::Purple];

    pub const fn side(self) -> Side {
        match self {
            Color::Red | Color::Yellow | Color::Green | Color::Blue => Side::Light,
            Color::Pink | Color::Teal | Color::Orange | Color::Purple => Side::Dark,
        }
    }

    /// Static counterpart on the opposite side.
    pub const fn flipped(self) -> Color {
        match self {
            Color::Red => Color::Pink,
            Color::Pink => Color::Red,
            Color::Blue => Color::Teal,
            Color::Teal => Color::Blue,
            Color::Green => Color::Orange,
            Color::Orange => Color::Green,
            Color::Yellow => Color::Purple,
            Color::Purple => Color::Yellow,
        }
    }
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Colors printed on this side.
    pub const fn colors(self) -> [Color; 4] {
        match self {
            Side::Light => Color::LIGHT,
            Side::Dark => Color::DARK,
        }
    }
}

impl ColoredKind {
    pub const fn is_number(self) -> bool {
        matches!(self, ColoredKind::Number(_))
    }
}

impl CardFace {
    /// Printed color; `None` for wilds.
    pub const fn color(&self) -> Option<Color> {
        match self {
            CardFace::Colored { color, .. } => Some(*color),
            CardFace::Wild(_) => None,
        }
    }

    pub const fn is_wild(&self) -> bool {
        matches!(self, CardFace::Wild(_))
    }

    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            CardFace::Colored {
                kind: ColoredKind::Number(_),
                ..
            }
        )
    }

    /// Number printed on the card, if any.
    pub const fn number_value(&self) -> Option<u8> {
        match self {
            CardFace::Colored {
                kind: ColoredKind::Number(n),
                ..
            } => Some(*n),
            _ => None,
        }
    }

    /// Cards the draw penalty family is built from, with their penalty.
    pub const fn draw_amount(&self) -> Option<u32> {
        match self {
            CardFace::Colored {
                kind: ColoredKind::Draw(n),
                ..
            } => Some(*n as u32),
            CardFace::Wild(WildKind::Draw(n)) | CardFace::Wild(WildKind::ReverseDraw(n)) => {
                Some(*n as u32)
            }
            _ => None,
        }
    }

    pub const fn is_draw(&self) -> bool {
        self.draw_amount().is_some()
    }

    /// Side this face is printed on.
    pub const fn side(&self) -> Side {
        match self {
            CardFace::Colored { color, .. } => color.side(),
            CardFace::Wild(WildKind::Flip) | CardFace::Wild(WildKind::DrawColor) => Side::Dark,
            CardFace::Wild(_) => Side::Light,
        }
    }

    /// Value match between two colored faces. Wilds never value-match.
    pub fn same_value(&self, other: &CardFace) -> bool {
        match (self, other) {
            (CardFace::Colored { kind: a, .. }, CardFace::Colored { kind: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Fixed remap to the opposite side, used when no pairing is recorded.
    pub fn static_flip(&self) -> CardFace {
        match *self {
            CardFace::Colored { color, kind } => {
                let kind = match kind {
                    ColoredKind::Draw(1) => ColoredKind::Draw(5),
                    ColoredKind::Draw(5) => ColoredKind::Draw(1),
                    ColoredKind::Skip => ColoredKind::SkipEveryone,
                    ColoredKind::SkipEveryone => ColoredKind::Skip,
                    other => other,
                };
                CardFace::Colored {
                    color: color.flipped(),
                    kind,
                }
            }
            CardFace::Wild(WildKind::Plain) => CardFace::Wild(WildKind::Flip),
            CardFace::Wild(WildKind::Flip) => CardFace::Wild(WildKind::Plain),
            CardFace::Wild(WildKind::Draw(2)) => CardFace::Wild(WildKind::DrawColor),
            CardFace::Wild(WildKind::DrawColor) => CardFace::Wild(WildKind::Draw(2)),
            wild => wild,
        }
    }
}

impl Card {
    pub const fn color(&self) -> Option<Color> {
        self.face.color()
    }

    pub const fn is_wild(&self) -> bool {
        self.face.is_wild()
    }
}

/// Most-held color among `colors`; ties go to the earliest in `colors`.
pub fn most_held_color(hand: &[Card], colors: [Color; 4]) -> Color {
    let mut best = colors[0];
    let mut best_count = 0usize;
    for color in colors {
        let count = hand.iter().filter(|c| c.color() == Some(color)).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}
