//! Card face tokens ("red:7", "blue:+2", "wild:+4", "wild:reverse+8").

use std::fmt;
use std::str::FromStr;

use super::cards_types::{CardFace, Color, ColoredKind, Side, WildKind};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_err(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

impl Color {
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Orange => "orange",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Color::Red),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "pink" => Ok(Color::Pink),
            "teal" => Ok(Color::Teal),
            "orange" => Ok(Color::Orange),
            "purple" => Ok(Color::Purple),
            _ => Err(parse_err(s)),
        }
    }
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Light => "light",
            Side::Dark => "dark",
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Side::Light),
            "dark" => Ok(Side::Dark),
            _ => Err(parse_err(s)),
        }
    }
}

fn parse_amount(s: &str, token: &str) -> Result<u8, DomainError> {
    s.parse::<u8>().map_err(|_| parse_err(token))
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFace::Colored { color, kind } => {
                write!(f, "{color}:")?;
                match kind {
                    ColoredKind::Number(n) => write!(f, "{n}"),
                    ColoredKind::Skip => f.write_str("skip"),
                    ColoredKind::SkipEveryone => f.write_str("skip_everyone"),
                    ColoredKind::Reverse => f.write_str("reverse"),
                    ColoredKind::Draw(n) => write!(f, "+{n}"),
                    ColoredKind::DiscardAll => f.write_str("discard_all"),
                    ColoredKind::Flip => f.write_str("flip"),
                }
            }
            CardFace::Wild(kind) => match kind {
                WildKind::Plain => f.write_str("wild"),
                WildKind::Draw(n) => write!(f, "wild:+{n}"),
                WildKind::ReverseDraw(n) => write!(f, "wild:reverse+{n}"),
                WildKind::DrawColor => f.write_str("wild:draw_color"),
                WildKind::ColorRoulette => f.write_str("wild:color_roulette"),
                WildKind::Flip => f.write_str("wild:flip"),
                WildKind::DiscardAll => f.write_str("wild:discard_all"),
                WildKind::FinalAttack => f.write_str("wild:final_attack"),
                WildKind::SuddenDeath => f.write_str("wild:sudden_death"),
            },
        }
    }
}

impl FromStr for CardFace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "wild" {
            return Ok(CardFace::Wild(WildKind::Plain));
        }
        let (head, tail) = s.split_once(':').ok_or_else(|| parse_err(s))?;
        if head == "wild" {
            let kind = match tail {
                "draw_color" => WildKind::DrawColor,
                "color_roulette" => WildKind::ColorRoulette,
                "flip" => WildKind::Flip,
                "discard_all" => WildKind::DiscardAll,
                "final_attack" => WildKind::FinalAttack,
                "sudden_death" => WildKind::SuddenDeath,
                _ => {
                    if let Some(n) = tail.strip_prefix("reverse+") {
                        WildKind::ReverseDraw(parse_amount(n, s)?)
                    } else if let Some(n) = tail.strip_prefix('+') {
                        WildKind::Draw(parse_amount(n, s)?)
                    } else {
                        return Err(parse_err(s));
                    }
                }
            };
            return Ok(CardFace::Wild(kind));
        }

        let color: Color = head.parse()?;
        let kind = match tail {
            "skip" => ColoredKind::Skip,
            "skip_everyone" => ColoredKind::SkipEveryone,
            "reverse" => ColoredKind::Reverse,
            "discard_all" => ColoredKind::DiscardAll,
            "flip" => ColoredKind::Flip,
            _ => {
                if let Some(n) = tail.strip_prefix('+') {
                    ColoredKind::Draw(parse_amount(n, s)?)
                } else {
                    let n = parse_amount(tail, s)?;
                    if n > 10 {
                        return Err(parse_err(s));
                    }
                    ColoredKind::Number(n)
                }
            }
        };
        Ok(CardFace::Colored { color, kind })
    }
}
