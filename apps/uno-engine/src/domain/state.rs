use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::coins::Coin;
use crate::domain::deck::FlipPairing;
use crate::domain::effects::Advance;
use crate::domain::settings::Settings;
use crate::domain::{Card, CardFace, Color, Side};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Opaque player identity supplied by the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Play direction. Clockwise walks the seat list forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub const fn reversed(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Why a color is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "for", rename_all = "snake_case")]
pub enum ColorPurpose {
    /// A wild was played; `advance` is applied once the color is in.
    Wild { advance: Advance },
    /// Wild discard-all: the color names the cards to shed.
    DiscardAll,
}

/// The single input the game is blocked on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingChoice {
    #[default]
    None,
    AwaitingColor {
        player: PlayerId,
        purpose: ColorPurpose,
    },
    AwaitingSwapTarget {
        player: PlayerId,
    },
    AwaitingCoinKind {
        player: PlayerId,
    },
    /// `player` names a color and draws until one shows up.
    AwaitingDrawColor {
        player: PlayerId,
        initiator: PlayerId,
    },
}

impl PendingChoice {
    pub const fn owner(&self) -> Option<PlayerId> {
        match *self {
            PendingChoice::None => None,
            PendingChoice::AwaitingColor { player, .. }
            | PendingChoice::AwaitingSwapTarget { player }
            | PendingChoice::AwaitingCoinKind { player }
            | PendingChoice::AwaitingDrawColor { player, .. } => Some(player),
        }
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self, PendingChoice::None)
    }
}

/// A player chasing same-color / same-number cards after a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeringChain {
    pub player: PlayerId,
    /// Face the next layered card must match.
    pub face: CardFace,
    /// What ending the chain does to the turn.
    pub advance: Advance,
}

/// Per-turn bookkeeping, reset whenever the turn changes hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnFlags {
    pub has_drawn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureReason {
    Eliminated,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub player: PlayerId,
    pub reason: DepartureReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Finished { winner: PlayerId },
}

/// Bounds on automatic engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLimits {
    /// Consecutive automatic draws before the engine reports a stall.
    pub auto_draw_chain: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            auto_draw_chain: 64,
        }
    }
}

/// The game session aggregate.
///
/// `players` holds the active turn sequence only; finished, eliminated and
/// departed players are recorded in `podium` / `departures` and own no hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub players: Vec<PlayerId>,
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    /// Draw pile; the last element is drawn first.
    pub deck: Vec<Card>,
    /// The last element is the top card.
    pub discard: Vec<Card>,
    pub pairing: FlipPairing,
    /// Index into `players`.
    pub turn: usize,
    pub direction: Direction,
    pub current_color: Color,
    pub current_side: Side,
    pub draw_stack: u32,
    pub pending: PendingChoice,
    pub layering: Option<LayeringChain>,
    pub turn_flags: TurnFlags,
    pub uno_called: BTreeSet<PlayerId>,
    pub coins: BTreeMap<PlayerId, Coin>,
    pub podium: Vec<PlayerId>,
    pub departures: Vec<Departure>,
    pub status: GameStatus,
    /// Card count of the freshly built deck.
    pub total_cards: usize,
    pub limits: EngineLimits,
    pub(crate) rng: ChaCha8Rng,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// The turn holder, if the game is still running.
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.is_over() {
            return None;
        }
        self.players.get(self.turn).copied()
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn hand(&self, who: PlayerId) -> Option<&[Card]> {
        self.hands.get(&who).map(Vec::as_slice)
    }

    pub fn seat_of(&self, who: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| *p == who)
    }

    pub fn is_active(&self, who: PlayerId) -> bool {
        self.seat_of(who).is_some()
    }

    /// Players knocked out by elimination, in order.
    pub fn eliminated(&self) -> Vec<PlayerId> {
        self.departures
            .iter()
            .filter(|d| d.reason == DepartureReason::Eliminated)
            .map(|d| d.player)
            .collect()
    }

    /// Cards currently accounted for across every pile and hand.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands.values().map(Vec::len).sum::<usize>()
    }

    /// Seat `steps` positions from `seat` in the current direction.
    pub fn seat_offset(&self, seat: usize, steps: usize) -> usize {
        let n = self.players.len() as isize;
        if n == 0 {
            return 0;
        }
        let delta = self.direction.step() * steps as isize;
        (seat as isize + delta).rem_euclid(n) as usize
    }

    /// Player `steps` seats after `who` in the current direction.
    pub fn player_after(&self, who: PlayerId, steps: usize) -> Option<PlayerId> {
        let seat = self.seat_of(who)?;
        self.players.get(self.seat_offset(seat, steps)).copied()
    }

    /// Final ranking: the winner, then the podium, then players still seated
    /// (fewest cards first), then eliminated or departed players, most recent
    /// first.
    pub fn standings(&self) -> Vec<PlayerId> {
        let mut out: Vec<PlayerId> = self.winner().into_iter().collect();
        for p in &self.podium {
            if !out.contains(p) {
                out.push(*p);
            }
        }
        let mut seated: Vec<(usize, usize, PlayerId)> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| (self.hands.get(p).map_or(0, Vec::len), seat, *p))
            .collect();
        seated.sort();
        for (_, _, p) in seated {
            if !out.contains(&p) {
                out.push(p);
            }
        }
        out.extend(self.departures.iter().rev().map(|d| d.player));
        out
    }
}

pub fn require_hand<'a>(state: &'a GameState, who: PlayerId) -> Result<&'a Vec<Card>, DomainError> {
    state.hands.get(&who).ok_or_else(|| {
        DomainError::validation(ValidationKind::NotInGame, format!("Player {who} is not seated"))
    })
}

pub fn require_hand_mut(
    state: &mut GameState,
    who: PlayerId,
) -> Result<&mut Vec<Card>, DomainError> {
    state.hands.get_mut(&who).ok_or_else(|| {
        DomainError::validation(ValidationKind::NotInGame, format!("Player {who} is not seated"))
    })
}

pub fn require_top(state: &GameState) -> Result<Card, DomainError> {
    state.discard.last().copied().ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Other("DISCARD_TOP".into()),
            "Invariant violated: discard pile is empty",
        )
    })
}

pub fn require_in_progress(state: &GameState) -> Result<(), DomainError> {
    if state.is_over() {
        return Err(DomainError::validation(
            ValidationKind::GameOver,
            "The game has already finished",
        ));
    }
    Ok(())
}
