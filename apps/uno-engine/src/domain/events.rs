//! Structured record of what an action did, for the caller to render.

use serde::{Deserialize, Serialize};

use crate::domain::coins::CoinKind;
use crate::domain::state::{Direction, PendingChoice, PlayerId};
use crate::domain::{Card, Color, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// Voluntary single draw
    Voluntary,
    /// Draw-until-playable loop
    UntilPlayable,
    /// Accepting the outstanding draw stack
    Stack,
    /// Drawing for a named color
    DrawColor,
    /// Automatic draw when the holder had nothing to play
    Auto,
    UnoPenalty,
    FalseUno,
    FinalAttack,
    SuddenDeath,
    /// Fresh hand from a mercy coin
    Mercy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    JumpedIn {
        player: PlayerId,
    },
    CardsDiscarded {
        player: PlayerId,
        cards: Vec<Card>,
    },
    CardsDrawn {
        player: PlayerId,
        count: usize,
        reason: DrawReason,
    },
    /// Deck and discard were both exhausted mid-draw.
    DrawShort {
        player: PlayerId,
        wanted: usize,
        got: usize,
    },
    DrawStackRaised {
        amount: u32,
        total: u32,
    },
    DrawStackAccepted {
        player: PlayerId,
        amount: u32,
    },
    PenaltyDoubled {
        player: PlayerId,
        from: u32,
        to: u32,
    },
    Skipped {
        player: PlayerId,
    },
    EveryoneSkipped {
        player: PlayerId,
    },
    DirectionChanged {
        direction: Direction,
    },
    Flipped {
        side: Side,
    },
    HandsRotated {
        direction: Direction,
    },
    HandsSwapped {
        player: PlayerId,
        target: PlayerId,
    },
    FinalAttack {
        player: PlayerId,
        action_cards: usize,
    },
    SuddenDeath,
    ColorChosen {
        player: PlayerId,
        color: Color,
    },
    ChoiceRequested {
        choice: PendingChoice,
    },
    /// Layering is possible; the player may chase or end the turn.
    LayeringAvailable {
        player: PlayerId,
    },
    UnoDeclared {
        player: PlayerId,
    },
    /// Missed UNO call: the play was taken back.
    UnoPenalty {
        player: PlayerId,
        card: Card,
    },
    FalseUno {
        player: PlayerId,
    },
    CoinSelected {
        player: PlayerId,
        kind: CoinKind,
    },
    CoinUsed {
        player: PlayerId,
        kind: CoinKind,
    },
    HandReplaced {
        player: PlayerId,
        discarded: usize,
    },
    /// An elimination was prevented by a mercy coin.
    MercySaved {
        player: PlayerId,
    },
    TurnChanged {
        player: PlayerId,
    },
    PlayerEliminated {
        player: PlayerId,
    },
    PlayerLeft {
        player: PlayerId,
    },
    PlayerFinished {
        player: PlayerId,
        place: usize,
    },
    GameOver {
        winner: PlayerId,
        standings: Vec<PlayerId>,
    },
    /// Automatic draws or a bot chain hit their bound; `player` still owes
    /// the next move.
    Stalled {
        player: PlayerId,
    },
}

/// Events produced by one accepted action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub events: Vec<GameEvent>,
}

impl ActionOutcome {
    pub fn new(events: Vec<GameEvent>) -> Self {
        Self { events }
    }

    pub fn extend(&mut self, other: ActionOutcome) {
        self.events.extend(other.events);
    }

    pub fn game_over(&self) -> Option<(PlayerId, &[PlayerId])> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { winner, standings } => Some((*winner, standings.as_slice())),
            _ => None,
        })
    }

    pub fn eliminated(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::PlayerEliminated { player } => Some(*player),
            _ => None,
        })
    }

    pub fn contains(&self, pred: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
