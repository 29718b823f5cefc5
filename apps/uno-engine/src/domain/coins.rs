//! No Mercy+ coins: one per player, kind chosen once, spent once.

use serde::{Deserialize, Serialize};

use crate::domain::drawing::{bury, draw_into};
use crate::domain::events::{DrawReason, GameEvent};
use crate::domain::rules::MERCY_HAND_SIZE;
use crate::domain::state::{GameState, PendingChoice, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinKind {
    /// Swap the hand for a fresh seven; also saves from elimination.
    Mercy,
    /// Double the next draw penalty this player causes.
    NoMercy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coin {
    pub kind: Option<CoinKind>,
    pub used: bool,
    /// A no-mercy coin waiting for its draw card.
    pub armed: bool,
}

impl Coin {
    /// A selected mercy coin that has not been spent.
    pub const fn mercy_ready(&self) -> bool {
        matches!(self.kind, Some(CoinKind::Mercy)) && !self.used
    }
}

/// Whether `who` still owes a coin-kind selection.
pub fn needs_selection(state: &GameState, who: PlayerId) -> bool {
    state.settings.variant.has_coins()
        && state.coins.get(&who).is_some_and(|c| c.kind.is_none())
}

fn require_coin(state: &GameState, who: PlayerId) -> Result<Coin, DomainError> {
    if !state.settings.variant.has_coins() {
        return Err(DomainError::validation(
            ValidationKind::NoCoinAvailable,
            format!("Coins are not part of the {} variant", state.settings.variant.as_str()),
        ));
    }
    state.coins.get(&who).copied().ok_or_else(|| {
        DomainError::validation(ValidationKind::NoCoinAvailable, format!("Player {who} has no coin"))
    })
}

pub(crate) fn select_kind(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    kind: CoinKind,
) -> Result<(), DomainError> {
    let coin = require_coin(state, who)?;
    if coin.kind.is_some() {
        return Err(DomainError::validation(
            ValidationKind::CoinAlreadySelected,
            "The coin kind is an irreversible choice",
        ));
    }
    if let Some(c) = state.coins.get_mut(&who) {
        c.kind = Some(kind);
    }
    if state.pending == (PendingChoice::AwaitingCoinKind { player: who }) {
        state.pending = PendingChoice::None;
    }
    events.push(GameEvent::CoinSelected { player: who, kind });
    Ok(())
}

pub(crate) fn activate(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    let coin = require_coin(state, who)?;
    let Some(kind) = coin.kind else {
        return Err(DomainError::validation(
            ValidationKind::CoinNotSelected,
            "Select a coin kind before using it",
        ));
    };
    if coin.used {
        return Err(DomainError::validation(
            ValidationKind::CoinAlreadyUsed,
            "Each coin can be used once per game",
        ));
    }

    match kind {
        CoinKind::Mercy => apply_mercy(state, events, who)?,
        CoinKind::NoMercy => {
            if let Some(c) = state.coins.get_mut(&who) {
                c.used = true;
                c.armed = true;
            }
            events.push(GameEvent::CoinUsed { player: who, kind });
        }
    }
    Ok(())
}

/// Throw the hand away and deal a fresh one.
pub(crate) fn apply_mercy(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
) -> Result<(), DomainError> {
    let old = state.hands.get_mut(&who).map(std::mem::take).unwrap_or_default();
    let discarded = old.len();
    bury(state, old);
    if let Some(c) = state.coins.get_mut(&who) {
        c.used = true;
    }
    state.uno_called.remove(&who);
    events.push(GameEvent::CoinUsed {
        player: who,
        kind: CoinKind::Mercy,
    });
    events.push(GameEvent::HandReplaced {
        player: who,
        discarded,
    });
    draw_into(state, events, who, MERCY_HAND_SIZE, DrawReason::Mercy);
    Ok(())
}

/// Apply an armed no-mercy coin to a penalty `who` is causing.
pub(crate) fn scale_penalty(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    who: PlayerId,
    amount: u32,
) -> u32 {
    let Some(coin) = state.coins.get_mut(&who) else {
        return amount;
    };
    if !coin.armed || amount == 0 {
        return amount;
    }
    coin.armed = false;
    let doubled = amount * 2;
    events.push(GameEvent::PenaltyDoubled {
        player: who,
        from: amount,
        to: doubled,
    });
    doubled
}
