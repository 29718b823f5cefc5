//! Domain-level error type returned by every engine entry point.
//!
//! Every variant is a rejection: the engine guarantees the game state is
//! untouched when one is returned. Terminal transitions (a win, the last
//! elimination) are reported as events, never as errors.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Rule and input violations raised by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Neither the turn holder nor a valid jump-in
    NotYourTurn,
    /// Card fails the legality check for the current top, color and stack
    IllegalCard,
    /// Index out of range for the acting player's hand
    InvalidCardIndex,
    /// Another player's choice is open
    PendingChoiceBlocking,
    /// The actor owes an open choice and attempted something else
    ChoiceRequired,
    /// A choice response arrived while no matching choice is open
    NoPendingChoice,
    /// Swap target is not an active opponent
    InvalidTarget,
    NoCoinAvailable,
    CoinAlreadyUsed,
    CoinNotSelected,
    /// Coin kind is chosen once per game
    CoinAlreadySelected,
    /// Draw policy or variant lock forbids the toggle
    SettingsConflict,
    /// Setting value out of range
    InvalidSetting,
    /// must-play is on and the player holds a legal card
    MustPlay,
    /// Only one voluntary draw per turn
    AlreadyDrew,
    /// Nothing entitles the player to end the turn yet
    CannotEndTurn,
    UnoTooLate,
    /// Multi-card play that breaks the layering rules
    InvalidLayering,
    GameOver,
    NotInGame,
    LobbyFull,
    NotHost,
    TooFewPlayers,
    /// Card token could not be parsed
    ParseCard,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Snapshot failed to encode or decode
    Serialization,
    /// A persisted bot could not be rebuilt from the registry
    BotUnavailable,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Lobby,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// An earlier action on the same session is still being resolved
    SessionBusy,
    AlreadyJoined,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The validation kind, if this is a rule rejection.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Stable code for the collaborator's message tables.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::NotYourTurn => ErrorCode::NotYourTurn,
                ValidationKind::IllegalCard => ErrorCode::IllegalCard,
                ValidationKind::InvalidCardIndex => ErrorCode::InvalidCardIndex,
                ValidationKind::PendingChoiceBlocking => ErrorCode::PendingChoiceBlocking,
                ValidationKind::ChoiceRequired => ErrorCode::ChoiceRequired,
                ValidationKind::NoPendingChoice => ErrorCode::NoPendingChoice,
                ValidationKind::InvalidTarget => ErrorCode::InvalidTarget,
                ValidationKind::NoCoinAvailable => ErrorCode::NoCoinAvailable,
                ValidationKind::CoinAlreadyUsed => ErrorCode::CoinAlreadyUsed,
                ValidationKind::CoinNotSelected => ErrorCode::CoinNotSelected,
                ValidationKind::CoinAlreadySelected => ErrorCode::CoinAlreadySelected,
                ValidationKind::SettingsConflict => ErrorCode::SettingsConflict,
                ValidationKind::InvalidSetting => ErrorCode::InvalidSetting,
                ValidationKind::MustPlay => ErrorCode::MustPlay,
                ValidationKind::AlreadyDrew => ErrorCode::AlreadyDrew,
                ValidationKind::CannotEndTurn => ErrorCode::CannotEndTurn,
                ValidationKind::UnoTooLate => ErrorCode::UnoTooLate,
                ValidationKind::InvalidLayering => ErrorCode::InvalidLayering,
                ValidationKind::GameOver => ErrorCode::GameOver,
                ValidationKind::NotInGame => ErrorCode::NotInGame,
                ValidationKind::LobbyFull => ErrorCode::LobbyFull,
                ValidationKind::NotHost => ErrorCode::NotHost,
                ValidationKind::TooFewPlayers => ErrorCode::TooFewPlayers,
                ValidationKind::ParseCard => ErrorCode::ParseCard,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::SessionBusy => ErrorCode::SessionBusy,
                ConflictKind::AlreadyJoined => ErrorCode::AlreadyJoined,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::Lobby => ErrorCode::LobbyNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Serialization => ErrorCode::SnapshotCorrupt,
                InfraErrorKind::BotUnavailable => ErrorCode::BotUnavailable,
                InfraErrorKind::Other(_) => ErrorCode::InternalError,
            },
        }
    }
}
