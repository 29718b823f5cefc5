//! Error codes surfaced to the interaction layer.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings the
//! collaborator keys its user-facing messages on.

use core::fmt;

/// Centralized error codes for engine rejections and service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn & Play Validation
    /// Action attempted out of turn
    NotYourTurn,
    /// Card not playable on the current top
    IllegalCard,
    /// Hand index out of range
    InvalidCardIndex,
    /// Multi-card play breaks layering rules
    InvalidLayering,
    /// A legal card must be played
    MustPlay,
    /// Already drew this turn
    AlreadyDrew,
    /// Turn cannot be ended yet
    CannotEndTurn,
    /// UNO declared after the last-but-one play
    UnoTooLate,
    /// Game already finished
    GameOver,
    /// Card token could not be parsed
    ParseCard,

    // Pending Choices
    /// Another player's choice is open
    PendingChoiceBlocking,
    /// Actor must answer their open choice first
    ChoiceRequired,
    /// No matching choice is open
    NoPendingChoice,
    /// Swap target is not an active opponent
    InvalidTarget,

    // Coins
    /// Player holds no coin
    NoCoinAvailable,
    /// Coin already spent
    CoinAlreadyUsed,
    /// Coin kind not chosen yet
    CoinNotSelected,
    /// Coin kind already chosen
    CoinAlreadySelected,

    // Lobby & Settings
    /// Toggle conflicts with draw policy or variant lock
    SettingsConflict,
    /// Setting value out of range
    InvalidSetting,
    /// Player is not part of the game
    NotInGame,
    /// Lobby at capacity
    LobbyFull,
    /// Only the host may do this
    NotHost,
    /// Not enough players to start
    TooFewPlayers,
    /// Player already joined
    AlreadyJoined,

    // Sessions
    /// Earlier action still resolving
    SessionBusy,
    /// No such session
    SessionNotFound,
    /// No such lobby
    LobbyNotFound,
    /// No such player
    PlayerNotFound,
    /// Snapshot failed to encode or decode
    SnapshotCorrupt,
    /// Persisted bot could not be rebuilt
    BotUnavailable,

    // Generic
    /// General validation error
    ValidationError,
    /// General conflict
    Conflict,
    /// General not found
    NotFound,
    /// Configuration error
    ConfigError,
    /// Internal error
    InternalError,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        Self::NotYourTurn,
        Self::IllegalCard,
        Self::InvalidCardIndex,
        Self::InvalidLayering,
        Self::MustPlay,
        Self::AlreadyDrew,
        Self::CannotEndTurn,
        Self::UnoTooLate,
        Self::GameOver,
        Self::ParseCard,
        Self::PendingChoiceBlocking,
        Self::ChoiceRequired,
        Self::NoPendingChoice,
        Self::InvalidTarget,
        Self::NoCoinAvailable,
        Self::CoinAlreadyUsed,
        Self::CoinNotSelected,
        Self::CoinAlreadySelected,
        Self::SettingsConflict,
        Self::InvalidSetting,
        Self::NotInGame,
        Self::LobbyFull,
        Self::NotHost,
        Self::TooFewPlayers,
        Self::AlreadyJoined,
        Self::SessionBusy,
        Self::SessionNotFound,
        Self::LobbyNotFound,
        Self::PlayerNotFound,
        Self::SnapshotCorrupt,
        Self::BotUnavailable,
        Self::ValidationError,
        Self::Conflict,
        Self::NotFound,
        Self::ConfigError,
        Self::InternalError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalCard => "ILLEGAL_CARD",
            Self::InvalidCardIndex => "INVALID_CARD_INDEX",
            Self::InvalidLayering => "INVALID_LAYERING",
            Self::MustPlay => "MUST_PLAY",
            Self::AlreadyDrew => "ALREADY_DREW",
            Self::CannotEndTurn => "CANNOT_END_TURN",
            Self::UnoTooLate => "UNO_TOO_LATE",
            Self::GameOver => "GAME_OVER",
            Self::ParseCard => "PARSE_CARD",
            Self::PendingChoiceBlocking => "PENDING_CHOICE_BLOCKING",
            Self::ChoiceRequired => "CHOICE_REQUIRED",
            Self::NoPendingChoice => "NO_PENDING_CHOICE",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::NoCoinAvailable => "NO_COIN_AVAILABLE",
            Self::CoinAlreadyUsed => "COIN_ALREADY_USED",
            Self::CoinNotSelected => "COIN_NOT_SELECTED",
            Self::CoinAlreadySelected => "COIN_ALREADY_SELECTED",
            Self::SettingsConflict => "SETTINGS_CONFLICT",
            Self::InvalidSetting => "INVALID_SETTING",
            Self::NotInGame => "NOT_IN_GAME",
            Self::LobbyFull => "LOBBY_FULL",
            Self::NotHost => "NOT_HOST",
            Self::TooFewPlayers => "TOO_FEW_PLAYERS",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::SessionBusy => "SESSION_BUSY",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::LobbyNotFound => "LOBBY_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::SnapshotCorrupt => "SNAPSHOT_CORRUPT",
            Self::BotUnavailable => "BOT_UNAVAILABLE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
