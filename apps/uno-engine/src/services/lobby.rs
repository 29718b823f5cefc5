//! Pre-game lobby: membership, host controls and the settings bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::registry;
use crate::domain::rules::MIN_PLAYERS;
use crate::domain::{create_game, ActionOutcome, EngineLimits, GameState, PlayerId, Settings, Toggle, Variant};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::services::sessions::BotSeat;

/// Bot ids count down from here so they stay clear of host-issued ids.
const FIRST_BOT_ID: u64 = u64::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LobbyMember {
    Human { player: PlayerId },
    Bot { player: PlayerId, seat: BotSeat },
}

impl LobbyMember {
    pub fn player(&self) -> PlayerId {
        match self {
            LobbyMember::Human { player } | LobbyMember::Bot { player, .. } => *player,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, LobbyMember::Bot { .. })
    }
}

/// What a departure did to the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyLeave {
    Left,
    HostPassed { to: PlayerId },
    /// The host left and no human remains.
    Closed,
}

/// A game ready to be hosted.
#[derive(Debug, Clone)]
pub struct StartedGame {
    pub game: GameState,
    pub bots: BTreeMap<PlayerId, BotSeat>,
    pub outcome: ActionOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lobby {
    pub host: PlayerId,
    /// Join order, which becomes turn order.
    pub members: Vec<LobbyMember>,
    pub settings: Settings,
    pub max_players: usize,
}

impl Lobby {
    pub fn new(host: PlayerId, variant: Variant, max_players: usize) -> Self {
        Self {
            host,
            members: vec![LobbyMember::Human { player: host }],
            settings: Settings::for_variant(variant),
            max_players,
        }
    }

    pub fn players(&self) -> Vec<PlayerId> {
        self.members.iter().map(LobbyMember::player).collect()
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.members.iter().any(|m| m.player() == player)
    }

    fn require_host(&self, who: PlayerId) -> Result<(), DomainError> {
        if who != self.host {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                format!("Only the host ({}) can do that", self.host),
            ));
        }
        Ok(())
    }

    fn require_room(&self) -> Result<(), DomainError> {
        if self.members.len() >= self.max_players {
            return Err(DomainError::validation(
                ValidationKind::LobbyFull,
                format!("The lobby holds at most {} players", self.max_players),
            ));
        }
        Ok(())
    }

    pub fn join(&mut self, player: PlayerId) -> Result<(), DomainError> {
        if self.contains(player) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                format!("Player {player} is already in the lobby"),
            ));
        }
        self.require_room()?;
        self.members.push(LobbyMember::Human { player });
        debug!(player = %player, members = self.members.len(), "Joined lobby");
        Ok(())
    }

    pub fn leave(&mut self, player: PlayerId) -> Result<LobbyLeave, DomainError> {
        let index = self
            .members
            .iter()
            .position(|m| m.player() == player)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("Player {player} is not in the lobby"),
                )
            })?;
        self.members.remove(index);
        if player != self.host {
            return Ok(LobbyLeave::Left);
        }

        let next_human = self.members.iter().find(|m| !m.is_bot()).map(LobbyMember::player);
        match next_human {
            Some(to) => {
                self.host = to;
                info!(from = %player, to = %to, "Lobby host passed on");
                Ok(LobbyLeave::HostPassed { to })
            }
            None => {
                info!(host = %player, "Lobby closed");
                Ok(LobbyLeave::Closed)
            }
        }
    }

    /// Seat a bot. `name` must be a registered policy.
    pub fn add_bot(
        &mut self,
        by: PlayerId,
        name: &str,
        seed: Option<u64>,
    ) -> Result<PlayerId, DomainError> {
        self.require_host(by)?;
        self.require_room()?;
        let factory = registry::by_name(name).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidSetting,
                format!("Unknown bot policy '{name}'"),
            )
        })?;
        let player = (0..)
            .map(|n| PlayerId(FIRST_BOT_ID - n))
            .find(|id| !self.contains(*id))
            .ok_or_else(|| DomainError::validation(ValidationKind::LobbyFull, "No bot id left"))?;
        self.members.push(LobbyMember::Bot {
            player,
            seat: BotSeat {
                name: factory.name.to_string(),
                seed,
            },
        });
        debug!(player = %player, bot = factory.name, "Bot added to lobby");
        Ok(player)
    }

    pub fn remove_bot(&mut self, by: PlayerId, bot: PlayerId) -> Result<(), DomainError> {
        self.require_host(by)?;
        let index = self
            .members
            .iter()
            .position(|m| m.is_bot() && m.player() == bot)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("No bot {bot} in the lobby"))
            })?;
        self.members.remove(index);
        Ok(())
    }

    pub fn set_variant(&mut self, by: PlayerId, variant: Variant) -> Result<(), DomainError> {
        self.require_host(by)?;
        self.settings.set_variant(variant);
        Ok(())
    }

    /// Flip a house rule; returns its new value.
    pub fn toggle(&mut self, by: PlayerId, toggle: Toggle) -> Result<bool, DomainError> {
        self.require_host(by)?;
        self.settings.toggle(toggle)?;
        Ok(self.settings.get(toggle))
    }

    pub fn cycle_starting_cards(&mut self, by: PlayerId) -> Result<u8, DomainError> {
        self.require_host(by)?;
        Ok(self.settings.cycle_starting_cards())
    }

    /// Deal the game. The lobby is left untouched on failure.
    pub fn start(
        &self,
        by: PlayerId,
        seed: u64,
        limits: EngineLimits,
    ) -> Result<StartedGame, DomainError> {
        self.require_host(by)?;
        if self.members.len() < MIN_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::TooFewPlayers,
                format!("A game needs at least {MIN_PLAYERS} players"),
            ));
        }
        let (game, outcome) = create_game(&self.settings, &self.players(), seed, limits)?;
        let bots = self
            .members
            .iter()
            .filter_map(|m| match m {
                LobbyMember::Bot { player, seat } => Some((*player, seat.clone())),
                LobbyMember::Human { .. } => None,
            })
            .collect();
        info!(
            variant = self.settings.variant.as_str(),
            players = self.members.len(),
            seed,
            "Game started from lobby"
        );
        Ok(StartedGame {
            game,
            bots,
            outcome,
        })
    }
}
