use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{ActionOutcome, GameState, PlayerId, Variant};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::services::lobby::{Lobby, LobbyLeave, StartedGame};
use crate::services::sessions::{BotSeat, Session, SessionId};

use super::GameService;

fn lobby_not_found(id: SessionId) -> DomainError {
    DomainError::not_found(NotFoundKind::Lobby, format!("Lobby {id} not found"))
}

impl GameService {
    /// Open a lobby. The id carries over to the session once it starts.
    pub fn open_lobby(&self, host: PlayerId, variant: Variant) -> SessionId {
        let id = SessionId::new();
        self.lobbies
            .insert(id, Lobby::new(host, variant, self.config.max_players));
        info!(lobby_id = %id, host = %host, variant = variant.as_str(), "Lobby opened");
        id
    }

    pub fn lobby(&self, id: SessionId) -> Result<Lobby, AppError> {
        self.lobbies
            .get(&id)
            .map(|lobby| lobby.value().clone())
            .ok_or_else(|| lobby_not_found(id).into())
    }

    /// Apply a lobby edit; rejected edits leave the lobby untouched.
    pub fn update_lobby<R>(
        &self,
        id: SessionId,
        edit: impl FnOnce(&mut Lobby) -> Result<R, DomainError>,
    ) -> Result<R, AppError> {
        let mut lobby = self.lobbies.get_mut(&id).ok_or_else(|| lobby_not_found(id))?;
        Ok(edit(&mut *lobby)?)
    }

    pub fn join_lobby(&self, id: SessionId, player: PlayerId) -> Result<(), AppError> {
        self.update_lobby(id, |lobby| lobby.join(player))
    }

    /// Leave a lobby; the lobby is dropped once no human is left to host it.
    pub fn leave_lobby(&self, id: SessionId, player: PlayerId) -> Result<LobbyLeave, AppError> {
        let left = self.update_lobby(id, |lobby| lobby.leave(player))?;
        if left == LobbyLeave::Closed {
            self.lobbies.remove(&id);
        }
        Ok(left)
    }

    /// Seat a bot, using the configured policy and seed when none is given.
    pub fn add_bot(
        &self,
        id: SessionId,
        by: PlayerId,
        policy: Option<&str>,
    ) -> Result<PlayerId, AppError> {
        let policy = policy.unwrap_or(self.config.default_bot.as_str());
        let base_seed = self.config.bot_seed;
        self.update_lobby(id, |lobby| {
            let seed = base_seed.map(|s| s.wrapping_add(lobby.members.len() as u64));
            lobby.add_bot(by, policy, seed)
        })
    }

    /// Deal the lobby's game and run any opening bot turns.
    pub fn start_lobby(
        &self,
        id: SessionId,
        by: PlayerId,
        seed: u64,
    ) -> Result<ActionOutcome, AppError> {
        let started = {
            let lobby = self.lobbies.get(&id).ok_or_else(|| lobby_not_found(id))?;
            lobby.start(by, seed, self.config.limits())?
        };
        self.lobbies.remove(&id);
        self.host(id, started)
    }

    /// Host an already dealt game, e.g. a bots-only simulation.
    pub fn host_game(
        &self,
        game: GameState,
        bots: BTreeMap<PlayerId, BotSeat>,
    ) -> Result<(SessionId, ActionOutcome), AppError> {
        let id = SessionId::new();
        let started = StartedGame {
            game,
            bots,
            outcome: ActionOutcome::default(),
        };
        Ok((id, self.host(id, started)?))
    }

    fn host(&self, id: SessionId, started: StartedGame) -> Result<ActionOutcome, AppError> {
        let StartedGame {
            game,
            bots,
            mut outcome,
        } = started;
        self.sessions.insert(Session::new(id, game, bots));
        outcome.extend(self.resume(id)?);
        Ok(outcome)
    }
}
