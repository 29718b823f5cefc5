//! Game flow service - hosts sessions and drives bot seats.
//!
//! Every inbound action runs under the session's lock: the action itself,
//! then every bot decision it unlocks, then the win payout. Only then is
//! the lock released and the next inbound action admitted.

mod bot_coordinator;
mod lobbies;
mod orchestration;
mod player_actions;

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::EngineConfig;
use crate::domain::{ActionOutcome, PlayerId, VisibleGameState};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::services::ledger::Ledger;
use crate::services::lobby::Lobby;
use crate::services::sessions::{SessionId, SessionStore};

pub struct GameService {
    config: EngineConfig,
    sessions: SessionStore,
    lobbies: DashMap<SessionId, Lobby>,
    ledger: Arc<dyn Ledger>,
}

impl GameService {
    pub fn new(config: EngineConfig, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
            lobbies: DashMap::new(),
            ledger,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// What `player` currently sees in a running session.
    pub fn view(&self, id: SessionId, player: PlayerId) -> Result<VisibleGameState, AppError> {
        self.sessions.with_session(id, |session| {
            let game = &session.game;
            let known = game.players.contains(&player)
                || game.podium.contains(&player)
                || game.departures.iter().any(|d| d.player == player);
            if !known {
                return Err(DomainError::not_found(
                    NotFoundKind::Player,
                    format!("Player {player} is not part of session {id}"),
                )
                .into());
            }
            Ok(VisibleGameState::for_player(game, player))
        })
    }

    /// Serialize a session for persistence across restarts.
    pub fn save(&self, id: SessionId) -> Result<String, AppError> {
        Ok(self.sessions.save(id)?)
    }

    /// Load a persisted session and let any bot that owes a decision act.
    pub fn restore(&self, raw: &str) -> Result<(SessionId, ActionOutcome), AppError> {
        let id = self.sessions.restore(raw)?;
        let outcome = self.run_locked(id, |_| Ok(ActionOutcome::default()))?;
        Ok((id, outcome))
    }
}
