//! Session store: the live games this process hosts.
//!
//! Each session sits behind its own mutex so different sessions never share
//! state. Acquiring a session is non-blocking: a second action arriving
//! while the first still runs (bot chain included) is rejected with
//! `SessionBusy` instead of being queued.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::{create_bot, registry, BotPlayer};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::{GameState, PlayerId};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bot seat as persisted: registry name plus seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSeat {
    pub name: String,
    pub seed: Option<u64>,
}

/// One hosted game.
pub struct Session {
    pub id: SessionId,
    pub game: GameState,
    pub bots: BTreeMap<PlayerId, BotSeat>,
    /// Whether the win reward has been paid out.
    pub rewarded: bool,
    policies: HashMap<PlayerId, Arc<dyn BotPlayer>>,
}

impl Session {
    pub fn new(id: SessionId, game: GameState, bots: BTreeMap<PlayerId, BotSeat>) -> Self {
        Self {
            id,
            game,
            bots,
            rewarded: false,
            policies: HashMap::new(),
        }
    }

    pub fn is_bot(&self, player: PlayerId) -> bool {
        self.bots.contains_key(&player)
    }

    /// The policy behind a bot seat, built from the registry on first use.
    pub fn policy(&mut self, player: PlayerId) -> Result<Arc<dyn BotPlayer>, DomainError> {
        if !self.policies.contains_key(&player) {
            let seat = self.bots.get(&player).ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("Player {player} is not a bot in session {}", self.id),
                )
            })?;
            let bot = create_bot(&seat.name, seat.seed).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::BotUnavailable,
                    format!("Bot policy '{}' is not registered", seat.name),
                )
            })?;
            debug!(session_id = %self.id, player = %player, bot = %seat.name, "Bot policy built");
            self.policies.insert(player, Arc::from(bot));
        }
        self.policies
            .get(&player)
            .cloned()
            .ok_or_else(|| DomainError::infra(InfraErrorKind::BotUnavailable, "Bot policy vanished"))
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            id: self.id,
            snapshot: GameSnapshot::capture(&self.game),
            bots: self.bots.clone(),
            rewarded: self.rewarded,
        }
    }
}

/// Persisted form of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub snapshot: GameSnapshot,
    pub bots: BTreeMap<PlayerId, BotSeat>,
    #[serde(default)]
    pub rewarded: bool,
}

impl SessionRecord {
    pub fn encode(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Serialization,
                format!("Failed to encode session {}: {e}", self.id),
            )
        })
    }

    pub fn decode(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Serialization,
                format!("Failed to decode session record: {e}"),
            )
        })
    }

    /// Rebuild the live session, checking every bot is still registered.
    pub fn into_session(self) -> Result<Session, DomainError> {
        if let Some(seat) = self.bots.values().find(|s| registry::by_name(&s.name).is_none()) {
            return Err(DomainError::infra(
                InfraErrorKind::BotUnavailable,
                format!("Bot policy '{}' is not registered", seat.name),
            ));
        }
        let game = self.snapshot.into_game()?;
        let mut session = Session::new(self.id, game, self.bots);
        session.rewarded = self.rewarded;
        Ok(session)
    }
}

/// Owns every live session, keyed by id.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) -> SessionId {
        let id = session.id;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(session_id = %id, "Session stored");
        id
    }

    pub fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("Session {id} not found"))
            })
    }

    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with_session<R, E>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<DomainError>,
    {
        let handle = self.get(id)?;
        let mut guard = handle.try_lock().ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::SessionBusy,
                format!("Session {id} is still resolving an earlier action"),
            )
        })?;
        f(&mut guard)
    }

    /// Serialize one session for persistence.
    pub fn save(&self, id: SessionId) -> Result<String, DomainError> {
        self.with_session(id, |session| session.record().encode())
    }

    /// Load a persisted session, replacing any live one with the same id.
    pub fn restore(&self, raw: &str) -> Result<SessionId, DomainError> {
        let session = SessionRecord::decode(raw)?.into_session()?;
        Ok(self.insert(session))
    }
}
