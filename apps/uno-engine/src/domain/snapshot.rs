//! Lossless persistence of a game session.
//!
//! The envelope carries a format version so a restarted process can refuse
//! a snapshot it does not understand instead of corrupting an in-flight game.

use serde::{Deserialize, Serialize};

use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub game: GameState,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            game: state.clone(),
        }
    }

    /// Unwrap the game, refusing envelopes written by another format version.
    pub fn into_game(self) -> Result<GameState, DomainError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(DomainError::infra(
                InfraErrorKind::Serialization,
                format!(
                    "Unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                    self.version
                ),
            ));
        }
        Ok(self.game)
    }
}

/// Encode the full session, RNG position and flip pairing included.
pub fn encode(state: &GameState) -> Result<String, DomainError> {
    serde_json::to_string(&GameSnapshot::capture(state)).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Serialization,
            format!("Failed to encode game snapshot: {e}"),
        )
    })
}

pub fn decode(raw: &str) -> Result<GameState, DomainError> {
    let snapshot: GameSnapshot = serde_json::from_str(raw).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Serialization,
            format!("Failed to decode game snapshot: {e}"),
        )
    })?;
    snapshot.into_game()
}
