use crate::domain::{apply_action, force_draw, force_fold, Action, ActionOutcome, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::sessions::{Session, SessionId};

use super::GameService;

fn require_human(session: &Session, player: PlayerId) -> Result<(), DomainError> {
    if session.is_bot(player) {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("Seat {player} is played by a bot"),
        ));
    }
    Ok(())
}

impl GameService {
    /// Submit a human action, then let bots respond.
    pub fn act(
        &self,
        id: SessionId,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, AppError> {
        tracing::debug!(session_id = %id, player = %player, ?action, "Player action");
        self.run_locked(id, |session| {
            require_human(session, player)?;
            Ok(apply_action(&mut session.game, player, action)?)
        })
    }

    /// Timeout fallback: settle whatever `player` owes.
    pub fn force_draw(&self, id: SessionId, player: PlayerId) -> Result<ActionOutcome, AppError> {
        tracing::info!(session_id = %id, player = %player, "Forcing a draw after timeout");
        self.run_locked(id, |session| Ok(force_draw(&mut session.game, player)?))
    }

    /// Timeout fallback: remove `player` from the game.
    pub fn force_fold(&self, id: SessionId, player: PlayerId) -> Result<ActionOutcome, AppError> {
        tracing::info!(session_id = %id, player = %player, "Folding player after timeout");
        self.run_locked(id, |session| Ok(force_fold(&mut session.game, player)?))
    }
}
