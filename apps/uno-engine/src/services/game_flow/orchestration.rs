use tracing::{info, warn};

use crate::domain::{ActionOutcome, GameEvent};
use crate::error::AppError;
use crate::services::sessions::{Session, SessionId};

use super::bot_coordinator::next_bot_decision;
use super::GameService;

impl GameService {
    /// Run `action` on the session, then every bot turn it unlocks.
    ///
    /// A finished session pays its winner and is removed from the store
    /// before this returns.
    pub(super) fn run_locked(
        &self,
        id: SessionId,
        action: impl FnOnce(&mut Session) -> Result<ActionOutcome, AppError>,
    ) -> Result<ActionOutcome, AppError> {
        let (outcome, finished) = self.sessions.with_session(id, |session| {
            let mut outcome = action(session)?;
            outcome.extend(self.drive(session)?);
            let finished = self.pay_out(session)?;
            Ok::<_, AppError>((outcome, finished))
        })?;
        if finished {
            self.sessions.remove(id);
        }
        Ok(outcome)
    }

    /// Resume a session whose bot chain stopped at the step bound.
    pub fn resume(&self, id: SessionId) -> Result<ActionOutcome, AppError> {
        tracing::debug!(session_id = %id, "Resuming bot turns");
        self.run_locked(id, |_| Ok(ActionOutcome::default()))
    }

    /// Let bots act until a human owes input or the game is over.
    ///
    /// After `max_orchestration_steps` decisions the chain stops with a
    /// `Stalled` event naming the bot still owed a turn. Every accepted step
    /// stays committed; `resume` picks the chain up again.
    pub(super) fn drive(&self, session: &mut Session) -> Result<ActionOutcome, AppError> {
        let limit = self.config.max_orchestration_steps;
        let mut outcome = ActionOutcome::default();
        let mut steps = 0;
        while let Some((player, decision)) = next_bot_decision(session) {
            if steps == limit {
                warn!(
                    session_id = %session.id,
                    steps,
                    waiting_on = %player,
                    "Bot chain exceeded the step bound"
                );
                outcome.events.push(GameEvent::Stalled { player });
                break;
            }
            steps += 1;
            outcome.extend(self.run_bot(session, player, decision)?);
        }
        Ok(outcome)
    }

    /// Credit the winner once. Returns whether the game is over.
    fn pay_out(&self, session: &mut Session) -> Result<bool, AppError> {
        let Some(winner) = session.game.winner() else {
            return Ok(false);
        };
        if !session.rewarded {
            if !session.is_bot(winner) {
                self.ledger.credit(winner, self.config.win_reward)?;
            }
            session.rewarded = true;
            info!(
                session_id = %session.id,
                winner = %winner,
                reward = self.config.win_reward,
                "Game finished"
            );
        }
        Ok(true)
    }
}
