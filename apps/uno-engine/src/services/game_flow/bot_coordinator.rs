//! One bot decision: ask the policy, feed the answer through the public
//! entry points, retry a bounded number of times, then fall back.

use tracing::{debug, warn};

use crate::ai::{BotAction, BotPlayer};
use crate::domain::{
    activate_coin, choose_color, choose_swap_target, declare_uno, draw_card, end_turn, force_draw,
    play_card, select_coin_kind, ActionOutcome, GameState, PendingChoice, PlayerId,
    VisibleGameState,
};
use crate::error::AppError;
use crate::services::sessions::Session;

use super::GameService;

const MAX_RETRIES_PER_ACTION: usize = 3;

/// What the engine is waiting on a bot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BotDecision {
    Color,
    SwapTarget,
    CoinKind,
    Turn,
}

/// The bot that must act next, if the session is waiting on one.
pub(super) fn next_bot_decision(session: &Session) -> Option<(PlayerId, BotDecision)> {
    let game = &session.game;
    if game.is_over() {
        return None;
    }
    let (player, decision) = match game.pending {
        PendingChoice::AwaitingColor { player, .. }
        | PendingChoice::AwaitingDrawColor { player, .. } => (player, BotDecision::Color),
        PendingChoice::AwaitingSwapTarget { player } => (player, BotDecision::SwapTarget),
        PendingChoice::AwaitingCoinKind { player } => (player, BotDecision::CoinKind),
        PendingChoice::None => (game.current_player()?, BotDecision::Turn),
    };
    session.is_bot(player).then_some((player, decision))
}

impl GameService {
    /// Run one bot decision to completion.
    ///
    /// A policy whose answer is rejected gets `MAX_RETRIES_PER_ACTION`
    /// attempts; after that the seat is resolved like a timed-out human.
    pub(super) fn run_bot(
        &self,
        session: &mut Session,
        player: PlayerId,
        decision: BotDecision,
    ) -> Result<ActionOutcome, AppError> {
        let bot = session.policy(player)?;
        let mut outcome = ActionOutcome::default();

        for retry in 0..MAX_RETRIES_PER_ACTION {
            match attempt(&mut session.game, player, bot.as_ref(), decision, &mut outcome) {
                Ok(()) => {
                    debug!(
                        session_id = %session.id,
                        player = %player,
                        ?decision,
                        retry,
                        "Bot action applied"
                    );
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!(
                        session_id = %session.id,
                        player = %player,
                        ?decision,
                        retry,
                        error = %e,
                        "Bot action failed"
                    );
                }
            }
        }

        warn!(
            session_id = %session.id,
            player = %player,
            "Bot retries exhausted, forcing a draw"
        );
        outcome.extend(force_draw(&mut session.game, player)?);
        Ok(outcome)
    }
}

fn attempt(
    game: &mut GameState,
    player: PlayerId,
    bot: &dyn BotPlayer,
    decision: BotDecision,
    outcome: &mut ActionOutcome,
) -> Result<(), AppError> {
    let view = VisibleGameState::for_player(game, player);
    match decision {
        BotDecision::Color => {
            let color = bot.choose_color(&view)?;
            outcome.extend(choose_color(game, player, color)?);
        }
        BotDecision::SwapTarget => {
            let target = bot.choose_swap_target(&view)?;
            outcome.extend(choose_swap_target(game, player, target)?);
        }
        BotDecision::CoinKind => {
            let kind = bot.choose_coin_kind(&view)?;
            outcome.extend(select_coin_kind(game, player, kind)?);
        }
        BotDecision::Turn => take_turn(game, player, bot, view, outcome)?,
    }
    Ok(())
}

fn take_turn(
    game: &mut GameState,
    player: PlayerId,
    bot: &dyn BotPlayer,
    mut view: VisibleGameState,
    outcome: &mut ActionOutcome,
) -> Result<(), AppError> {
    if bot.wants_coin(&view) {
        match activate_coin(game, player) {
            Ok(coin) => {
                outcome.extend(coin);
                view = VisibleGameState::for_player(game, player);
            }
            Err(e) => debug!(player = %player, error = %e, "Bot coin refused"),
        }
    }

    match bot.choose_turn(&view)? {
        BotAction::Play(index) => {
            if view.hand.len() == 2 && view.settings.uno_callout && bot.calls_uno(&view) {
                outcome.extend(declare_uno(game, player)?);
            }
            outcome.extend(play_card(game, player, index)?);
        }
        BotAction::Draw => outcome.extend(draw_card(game, player)?),
        BotAction::EndTurn => outcome.extend(end_turn(game, player)?),
    }
    Ok(())
}
