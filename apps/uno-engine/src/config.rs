//! Engine configuration read from the process environment.

use std::env;
use std::str::FromStr;

use crate::ai::registry;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::EngineLimits;
use crate::error::AppError;

pub const DEFAULT_WIN_REWARD: u64 = 30;
pub const DEFAULT_MAX_ORCHESTRATION_STEPS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Coins credited to the winner of a finished session
    pub win_reward: u64,
    /// Registry name of the policy behind bots added without one
    pub default_bot: String,
    /// Base seed for bot policies; unset means OS entropy
    pub bot_seed: Option<u64>,
    /// Automatic steps allowed per inbound action
    pub max_orchestration_steps: usize,
    pub auto_draw_chain_limit: usize,
    pub max_players: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_reward: DEFAULT_WIN_REWARD,
            default_bot: registry::DEFAULT_BOT.to_string(),
            bot_seed: None,
            max_orchestration_steps: DEFAULT_MAX_ORCHESTRATION_STEPS,
            auto_draw_chain_limit: EngineLimits::default().auto_draw_chain,
            max_players: MAX_PLAYERS,
        }
    }
}

impl EngineConfig {
    /// Load from `UNO_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            win_reward: parsed("UNO_WIN_REWARD", defaults.win_reward)?,
            default_bot: env::var("UNO_DEFAULT_BOT").unwrap_or(defaults.default_bot),
            bot_seed: optional("UNO_BOT_SEED")?,
            max_orchestration_steps: parsed(
                "UNO_MAX_ORCHESTRATION_STEPS",
                defaults.max_orchestration_steps,
            )?,
            auto_draw_chain_limit: parsed(
                "UNO_AUTO_DRAW_CHAIN_LIMIT",
                defaults.auto_draw_chain_limit,
            )?,
            max_players: parsed("UNO_MAX_PLAYERS", defaults.max_players)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if registry::by_name(&self.default_bot).is_none() {
            return Err(AppError::config(format!(
                "UNO_DEFAULT_BOT names an unknown bot policy: '{}'",
                self.default_bot
            )));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(AppError::config(format!(
                "UNO_MAX_PLAYERS must be within {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                self.max_players
            )));
        }
        if self.max_orchestration_steps == 0 {
            return Err(AppError::config(
                "UNO_MAX_ORCHESTRATION_STEPS must be positive",
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> EngineLimits {
        EngineLimits {
            auto_draw_chain: self.auto_draw_chain_limit,
        }
    }
}

fn optional<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} is not a valid number: '{raw}'"))),
        Err(_) => Ok(None),
    }
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    Ok(optional(name)?.unwrap_or(default))
}
