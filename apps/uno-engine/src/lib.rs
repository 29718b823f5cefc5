#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use ai::{BotAction, BotError, BotPlayer};
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use services::game_flow::GameService;
pub use services::ledger::{InMemoryLedger, Ledger};
pub use services::lobby::{Lobby, LobbyMember};
pub use services::sessions::{SessionId, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    uno_test_support::logging::init();
}
