//! Currency ledger the session host credits win rewards to.

use dashmap::DashMap;
use tracing::info;

use crate::domain::PlayerId;
use crate::error::AppError;

/// External currency store. The engine only signals winners; crediting is
/// the ledger's job and happens once per finished session.
pub trait Ledger: Send + Sync {
    fn credit(&self, player: PlayerId, amount: u64) -> Result<(), AppError>;

    fn balance(&self, player: PlayerId) -> u64;
}

/// Process-local ledger for tests and the simulator.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: DashMap<PlayerId, u64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ledger for InMemoryLedger {
    fn credit(&self, player: PlayerId, amount: u64) -> Result<(), AppError> {
        let mut entry = self.balances.entry(player).or_insert(0);
        *entry = entry.checked_add(amount).ok_or_else(|| {
            AppError::internal(format!("Balance overflow for player {player}"))
        })?;
        info!(player = %player, amount, balance = *entry, "Ledger credited");
        Ok(())
    }

    fn balance(&self, player: PlayerId) -> u64 {
        self.balances.get(&player).map_or(0, |b| *b)
    }
}
