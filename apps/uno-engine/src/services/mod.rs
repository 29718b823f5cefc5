//! Services that host engine sessions for an interaction layer.

pub mod game_flow;
pub mod ledger;
pub mod lobby;
pub mod sessions;
