#![allow(dead_code)]

use std::sync::Arc;

use uno_engine::domain::{
    create_game, Card, CardFace, CardId, Color, EngineLimits, GameState, PlayerId, Settings,
    Variant,
};
use uno_engine::{EngineConfig, GameService, InMemoryLedger};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    uno_test_support::logging::init();
}

/// Ids for rigged cards, clear of any deck-issued id.
const RIGGED_IDS: u32 = 50_000;

pub fn ids(n: u64) -> Vec<PlayerId> {
    (1..=n).map(PlayerId).collect()
}

pub fn new_game(settings: &Settings, players: u64, seed: u64) -> GameState {
    let (state, _) = create_game(settings, &ids(players), seed, EngineLimits::default())
        .expect("valid game");
    state
}

pub fn variant_game(variant: Variant, players: u64, seed: u64) -> GameState {
    new_game(&Settings::for_variant(variant), players, seed)
}

/// Replace a hand with freshly minted cards.
pub fn rig_hand(state: &mut GameState, player: PlayerId, faces: &[CardFace]) {
    let cards = faces
        .iter()
        .enumerate()
        .map(|(i, face)| Card::new(CardId(RIGGED_IDS + player.0 as u32 * 100 + i as u32), *face))
        .collect();
    state.hands.insert(player, cards);
}

/// Put `face` on top of the discard pile and make its color current.
pub fn rig_top(state: &mut GameState, face: CardFace) {
    state
        .discard
        .push(Card::new(CardId(RIGGED_IDS + 99_999), face));
    if let Some(color) = face.color() {
        state.current_color = color;
    }
}

pub fn n(color: Color, v: u8) -> CardFace {
    CardFace::number(color, v)
}

pub fn service_with(config: EngineConfig) -> (GameService, Arc<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let service = GameService::new(config, ledger.clone());
    (service, ledger)
}

pub fn service() -> (GameService, Arc<InMemoryLedger>) {
    service_with(EngineConfig::default())
}
