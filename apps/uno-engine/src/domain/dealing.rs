//! Game creation: deck, starting hands, the first discard and coins.

use std::collections::{BTreeMap, BTreeSet};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::coins::Coin;
use crate::domain::deck::build_deck;
use crate::domain::events::ActionOutcome;
use crate::domain::game_transition::settle;
use crate::domain::rules::{player_count_valid, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::settings::Settings;
use crate::domain::state::{
    Direction, EngineLimits, GameState, GameStatus, PendingChoice, PlayerId, TurnFlags,
};
use crate::domain::{Card, Side};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Build a game for `players` (turn order as given) under `settings`.
///
/// The same seed always yields the same deck, hands and first card.
pub fn create_game(
    settings: &Settings,
    players: &[PlayerId],
    seed: u64,
    limits: EngineLimits,
) -> Result<(GameState, ActionOutcome), DomainError> {
    if !player_count_valid(players.len()) {
        return Err(DomainError::validation(
            ValidationKind::TooFewPlayers,
            format!(
                "A game needs {MIN_PLAYERS}..={MAX_PLAYERS} players, got {}",
                players.len()
            ),
        ));
    }
    let unique: BTreeSet<_> = players.iter().collect();
    if unique.len() != players.len() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyJoined,
            "A player cannot take two seats",
        ));
    }
    if !settings.any_draw_policy() {
        return Err(DomainError::validation(
            ValidationKind::SettingsConflict,
            "At least one draw policy must be enabled",
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let deck = build_deck(settings.variant, &mut rng);
    let total_cards = deck.cards.len();
    let dealt = players.len() * usize::from(settings.starting_cards);
    if dealt >= total_cards {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetting,
            format!(
                "{} players with {} cards each do not fit a {total_cards}-card deck",
                players.len(),
                settings.starting_cards
            ),
        ));
    }

    let mut cards = deck.cards;
    let mut hands: BTreeMap<PlayerId, Vec<Card>> = players
        .iter()
        .map(|p| (*p, Vec::with_capacity(usize::from(settings.starting_cards))))
        .collect();
    for _ in 0..settings.starting_cards {
        for p in players {
            if let (Some(card), Some(hand)) = (cards.pop(), hands.get_mut(p)) {
                hand.push(card);
            }
        }
    }

    let (first, color) = expose_first_card(&mut cards)?;
    let coins = if settings.variant.has_coins() {
        players.iter().map(|p| (*p, Coin::default())).collect()
    } else {
        BTreeMap::new()
    };

    let mut state = GameState {
        settings: settings.clone(),
        players: players.to_vec(),
        hands,
        deck: cards,
        discard: vec![first],
        pairing: deck.pairing,
        turn: 0,
        direction: Direction::Clockwise,
        current_color: color,
        current_side: Side::Light,
        draw_stack: 0,
        pending: PendingChoice::None,
        layering: None,
        turn_flags: TurnFlags::default(),
        uno_called: BTreeSet::new(),
        coins,
        podium: Vec::new(),
        departures: Vec::new(),
        status: GameStatus::InProgress,
        total_cards,
        limits,
        rng,
    };

    info!(
        variant = settings.variant.as_str(),
        players = players.len(),
        first_card = %first.face,
        "Game created"
    );

    let mut events = Vec::new();
    settle(&mut state, &mut events)?;
    Ok((state, ActionOutcome::new(events)))
}

/// Pop the first non-wild card; passed-over wilds go to the bottom.
fn expose_first_card(cards: &mut Vec<Card>) -> Result<(Card, crate::domain::Color), DomainError> {
    let mut passed = Vec::new();
    let mut found = None;
    while let Some(card) = cards.pop() {
        if let Some(color) = card.color() {
            found = Some((card, color));
            break;
        }
        passed.push(card);
    }
    cards.splice(0..0, passed);
    found.ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidSetting,
            "Deck holds no colored card to start the discard pile",
        )
    })
}
