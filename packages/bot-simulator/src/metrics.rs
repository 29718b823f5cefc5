//! Per-game metrics derived from the event stream.

use serde::Serialize;
use uno_engine::domain::{ActionOutcome, DrawReason, GameEvent, PlayerId, Side};

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub counters: EventCounters,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub variant: String,
    pub players: u64,
    /// Policy per seat, in seat order
    pub bots: Vec<String>,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub winner: Option<PlayerId>,
    pub winner_bot: Option<String>,
    pub standings: Vec<PlayerId>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventCounters {
    pub turns: u32,
    pub cards_played: u32,
    pub cards_drawn: u64,
    pub penalty_cards: u64,
    pub stacks_accepted: u32,
    pub largest_stack: u32,
    pub flips_to_dark: u32,
    pub eliminations: u32,
    pub uno_penalties: u32,
    pub coins_used: u32,
    pub stalls: u32,
}

impl EventCounters {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnChanged { .. } => self.turns += 1,
            GameEvent::CardPlayed { .. } => self.cards_played += 1,
            GameEvent::CardsDrawn { count, reason, .. } => {
                self.cards_drawn += *count as u64;
                if *reason != DrawReason::Voluntary {
                    self.penalty_cards += *count as u64;
                }
            }
            GameEvent::DrawStackAccepted { amount, .. } => {
                self.stacks_accepted += 1;
                self.largest_stack = self.largest_stack.max(*amount);
            }
            GameEvent::Flipped { side: Side::Dark } => self.flips_to_dark += 1,
            GameEvent::PlayerEliminated { .. } => self.eliminations += 1,
            GameEvent::UnoPenalty { .. } => self.uno_penalties += 1,
            GameEvent::CoinUsed { .. } => self.coins_used += 1,
            GameEvent::Stalled { .. } => self.stalls += 1,
            _ => {}
        }
    }
}

/// Build metrics from everything a game emitted.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: GameConfig,
    outcomes: &[ActionOutcome],
    duration_ms: f64,
) -> GameMetrics {
    let mut counters = EventCounters::default();
    for event in outcomes.iter().flat_map(|o| &o.events) {
        counters.record(event);
    }
    let (winner, standings) = outcomes
        .iter()
        .find_map(|o| o.game_over())
        .map_or((None, Vec::new()), |(w, s)| (Some(w), s.to_vec()));
    let winner_bot = winner.and_then(|w| seat_bot(&config, w));

    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string());

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config,
        result: GameResultMetrics {
            winner,
            winner_bot,
            standings,
            duration_ms,
        },
        counters,
    }
}

/// Seats are numbered from 1 in the order `bots` lists them.
pub fn seat_bot(config: &GameConfig, player: PlayerId) -> Option<String> {
    let seat = usize::try_from(player.0).ok()?.checked_sub(1)?;
    config.bots.get(seat).cloned()
}

/// One summary row per game.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub variant: String,
    pub players: u64,
    pub bots: String,
    pub winner: Option<u64>,
    pub winner_bot: Option<String>,
    pub turns: u32,
    pub cards_played: u32,
    pub cards_drawn: u64,
    pub eliminations: u32,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        Self {
            game_id: m.game_id,
            seed: m.seed,
            variant: m.config.variant.clone(),
            players: m.config.players,
            bots: m.config.bots.join("/"),
            winner: m.result.winner.map(|p| p.0),
            winner_bot: m.result.winner_bot.clone(),
            turns: m.counters.turns,
            cards_played: m.counters.cards_played,
            cards_drawn: m.counters.cards_drawn,
            eliminations: m.counters.eliminations,
            duration_ms: m.result.duration_ms,
        }
    }
}
