//! Bot simulator CLI - bots-only games hosted through the engine's game service.
//!
//! Every seat is a registered bot policy, so one `host_game` call plays a
//! whole game. Results go to a JSONL file (optionally gzipped) and a CSV summary.

mod metrics;
mod output;
mod types;

use clap::Parser;
use metrics::{build_game_metrics, GameConfig, GameMetrics};
use output::OutputWriter;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use types::{OutputFormat, VariantArg};
use uno_engine::ai::registry;
use uno_engine::domain::{create_game, ActionOutcome, PlayerId, Settings, Variant};
use uno_engine::services::sessions::BotSeat;
use uno_engine::{EngineConfig, GameService, InMemoryLedger};

/// Stalled bot chains picked up again before a game counts as failed.
const MAX_RESUMES: usize = 16;

#[derive(Parser)]
#[command(name = "bot-simulator")]
#[command(about = "Bots-only UNO games for comparing policies")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Rule set for every game
    #[arg(long, value_enum, default_value = "classic")]
    variant: VariantArg,

    /// Seats per game
    #[arg(short, long, default_value = "4")]
    players: u64,

    /// Bot policy, or a comma separated list that seats cycle through
    #[arg(long, value_delimiter = ',', default_value = registry::DEFAULT_BOT)]
    bot: Vec<String>,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Automatic steps allowed per game before it counts as stalled
    #[arg(long)]
    max_steps: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Structured JSON logs filtered by RUST_LOG instead of the plain console format
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        uno_engine::telemetry::init_tracing();
    } else {
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let bots = resolve_bots(&args.bot, args.players)?;
    let variant = Variant::from(args.variant);

    let mut config = EngineConfig::default();
    if let Some(steps) = args.max_steps {
        config.max_orchestration_steps = steps;
    }
    config.validate()?;
    let service = GameService::new(config, Arc::new(InMemoryLedger::default()));

    if args.show_output {
        info!(
            games = args.games,
            variant = ?variant,
            seats = ?bots,
            "Starting bot simulator"
        );
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };
        let game_start = Instant::now();

        match run_game(&service, variant, &bots, seed) {
            Ok(outcomes) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let game_config = GameConfig {
                    variant: format!("{variant:?}"),
                    players: args.players,
                    bots: bots.clone(),
                    total_games: args.games,
                };
                let metrics =
                    build_game_metrics(game_num, seed, game_config, &outcomes, duration_ms);

                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        game = game_num,
                        winner = ?metrics.result.winner,
                        turns = metrics.counters.turns,
                        "Game completed"
                    );
                }
                results.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!(game = game_num, seed, "Game failed: {}", e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

/// Canonical policy name for each seat, cycling through `requested`.
fn resolve_bots(requested: &[String], players: u64) -> Result<Vec<String>, String> {
    if requested.is_empty() {
        return Err("at least one bot policy is required".to_string());
    }
    let known = requested
        .iter()
        .map(|name| {
            registry::by_name(name)
                .map(|factory| factory.name.to_string())
                .ok_or_else(|| format!("Unknown bot policy: {name}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(known.iter().cycle().take(players as usize).cloned().collect())
}

fn run_game(
    service: &GameService,
    variant: Variant,
    bots: &[String],
    seed: u64,
) -> Result<Vec<ActionOutcome>, Box<dyn std::error::Error>> {
    let players: Vec<PlayerId> = (1..=bots.len() as u64).map(PlayerId).collect();
    let settings = Settings::for_variant(variant);
    let (game, opening) = create_game(&settings, &players, seed, service.config().limits())?;

    let seats: BTreeMap<PlayerId, BotSeat> = players
        .iter()
        .zip(bots)
        .map(|(&player, name)| {
            let seat = BotSeat {
                name: name.clone(),
                seed: Some(seed ^ player.0),
            };
            (player, seat)
        })
        .collect();

    let (id, hosted) = service.host_game(game, seats)?;
    let mut outcomes = vec![opening, hosted];
    for _ in 0..MAX_RESUMES {
        if !service.sessions().contains(id) {
            return Ok(outcomes);
        }
        outcomes.push(service.resume(id)?);
    }
    if service.sessions().remove(id) {
        return Err(format!("game did not finish after {MAX_RESUMES} resumes").into());
    }
    Ok(outcomes)
}

fn print_summary(results: &[GameMetrics], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let games = results.len() as f64;
    let turns: u64 = results.iter().map(|m| u64::from(m.counters.turns)).sum();
    let drawn: u64 = results.iter().map(|m| m.counters.cards_drawn).sum();
    let eliminations: u64 = results
        .iter()
        .map(|m| u64::from(m.counters.eliminations))
        .sum();
    println!("Average turns: {:.1}", turns as f64 / games);
    println!("Average cards drawn: {:.1}", drawn as f64 / games);
    println!("Eliminations: {}", eliminations);

    let mut seat_wins: BTreeMap<u64, u32> = BTreeMap::new();
    let mut policy_wins: HashMap<&str, u32> = HashMap::new();
    for m in results {
        if let Some(winner) = m.result.winner {
            *seat_wins.entry(winner.0).or_default() += 1;
        }
        if let Some(ref bot) = m.result.winner_bot {
            *policy_wins.entry(bot.as_str()).or_default() += 1;
        }
    }

    println!("\n=== Wins by Seat ===");
    for (seat, wins) in &seat_wins {
        println!(
            "Seat {}: wins={} ({:.1}%)",
            seat,
            wins,
            f64::from(*wins) / games * 100.0
        );
    }
    println!("\n=== Wins by Policy ===");
    let mut policies: Vec<_> = policy_wins.into_iter().collect();
    policies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (policy, wins) in policies {
        println!(
            "{}: wins={} ({:.1}%)",
            policy,
            wins,
            f64::from(wins) / games * 100.0
        );
    }
}
