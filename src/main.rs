//! Geosynthesis - Entry Point
//!
//! Loads or generates a world, then runs an interactive loop where the
//! player advances turns and acts for their nation. Every completed turn
//! is autosaved.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use geosynthesis::core::config::SimulationConfig;
use geosynthesis::core::error::{GeoError, Result};
use geosynthesis::core::types::{NationId, ResourceKind};
use geosynthesis::diplomacy::{improve_relations, RelationStatus};
use geosynthesis::economy::{build_industry, create_trade_route};
use geosynthesis::persistence::{export_to_file, import_from_file, RemoteStore, SaveManager};
use geosynthesis::simulation::{GameSession, TurnEngine, TurnReport};
use geosynthesis::world::{generate_world, GameState, IndustryType};

/// Geosynthesis - turn-based geopolitical economy simulation
#[derive(Parser, Debug)]
#[command(name = "geosynthesis")]
#[command(about = "Play a turn-based geopolitical economy simulation")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of nations in a generated world
    #[arg(long)]
    nations: Option<usize>,

    /// Directory for local save slots
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Remote save service base URL (token read from GEOSYNTHESIS_TOKEN)
    #[arg(long)]
    remote_url: Option<String>,

    /// Ignore existing saves and start a new world
    #[arg(long, default_value_t = false)]
    new_game: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::new(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(nations) = args.nations {
        config.world.nation_count = nations;
    }
    if let Some(dir) = &args.save_dir {
        config.persistence.save_dir = dir.clone();
    }
    if let Some(url) = &args.remote_url {
        config.persistence.remote_url = Some(url.clone());
    }
    config.validate().map_err(GeoError::InvalidConfig)?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geosynthesis=info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    tracing::info!(seed = config.seed, "Geosynthesis starting...");

    // Async runtime for the remote save service
    let rt = Runtime::new()?;

    let remote = match &config.persistence.remote_url {
        Some(url) => match RemoteStore::from_env(url.as_str()) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "remote saves disabled");
                None
            }
        },
        None => None,
    };
    let saves = SaveManager::new(config.persistence.clone(), remote);
    if saves.has_remote() {
        println!("Saving to the remote service, with local fallback in {}", saves.local().dir().display());
    } else {
        println!("Saving locally in {}", saves.local().dir().display());
    }

    let mut world_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let state = if args.new_game {
        generate_world(&config.world, &mut world_rng)
    } else {
        let (state, source) = rt.block_on(saves.load_or_generate(&config.world, &mut world_rng));
        println!("Loaded game from {:?}", source);
        state
    };

    let session = GameSession::new(state, TurnEngine::seeded(config.clone()));

    println!("\n=== GEOSYNTHESIS ===");
    println!("Lead your nation through a changing world economy");
    println!();
    print_help();

    loop {
        display_status(&session.state());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["help"] | ["h"] => print_help(),
            ["next"] | ["n"] => {
                play_turns(&session, &saves, &rt, 1);
            }
            ["run", n] => match n.parse::<u32>() {
                Ok(n) => play_turns(&session, &saves, &rt, n),
                Err(_) => println!("Usage: run <number>"),
            },
            ["status"] | ["s"] => display_detailed_status(&session.state()),
            ["build", industry] => {
                let industry_type = IndustryType::from(*industry);
                let mut state = session.state();
                let built = state
                    .player_nation_mut()
                    .map(|player| {
                        build_industry(
                            player,
                            &industry_type,
                            config.diplomacy.player_build_cost,
                            &config.economy,
                        )
                    })
                    .unwrap_or(false);
                if built {
                    println!("Built {}.", industry_type);
                } else {
                    println!(
                        "Cannot build {}: need {:.0} GDP.",
                        industry_type, config.diplomacy.player_build_cost
                    );
                }
            }
            ["trade", partner, resource, amount] => {
                let (Some(resource), Ok(amount)) = (ResourceKind::parse(resource), amount.parse::<f64>()) else {
                    println!("Usage: trade <nation> <iron|oil|rare_earth|food|power> <amount>");
                    continue;
                };
                let mut state = session.state();
                let player = state.player_nation.clone();
                if create_trade_route(&mut state, &player, &NationId::from(*partner), resource, amount) {
                    println!("Trade route opened: {} {} to {}.", amount, resource, partner);
                } else {
                    println!("Trade declined: unknown nation or not enough {}.", resource);
                }
            }
            ["improve", target] => {
                let mut state = session.state();
                let player = state.player_nation.clone();
                let target = NationId::from(*target);
                if improve_relations(&mut state, &player, &target, &config.diplomacy) {
                    let value = state
                        .player_nation()
                        .and_then(|n| n.relation(&target))
                        .unwrap_or(0.0);
                    println!("Relations with {} now {:.0}.", target, value);
                } else {
                    println!(
                        "Mission declined: unknown nation or less than {:.0} GDP.",
                        config.diplomacy.mission_cost
                    );
                }
            }
            ["save"] => {
                let target = rt.block_on(saves.save(&session.snapshot()));
                println!("Saved ({:?}).", target);
            }
            ["saves"] => match saves.local().list_saves() {
                Ok(list) if list.is_empty() => println!("No local saves."),
                Ok(list) => {
                    for info in list {
                        println!("  {} (saved at {:?})", info.slot, info.saved_at);
                    }
                }
                Err(e) => println!("Could not list saves: {}", e),
            },
            ["export", path] => match export_to_file(&session.snapshot(), PathBuf::from(path).as_path()) {
                Ok(()) => println!("Exported to {}.", path),
                Err(e) => println!("Export failed: {}", e),
            },
            ["import", path] => match import_from_file(PathBuf::from(path).as_path()) {
                Ok(state) => {
                    session.replace_state(state);
                    println!("Imported {}.", path);
                }
                Err(e) => println!("Import failed: {}", e),
            },
            ["new"] => {
                session.replace_state(generate_world(&config.world, &mut world_rng));
                println!("Started a new world.");
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    let state = session.into_state();
    println!(
        "\nGoodbye! Final state: turn {}, year {}.",
        state.turn, state.year
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  next / n                          - Play one turn");
    println!("  run <n>                           - Play n turns");
    println!("  status / s                        - Show every nation");
    println!("  build <industry>                  - Build or upgrade an industry");
    println!("  trade <nation> <resource> <amt>   - Open a trade route");
    println!("  improve <nation>                  - Diplomatic mission");
    println!("  save / saves                      - Save / list local saves");
    println!("  export <path> / import <path>     - Write or read a save file");
    println!("  new                               - Generate a new world");
    println!("  quit / q                          - Exit");
    println!();
}

/// Play turns, autosaving after each one
fn play_turns(session: &GameSession, saves: &SaveManager, rt: &Runtime, count: u32) {
    for _ in 0..count {
        match session.advance() {
            Ok(outcome) => {
                let target = rt.block_on(saves.autosave(&outcome.snapshot));
                tracing::debug!(?target, "autosave");
                if count == 1 {
                    print_report(&outcome.report);
                }
            }
            Err(e) => {
                println!("Turn not played: {}", e);
                return;
            }
        }
    }
    if count > 1 {
        let state = session.state();
        println!("Played {} turns. Now turn {}, {}.", count, state.turn, state.year);
    }
}

fn print_report(report: &TurnReport) {
    println!("Turn {} complete.", report.turn_played);
    if report.year_changed {
        println!("A new year begins: {}", report.year);
    }
    for action in &report.ai_actions {
        println!("  {}: {:?}", action.nation, action.decision);
    }
    for trade in &report.economy.trades {
        if trade.transferred < trade.requested {
            println!(
                "  {} could only ship {:.0} of {:.0} {} to {}",
                trade.from, trade.transferred, trade.requested, trade.resource, trade.to
            );
        }
    }
    if let Some(event) = &report.event {
        println!("  [{}] {}: {}", event.kind.as_str(), event.title, event.description);
    }
}

fn display_status(state: &GameState) {
    match state.player_nation() {
        Some(player) => println!(
            "\n[Turn {} | {}] {}: GDP {:.0}, tech {:.1}, pollution {:.0}, stability {:.0}",
            state.turn, state.year, player.name, player.gdp, player.tech_level, player.pollution, player.stability
        ),
        None => println!("\n[Turn {} | {}] (no player nation)", state.turn, state.year),
    }
}

fn display_detailed_status(state: &GameState) {
    println!();
    println!("=== WORLD STATUS ===");
    println!("Turn {}, year {}", state.turn, state.year);
    for nation in &state.nations {
        let marker = if nation.is_player { "*" } else { " " };
        println!(
            "{} {} ({}): GDP {:.0}, pop {}, tech {:.1}, pollution {:.0}",
            marker, nation.name, nation.id, nation.gdp, nation.population, nation.tech_level, nation.pollution
        );
        let stock: Vec<String> = nation
            .resources
            .iter()
            .map(|(kind, amount)| format!("{} {:.0}", kind, amount))
            .collect();
        println!("    resources: {}", stock.join(", "));
        let industries: Vec<String> = nation
            .industries
            .iter()
            .map(|i| format!("{} L{}", i.industry_type, i.level))
            .collect();
        println!("    industries: {}", industries.join(", "));
    }

    if let Some(player) = state.player_nation() {
        println!();
        println!("Relations of {}:", player.name);
        for (other, value) in &player.relations {
            println!("  {}: {:.0} ({})", other, value, RelationStatus::from_value(*value));
        }

        let routes: Vec<String> = state
            .routes_for(&player.id)
            .map(|r| format!("{} -> {}: {:.0} {} at {}", r.from, r.to, r.amount, r.resource, r.price_per_unit))
            .collect();
        if !routes.is_empty() {
            println!();
            println!("Trade routes:");
            for route in routes {
                println!("  {}", route);
            }
        }
    }

    let recent: Vec<_> = state.global_events.iter().rev().take(3).collect();
    if !recent.is_empty() {
        println!();
        println!("Recent events:");
        for event in recent {
            println!("  turn {}: {}", event.turn, event.title);
        }
    }
    println!();
}
