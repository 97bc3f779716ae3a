//! Batch Simulation
//! Runs a generated world for N turns without a player and prints a JSON summary

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use geosynthesis::ai::AiDecision;
use geosynthesis::core::config::SimulationConfig;
use geosynthesis::core::error::{GeoError, Result};
use geosynthesis::persistence::export_to_file;
use geosynthesis::simulation::TurnEngine;
use geosynthesis::world::generate_world;

/// Batch simulation - headless run for balancing
#[derive(Parser, Debug)]
#[command(name = "batch_sim")]
#[command(about = "Run the simulation headless and print a JSON summary")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Turns to play
    #[arg(long, default_value_t = 120)]
    turns: u32,

    /// Number of nations
    #[arg(long, default_value_t = 8)]
    nations: usize,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the final game state here
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Serialize)]
struct NationSummary {
    name: String,
    gdp: f64,
    population: u64,
    tech_level: f64,
    pollution: f64,
    industries: usize,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    turns_played: u32,
    final_turn: u32,
    final_year: u32,
    events: usize,
    trade_routes: usize,
    actions: BTreeMap<&'static str, u32>,
    nations: Vec<NationSummary>,
}

fn action_label(decision: &AiDecision) -> &'static str {
    match decision {
        AiDecision::Build { .. } => "build",
        AiDecision::Trade { .. } => "trade",
        AiDecision::Diplomacy { .. } => "diplomacy",
        AiDecision::Idle => "none",
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("geosynthesis=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::new(),
    };
    config.seed = args.seed;
    config.world.nation_count = args.nations;
    config.validate().map_err(GeoError::InvalidConfig)?;

    let mut state = generate_world(&config.world, &mut ChaCha8Rng::seed_from_u64(config.seed));
    let mut engine = TurnEngine::seeded(config);

    let mut actions: BTreeMap<&'static str, u32> = BTreeMap::new();
    for _ in 0..args.turns {
        let report = engine.advance(&mut state);
        for action in &report.ai_actions {
            *actions.entry(action_label(&action.decision)).or_insert(0) += 1;
        }
    }

    if let Some(path) = &args.export {
        export_to_file(&state, path)?;
    }

    let summary = Summary {
        seed: engine.config().seed,
        turns_played: args.turns,
        final_turn: state.turn,
        final_year: state.year,
        events: state.global_events.len(),
        trade_routes: state.trade_routes.len(),
        actions,
        nations: state
            .nations
            .iter()
            .map(|n| NationSummary {
                name: n.name.clone(),
                gdp: n.gdp,
                population: n.population,
                tech_level: n.tech_level,
                pollution: n.pollution,
                industries: n.industries.len(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
